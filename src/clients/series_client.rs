//! 系列 API 客户端
//!
//! 封装系列列表、题目负载的获取逻辑，返回的内容都经过负载恢复
use crate::config::Config;
use crate::error::{AppResult, SourceError};
use crate::infrastructure::HttpFetcher;
use crate::models::{SeriesList, SeriesSummary};
use crate::services::payload_recovery::recover_json;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// 系列 API 客户端
pub struct SeriesClient<'a> {
    fetcher: &'a HttpFetcher,
    series_api_url: String,
    question_api_pattern: String,
    input_file: Option<PathBuf>,
    payload_timeout: Duration,
}

impl<'a> SeriesClient<'a> {
    /// 创建新的系列客户端
    pub fn new(fetcher: &'a HttpFetcher, config: &Config) -> Self {
        Self {
            fetcher,
            series_api_url: config.series_api_url.clone(),
            question_api_pattern: config.question_api_pattern.clone(),
            input_file: config.input_file.clone(),
            payload_timeout: Duration::from_secs(config.payload_timeout_secs),
        }
    }

    /// 是否使用静态输入文件
    pub fn uses_static_input(&self) -> bool {
        self.input_file.is_some()
    }

    /// 拼接题目 API 地址
    pub fn question_url(&self, series_id: &str) -> String {
        self.question_api_pattern.replace("{series_id}", series_id)
    }

    /// 题目 API 的站点地址（scheme://host[:port]），用于解析相对图片路径
    pub fn base_url(&self, series_id: &str) -> Option<String> {
        let url = Url::parse(&self.question_url(series_id)).ok()?;
        let host = url.host_str()?;
        Some(match url.port() {
            Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
            None => format!("{}://{}", url.scheme(), host),
        })
    }

    /// 请求 URL 并恢复为 JSON
    ///
    /// # 参数
    /// - `url`: 请求地址
    ///
    /// # 返回
    /// 网络错误或非 2xx 状态返回 `UpstreamFetch`，内容无法解析返回 `Recovery`
    pub async fn fetch_json_from_url(&self, url: &str) -> AppResult<Value> {
        if url.trim().is_empty() {
            return Err(SourceError::MissingIdentifier.into());
        }

        let body = self.fetcher.get_text(url, self.payload_timeout).await?;
        debug!("响应长度: {} 字节", body.len());

        Ok(recover_json(&body)?)
    }

    /// 获取题目负载
    ///
    /// 配置了静态输入文件时读取文件，否则按 `series_id` 请求题目 API。
    ///
    /// # 参数
    /// - `series_id`: 系列 ID，不使用静态输入时必须提供
    pub async fn fetch_raw_json(&self, series_id: Option<&str>) -> AppResult<Value> {
        if let Some(path) = &self.input_file {
            return read_input_file(path).await;
        }

        let series_id = series_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or(SourceError::MissingIdentifier)?;

        let url = self.question_url(series_id);
        info!("📥 正在获取题目负载: {}", url);
        self.fetch_json_from_url(&url).await
    }

    /// 获取系列列表
    pub async fn fetch_series_list(&self) -> AppResult<Vec<SeriesSummary>> {
        let raw = self.fetch_json_from_url(&self.series_api_url).await?;
        let list = parse_series_list(raw);
        info!("✓ 系列列表: {} 个", list.data.len());
        Ok(list.data)
    }
}

/// 读取静态输入文件并恢复为 JSON
async fn read_input_file(path: &Path) -> AppResult<Value> {
    let path_str = path.display().to_string();
    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        return Err(SourceError::InputFileMissing { path: path_str }.into());
    }

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| SourceError::ReadFailed {
            path: path_str.clone(),
            source,
        })?;

    info!("📄 使用静态输入文件: {}", path_str);
    Ok(recover_json(&content)?)
}

/// 解析系列列表，单个条目格式异常时跳过该条目
fn parse_series_list(raw: Value) -> SeriesList {
    let items = match raw.get("data").and_then(Value::as_array) {
        Some(items) => items.clone(),
        None => return SeriesList::default(),
    };

    let data = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<SeriesSummary>(item) {
            Ok(summary) => Some(summary),
            Err(e) => {
                debug!("跳过无法解析的系列条目: {}", e);
                None
            }
        })
        .collect();

    SeriesList { data }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client_with<'a>(fetcher: &'a HttpFetcher, pattern: &str) -> SeriesClient<'a> {
        let config = Config {
            question_api_pattern: pattern.to_string(),
            ..Config::default()
        };
        SeriesClient::new(fetcher, &config)
    }

    #[test]
    fn test_question_url_and_base_url() {
        let fetcher = HttpFetcher::new();
        let client = client_with(&fetcher, "https://www.example.com/api/questions/{series_id}/en");

        assert_eq!(client.question_url("615"), "https://www.example.com/api/questions/615/en");
        assert_eq!(client.base_url("615").as_deref(), Some("https://www.example.com"));
    }

    #[test]
    fn test_base_url_keeps_port() {
        let fetcher = HttpFetcher::new();
        let client = client_with(&fetcher, "http://127.0.0.1:8080/q/{series_id}");
        assert_eq!(client.base_url("1").as_deref(), Some("http://127.0.0.1:8080"));
    }

    #[tokio::test]
    async fn test_missing_identifier() {
        let fetcher = HttpFetcher::new();
        let client = client_with(&fetcher, "https://www.example.com/{series_id}");

        for id in [None, Some(""), Some("  ")] {
            let err = client.fetch_raw_json(id).await.unwrap_err();
            assert!(matches!(
                err,
                crate::error::AppError::SourceUnavailable(SourceError::MissingIdentifier)
            ));
        }
    }

    #[tokio::test]
    async fn test_read_input_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("payload.json");
        std::fs::write(&path, r#"{"data": []}"#).unwrap();

        assert_eq!(read_input_file(&path).await.unwrap(), json!({"data": []}));

        let err = read_input_file(&dir.path().join("missing.json")).await.unwrap_err();
        assert!(matches!(
            err,
            crate::error::AppError::SourceUnavailable(SourceError::InputFileMissing { .. })
        ));
    }

    #[test]
    fn test_parse_series_list_skips_bad_entries() {
        let list = parse_series_list(json!({
            "data": [
                {"series_id": 1, "series_name": "ok"},
                {"series_name": "no id"},
                {"series_id": "2", "series_name": "also ok"}
            ]
        }));
        let ids: Vec<_> = list.data.iter().map(|s| s.series_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }
}
