use crate::error::{AppResult, ConfigError};
use crate::models::Lang;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// 程序配置
///
/// 由入口显式构造后传入各层，不存在模块级可变状态。
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 系列列表 API
    pub series_api_url: String,
    /// 题目 API 模板，`{series_id}` 会被替换
    pub question_api_pattern: String,
    /// 静态输入文件，设置后不再请求题目 API
    pub input_file: Option<PathBuf>,
    /// 题目负载请求超时（秒）
    pub payload_timeout_secs: u64,
    /// 单张图片请求超时（秒）
    pub image_timeout_secs: u64,
    /// 同时下载的图片数量，1 表示顺序下载
    pub image_fetch_concurrency: usize,
    /// 图片在文档中的显示宽度（英寸）
    pub image_width_inches: f32,
    /// 导出文件目录
    pub output_dir: PathBuf,
    /// 待导出的系列 ID，为空时导出系列列表中的全部系列
    pub series_ids: Vec<String>,
    /// 导出语言
    pub languages: Vec<Lang>,
    /// 只导出指定章节
    pub section_id: Option<String>,
    /// 同时导出原始 JSON
    pub export_raw: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            series_api_url: "https://www.testranking.in/admin/api/get-tab-package-series-v1/615/0/1/0/-1/2650169/0/1000/561".to_string(),
            question_api_pattern: "https://www.testranking.in/admin/api/questions-solutions-new/{series_id}/en".to_string(),
            input_file: None,
            payload_timeout_secs: 300,
            image_timeout_secs: 15,
            image_fetch_concurrency: 1,
            image_width_inches: 4.0,
            output_dir: PathBuf::from("output_docx"),
            series_ids: Vec::new(),
            languages: vec![Lang::English],
            section_id: None,
            export_raw: false,
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 默认配置 + 环境变量覆盖
    pub fn from_env() -> AppResult<Self> {
        Self::default().with_env_overrides()
    }

    /// 从 TOML 文件加载配置，环境变量优先于文件中的值
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::InvalidFile {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let config = Self::from_toml_str(&content).map_err(|e| ConfigError::InvalidFile {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        config.with_env_overrides()
    }

    /// 解析 TOML 文本，缺失的字段使用默认值
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    fn with_env_overrides(self) -> AppResult<Self> {
        let env = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());

        let languages = match env("LANGUAGES") {
            Some(raw) => parse_languages(&raw)?,
            None => self.languages,
        };

        Ok(Self {
            series_api_url: env("SERIES_API_URL").unwrap_or(self.series_api_url),
            question_api_pattern: env("QUESTION_API_PATTERN").unwrap_or(self.question_api_pattern),
            input_file: env("INPUT_FILE").map(PathBuf::from).or(self.input_file),
            payload_timeout_secs: parse_env("PAYLOAD_TIMEOUT_SECS", "u64")?.unwrap_or(self.payload_timeout_secs),
            image_timeout_secs: parse_env("IMAGE_TIMEOUT_SECS", "u64")?.unwrap_or(self.image_timeout_secs),
            image_fetch_concurrency: parse_env("IMAGE_FETCH_CONCURRENCY", "usize")?.unwrap_or(self.image_fetch_concurrency),
            image_width_inches: parse_env("IMAGE_WIDTH_INCHES", "f32")?.unwrap_or(self.image_width_inches),
            output_dir: env("OUTPUT_DIR").map(PathBuf::from).unwrap_or(self.output_dir),
            series_ids: env("SERIES_IDS")
                .map(|v| split_list(&v))
                .unwrap_or(self.series_ids),
            languages,
            section_id: env("SECTION_ID").or(self.section_id),
            export_raw: parse_env("EXPORT_RAW", "bool")?.unwrap_or(self.export_raw),
            verbose_logging: parse_env("VERBOSE_LOGGING", "bool")?.unwrap_or(self.verbose_logging),
        })
    }
}

fn parse_env<T: std::str::FromStr>(var_name: &str, expected_type: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(var_name) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            }),
        _ => Ok(None),
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// 解析逗号分隔的语言列表，如 `en,hi`
pub fn parse_languages(raw: &str) -> Result<Vec<Lang>, ConfigError> {
    split_list(raw)
        .iter()
        .map(|code| {
            Lang::from_code(code).ok_or_else(|| ConfigError::UnsupportedLanguage {
                code: code.clone(),
            })
        })
        .collect()
}
