//! HTTP 抓取器 - 基础设施层
//!
//! 持有唯一的 HTTP 客户端，只暴露"GET 一个 URL"的能力

use crate::error::UpstreamError;
use std::time::Duration;
use tracing::debug;

/// HTTP 抓取器
///
/// 职责：
/// - 持有唯一的 reqwest::Client
/// - 暴露带超时的 GET 能力
/// - 不认识 Question / Series
/// - 非 2xx 状态码视为失败
#[derive(Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// 创建新的抓取器
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// GET 文本响应
    ///
    /// # 参数
    /// - `url`: 请求地址
    /// - `timeout`: 本次请求的超时时间
    pub async fn get_text(&self, url: &str, timeout: Duration) -> Result<String, UpstreamError> {
        let response = self.send(url, timeout).await?;
        response
            .text()
            .await
            .map_err(|source| request_failed(url, source))
    }

    /// GET 二进制响应
    pub async fn get_bytes(&self, url: &str, timeout: Duration) -> Result<Vec<u8>, UpstreamError> {
        let response = self.send(url, timeout).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|source| request_failed(url, source))?;
        Ok(bytes.to_vec())
    }

    async fn send(&self, url: &str, timeout: Duration) -> Result<reqwest::Response, UpstreamError> {
        debug!("GET {} (超时 {:?})", url, timeout);

        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|source| request_failed(url, source))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::BadStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }
}

fn request_failed(url: &str, source: reqwest::Error) -> UpstreamError {
    UpstreamError::RequestFailed {
        url: url.to_string(),
        source,
    }
}
