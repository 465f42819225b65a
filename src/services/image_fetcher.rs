//! 图片下载服务 - 业务能力层
//!
//! 只负责"把一个图片引用变成可嵌入的图片"，失败时给出原因而不是报错，
//! 单张图片失败不影响其它图片和文字。

use crate::infrastructure::{HttpFetcher, ImageData};
use futures::stream::{self, StreamExt};
use image::GenericImageView;
use std::io::Cursor;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// 单张图片的处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageOutcome {
    /// 下载并校验成功
    Embedded { url: String, image: ImageData },
    /// 被省略
    Omitted { reference: String, reason: String },
}

/// 把图片引用解析为绝对地址
///
/// - `//host/x.png` 补全为 `https://host/x.png`
/// - `/x.png` 相对于 `base_url` 解析
/// - 其它引用原样返回
pub fn resolve_image_url(reference: &str, base_url: Option<&str>) -> Result<String, String> {
    let reference = reference.trim();
    if reference.is_empty() {
        return Err("图片地址为空".to_string());
    }

    if reference.starts_with("//") {
        return Ok(format!("https:{}", reference));
    }

    if reference.starts_with('/') {
        let base = base_url.ok_or_else(|| format!("相对路径缺少 base_url: {}", reference))?;
        let base = Url::parse(base).map_err(|e| format!("base_url 无效 ({}): {}", base, e))?;
        let joined = base
            .join(reference)
            .map_err(|e| format!("无法拼接图片地址 ({}): {}", reference, e))?;
        return Ok(joined.to_string());
    }

    Ok(reference.to_string())
}

/// 图片下载服务
pub struct ImageFetcher<'a> {
    fetcher: &'a HttpFetcher,
    base_url: Option<String>,
    timeout: Duration,
    concurrency: usize,
}

impl<'a> ImageFetcher<'a> {
    /// 创建新的图片下载服务
    ///
    /// # 参数
    /// - `fetcher`: HTTP 抓取器
    /// - `base_url`: 解析相对路径用的站点地址
    /// - `timeout`: 单张图片的超时时间
    /// - `concurrency`: 同时下载的数量，最小为 1
    pub fn new(
        fetcher: &'a HttpFetcher,
        base_url: Option<String>,
        timeout: Duration,
        concurrency: usize,
    ) -> Self {
        Self {
            fetcher,
            base_url,
            timeout,
            concurrency: concurrency.max(1),
        }
    }

    /// 下载并校验一张图片
    pub async fn fetch(&self, reference: &str) -> ImageOutcome {
        let omitted = |reason: String| {
            warn!("⚠️ 图片已省略 {}: {}", reference, reason);
            ImageOutcome::Omitted {
                reference: reference.to_string(),
                reason,
            }
        };

        let url = match resolve_image_url(reference, self.base_url.as_deref()) {
            Ok(url) => url,
            Err(reason) => return omitted(reason),
        };

        let bytes = match self.fetcher.get_bytes(&url, self.timeout).await {
            Ok(bytes) => bytes,
            Err(e) => return omitted(e.to_string()),
        };

        match decode_image(&bytes) {
            Ok(image) => {
                debug!("图片下载成功: {} ({}x{})", url, image.width_px, image.height_px);
                ImageOutcome::Embedded { url, image }
            }
            Err(reason) => omitted(reason),
        }
    }

    /// 下载一组图片，结果与输入顺序一致
    pub async fn fetch_all(&self, references: &[String]) -> Vec<ImageOutcome> {
        stream::iter(references)
            .map(|reference| self.fetch(reference))
            .buffered(self.concurrency)
            .collect()
            .await
    }
}

/// 校验图片字节并统一转为 PNG
pub fn decode_image(bytes: &[u8]) -> Result<ImageData, String> {
    let img = image::load_from_memory(bytes).map_err(|e| format!("无法识别的图片数据: {}", e))?;

    let mut png = Vec::new();
    img.write_to(&mut Cursor::new(&mut png), image::ImageOutputFormat::Png)
        .map_err(|e| format!("图片转码失败: {}", e))?;

    let (width_px, height_px) = img.dimensions();
    Ok(ImageData {
        png,
        width_px,
        height_px,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_protocol_relative() {
        assert_eq!(
            resolve_image_url("//cdn.example.com/x.png", None).unwrap(),
            "https://cdn.example.com/x.png"
        );
    }

    #[test]
    fn test_resolve_root_relative_against_base() {
        assert_eq!(
            resolve_image_url("/img/x.png", Some("https://host.com")).unwrap(),
            "https://host.com/img/x.png"
        );
    }

    #[test]
    fn test_resolve_absolute_unchanged() {
        assert_eq!(
            resolve_image_url("https://other.com/x.png", Some("https://host.com")).unwrap(),
            "https://other.com/x.png"
        );
    }

    #[test]
    fn test_resolve_root_relative_without_base_fails() {
        assert!(resolve_image_url("/img/x.png", None).is_err());
        assert!(resolve_image_url("   ", None).is_err());
    }

    #[test]
    fn test_decode_image_rejects_garbage() {
        assert!(decode_image(b"<html>404</html>").is_err());
    }

    #[test]
    fn test_decode_image_accepts_png() {
        let mut png = Vec::new();
        image::DynamicImage::new_rgb8(3, 2)
            .write_to(&mut Cursor::new(&mut png), image::ImageOutputFormat::Png)
            .unwrap();

        let decoded = decode_image(&png).unwrap();
        assert_eq!((decoded.width_px, decoded.height_px), (3, 2));
    }

    #[test]
    fn test_unresolvable_reference_is_omitted() {
        let fetcher = HttpFetcher::new();
        let images = ImageFetcher::new(&fetcher, None, Duration::from_secs(1), 2);

        let outcomes = tokio_test::block_on(images.fetch_all(&["/no-base.png".to_string()]));
        assert_eq!(outcomes.len(), 1);
        assert!(matches!(&outcomes[0], ImageOutcome::Omitted { reference, .. } if reference == "/no-base.png"));
    }
}
