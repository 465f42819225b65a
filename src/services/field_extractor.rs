//! 字段解析服务 - 业务能力层
//!
//! 把一段 HTML 片段拆成纯文本和图片地址列表。上游内容质量参差不齐，
//! 畸形 HTML 由 html5ever 尽力修复，这里永远不会失败。

use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;

static IMG_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("img").expect("img 选择器无效"));

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("空白正则无效"));

/// HTML 字段的解析结果
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldContent {
    /// 空白已归一化的纯文本
    pub text: String,
    /// `img[src]`，按文档顺序
    pub images: Vec<String>,
}

impl FieldContent {
    /// 没有文字也没有图片
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.images.is_empty()
    }
}

/// 解析 HTML 字段
///
/// # 参数
/// - `html`: HTML 片段，`None` 或空字符串返回空结果
///
/// # 返回
/// 相邻文本节点以单个空格连接、连续空白压缩为一个空格并去掉首尾空白后的文本，
/// 以及所有带非空 `src` 的 `img` 元素地址
pub fn parse_html_field(html: Option<&str>) -> FieldContent {
    let html = match html {
        Some(s) if !s.is_empty() => s,
        _ => return FieldContent::default(),
    };

    let fragment = Html::parse_fragment(html);

    let joined = fragment
        .root_element()
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    let text = WHITESPACE_RE.replace_all(&joined, " ").trim().to_string();

    let images = fragment
        .select(&IMG_SELECTOR)
        .filter_map(|img| img.value().attr("src"))
        .filter(|src| !src.is_empty())
        .map(str::to_string)
        .collect();

    FieldContent { text, images }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_html_field(None), FieldContent::default());
        assert_eq!(parse_html_field(Some("")), FieldContent::default());
    }

    #[test]
    fn test_text_and_image() {
        let field = parse_html_field(Some("<p>A &amp; B<img src='/x.png'></p>"));
        assert_eq!(field.text, "A & B");
        assert_eq!(field.images, vec!["/x.png"]);
    }

    #[test]
    fn test_whitespace_is_normalized() {
        let field = parse_html_field(Some(
            "<div>\n  Which   of the\tfollowing<br/>is <b>correct</b>?&nbsp; </div>",
        ));
        assert_eq!(field.text, "Which of the following is correct ?");
    }

    #[test]
    fn test_images_in_document_order_skipping_missing_src() {
        let field = parse_html_field(Some(
            r#"<img src="//cdn.example.com/1.png"><p>x<img alt="no src"><img src=""></p><img src="/2.png">"#,
        ));
        assert_eq!(field.images, vec!["//cdn.example.com/1.png", "/2.png"]);
        assert_eq!(field.text, "x");
    }

    #[test]
    fn test_malformed_html_does_not_fail() {
        let field = parse_html_field(Some("<p><b>unclosed <i>tags</p></div> text"));
        assert_eq!(field.text, "unclosed tags text");
    }

    #[test]
    fn test_plain_text_passthrough() {
        let field = parse_html_field(Some("  plain answer  "));
        assert_eq!(field.text, "plain answer");
        assert!(field.images.is_empty());
    }
}
