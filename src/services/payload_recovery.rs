//! 负载恢复服务 - 业务能力层
//!
//! 上游有时直接返回 JSON，有时返回一个把转义后的 JSON 包在 `<body>` 里的 HTML 页面。
//! 这里按固定顺序依次尝试几种策略，第一个成功的结果即为最终结果，
//! 全部失败时返回 `RecoveryError`，不做任何额外猜测。

use crate::error::{RecoveryError, StrategyFailure};
use quick_xml::escape::{resolve_html5_entity, unescape_with};
use regex::{Captures, Regex};
use serde_json::Value;
use std::borrow::Cow;
use std::sync::LazyLock;
use tracing::debug;

static BODY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<body[^>]*>(.*)</body>").expect("body 正则无效"));

// 只识别以 `;` 结尾的实体，`&amp` 这类省略分号的旧写法原样保留
static ENTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&#?[A-Za-z0-9]+;").expect("实体正则无效"));

/// 恢复策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryStrategy {
    /// 直接按 JSON 解析
    DirectJson,
    /// 取 `<body>` 内容并解码 HTML 实体后解析
    HtmlBody,
    /// 在 `HtmlBody` 的基础上把 `\"` 还原为 `"` 后解析
    UnescapedQuotes,
}

impl RecoveryStrategy {
    /// 尝试顺序
    pub const ORDERED: [RecoveryStrategy; 3] = [
        RecoveryStrategy::DirectJson,
        RecoveryStrategy::HtmlBody,
        RecoveryStrategy::UnescapedQuotes,
    ];

    /// 策略名称（用于日志和错误信息）
    pub fn name(self) -> &'static str {
        match self {
            RecoveryStrategy::DirectJson => "direct-json",
            RecoveryStrategy::HtmlBody => "html-body",
            RecoveryStrategy::UnescapedQuotes => "unescaped-quotes",
        }
    }

    /// 执行单个策略
    pub fn apply(self, raw: &str) -> Result<Value, serde_json::Error> {
        match self {
            RecoveryStrategy::DirectJson => serde_json::from_str(raw),
            RecoveryStrategy::HtmlBody => serde_json::from_str(&decoded_body_region(raw)),
            RecoveryStrategy::UnescapedQuotes => {
                let fixed = decoded_body_region(raw).replace("\\\"", "\"");
                serde_json::from_str(&fixed)
            }
        }
    }
}

/// 把原始负载恢复为 JSON 树
///
/// # 参数
/// - `raw`: 文件内容或 HTTP 响应体
///
/// # 返回
/// 第一个成功策略的结果；全部失败时返回带有每个策略失败原因的 `RecoveryError`
pub fn recover_json(raw: &str) -> Result<Value, RecoveryError> {
    let mut attempts = Vec::with_capacity(RecoveryStrategy::ORDERED.len());
    let mut first_error: Option<serde_json::Error> = None;

    for strategy in RecoveryStrategy::ORDERED {
        match strategy.apply(raw) {
            Ok(value) => {
                debug!("负载恢复成功，策略: {}", strategy.name());
                return Ok(value);
            }
            Err(e) => {
                debug!("策略 {} 失败: {}", strategy.name(), e);
                attempts.push(StrategyFailure {
                    strategy: strategy.name(),
                    message: e.to_string(),
                });
                first_error.get_or_insert(e);
            }
        }
    }

    // ORDERED 非空，循环结束时必然记录了第一个错误
    let source = match first_error {
        Some(e) => e,
        None => <serde_json::Error as serde::de::Error>::custom("没有可用的恢复策略"),
    };
    Err(RecoveryError { attempts, source })
}

/// 取出 `<body>` 区域（没有则取全文），去掉首尾空白并解码 HTML 实体
fn decoded_body_region(raw: &str) -> String {
    let inner = BODY_RE
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(raw)
        .trim();
    decode_entities(inner).into_owned()
}

/// 逐个解码 HTML 实体，无法识别的实体原样保留
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    ENTITY_RE.replace_all(text, |caps: &Captures| {
        let entity = &caps[0];
        match unescape_with(entity, resolve_html5_entity) {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => entity.to_string(),
        }
    })
}
