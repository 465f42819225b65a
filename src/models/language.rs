use serde::{Deserialize, Serialize};
use std::fmt;

/// 导出语言
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lang {
    /// 英语（默认语言）
    #[serde(rename = "en")]
    English,
    /// 印地语
    #[serde(rename = "hi")]
    Hindi,
}

impl Lang {
    /// 获取两位语言代码，用于拼接 `question_en` 之类的字段名
    pub fn code(self) -> &'static str {
        match self {
            Lang::English => "en",
            Lang::Hindi => "hi",
        }
    }

    /// 从语言代码解析（忽略大小写）
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Some(Lang::English),
            "hi" => Some(Lang::Hindi),
            _ => None,
        }
    }

    /// 是否为默认语言
    ///
    /// 非默认语言导出时，题干为空的题目会被过滤掉。
    pub fn is_default(self) -> bool {
        self == Lang::English
    }

    /// 获取所有支持的语言
    pub fn all() -> &'static [Lang] {
        &[Lang::English, Lang::Hindi]
    }
}

impl Default for Lang {
    fn default() -> Self {
        Lang::English
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
