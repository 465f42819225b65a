//! 导出上下文
//!
//! 封装"我正在导出哪个系列的哪种语言、哪个章节"这一信息

use crate::models::Lang;
use std::fmt::Display;

/// 导出上下文
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportCtx {
    /// 系列 ID
    pub series_id: String,

    /// 导出语言
    pub lang: Lang,

    /// 只导出该章节，`None` 表示全部章节
    pub section_id: Option<String>,
}

impl ExportCtx {
    /// 导出整个系列
    pub fn full(series_id: impl Into<String>, lang: Lang) -> Self {
        Self {
            series_id: series_id.into(),
            lang,
            section_id: None,
        }
    }

    /// 导出单个章节
    pub fn section(series_id: impl Into<String>, section_id: impl Into<String>, lang: Lang) -> Self {
        Self {
            series_id: series_id.into(),
            lang,
            section_id: Some(section_id.into()),
        }
    }

    /// 导出文件名
    pub fn file_name(&self) -> String {
        match &self.section_id {
            Some(sid) => format!("series_{}_section_{}_{}.docx", self.series_id, sid, self.lang),
            None => format!("series_{}_full_{}.docx", self.series_id, self.lang),
        }
    }
}

impl Display for ExportCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.section_id {
            Some(sid) => write!(f, "[系列 #{} 章节 #{} 语言 {}]", self.series_id, sid, self.lang),
            None => write!(f, "[系列 #{} 全部章节 语言 {}]", self.series_id, self.lang),
        }
    }
}
