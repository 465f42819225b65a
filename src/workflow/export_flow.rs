//! 导出流程 - 流程层
//!
//! 核心职责：定义"一次导出"的完整流程
//!
//! 流程顺序：
//! 1. 获取负载并恢复为 JSON
//! 2. 按语言规范化为题目记录
//! 3. 语言过滤 / 章节过滤
//! 4. 组装 DOCX（下载并嵌入图片）

use crate::clients::SeriesClient;
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::infrastructure::HttpFetcher;
use crate::models::{Lang, QuestionRecord};
use crate::services::{group_by_section, process_data, DocumentAssembler, SectionGroups};
use crate::utils::logging::truncate_text;
use crate::workflow::export_ctx::ExportCtx;
use serde_json::Value;
use tracing::{debug, info};

/// 一次导出的产物
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub question_count: usize,
}

/// 导出流程
///
/// - 编排 获取 → 规范化 → 过滤 → 组装
/// - 不持有任何资源（HTTP 客户端由上层传入）
/// - 只依赖 clients 和 services
pub struct ExportFlow<'a> {
    client: SeriesClient<'a>,
    assembler: DocumentAssembler<'a>,
    verbose_logging: bool,
}

impl<'a> ExportFlow<'a> {
    /// 创建新的导出流程
    pub fn new(fetcher: &'a HttpFetcher, config: &Config) -> Self {
        Self {
            client: SeriesClient::new(fetcher, config),
            assembler: DocumentAssembler::new(fetcher, config),
            verbose_logging: config.verbose_logging,
        }
    }

    pub fn client(&self) -> &SeriesClient<'a> {
        &self.client
    }

    /// 执行一次导出
    ///
    /// # 返回
    /// 过滤后没有题目时返回 `AppError::NoContent`，与网络错误区分
    pub async fn run(&self, ctx: &ExportCtx) -> AppResult<ExportArtifact> {
        info!("{} 🚀 开始导出", ctx);

        let raw_json = self.client.fetch_raw_json(Some(&ctx.series_id)).await?;
        self.run_with_payload(ctx, &raw_json).await
    }

    /// 对已获取的负载执行导出
    pub async fn run_with_payload(&self, ctx: &ExportCtx, raw_json: &Value) -> AppResult<ExportArtifact> {
        let records = process_data(raw_json, ctx.lang);
        let total = records.len();
        let records = apply_export_filter(records, ctx.lang, ctx.section_id.as_deref());

        info!("{} 题目: 过滤后 {} / 共 {}", ctx, records.len(), total);

        if records.is_empty() {
            let context = match &ctx.section_id {
                Some(_) => format!("{} 该章节没有题目", ctx),
                None => format!("{} 所选语言没有题目", ctx),
            };
            return Err(AppError::no_content(context));
        }

        if self.verbose_logging {
            for record in records.iter().take(3) {
                debug!("{} 题干: {}", ctx, truncate_text(&record.question_text, 80));
            }
        }

        let base_url = self.client.base_url(&ctx.series_id);
        let bytes = self.assembler.create_docx(&records, base_url.as_deref()).await?;

        info!("{} ✅ 导出完成 ({} 字节)", ctx, bytes.len());

        Ok(ExportArtifact {
            file_name: ctx.file_name(),
            bytes,
            question_count: records.len(),
        })
    }

    /// 按章节浏览（使用默认语言）
    pub async fn sections(&self, series_id: &str) -> AppResult<SectionGroups> {
        let raw_json = self.client.fetch_raw_json(Some(series_id)).await?;
        Ok(group_by_section(&process_data(&raw_json, Lang::default())))
    }
}

/// 导出前的过滤
///
/// - 非默认语言：去掉题干既无文字也无图片的题目（该语言没有翻译）
/// - 指定章节：只保留 `section_id` 相同的题目
pub fn apply_export_filter(
    records: Vec<QuestionRecord>,
    lang: Lang,
    section_id: Option<&str>,
) -> Vec<QuestionRecord> {
    records
        .into_iter()
        .filter(|r| lang.is_default() || !r.is_blank())
        .filter(|r| section_id.map_or(true, |sid| r.section_id == sid))
        .collect()
}
