//! 单个系列处理器 - 编排层
//!
//! 负责一个系列的全部导出：按配置的语言依次导出，必要时保存原始 JSON，
//! 并输出该系列的统计信息。

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::Lang;
use crate::services::{group_by_section, process_data};
use crate::workflow::{ExportArtifact, ExportCtx, ExportFlow};
use std::path::Path;
use tracing::{error, info, warn};

/// 系列处理统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeriesStats {
    pub exported: usize,
    pub empty: usize,
    pub failed: usize,
}

/// 处理单个系列
///
/// # 参数
/// - `flow`: 导出流程
/// - `series_id`: 系列 ID
/// - `config`: 配置
///
/// # 返回
/// 负载获取失败时返回错误；单个语言导出失败只计入统计
pub async fn process_series(flow: &ExportFlow<'_>, series_id: &str, config: &Config) -> AppResult<SeriesStats> {
    let raw_json = flow.client().fetch_raw_json(Some(series_id)).await?;

    log_sections(series_id, &raw_json);

    if config.export_raw {
        let file_name = format!("series_{}_raw.json", series_id);
        let pretty = serde_json::to_string_pretty(&raw_json)
            .map_err(|e| AppError::Document(e.to_string()))?;
        write_output(&config.output_dir, &file_name, pretty.as_bytes()).await?;
        info!("[系列 {}] ✓ 原始 JSON 已保存: {}", series_id, file_name);
    }

    let mut stats = SeriesStats::default();

    for lang in &config.languages {
        let ctx = match &config.section_id {
            Some(sid) => ExportCtx::section(series_id, sid.as_str(), *lang),
            None => ExportCtx::full(series_id, *lang),
        };

        match flow.run_with_payload(&ctx, &raw_json).await {
            Ok(artifact) => {
                save_artifact(&config.output_dir, &artifact).await?;
                info!(
                    "{} ✓ 已保存 {} ({} 道题)",
                    ctx, artifact.file_name, artifact.question_count
                );
                stats.exported += 1;
            }
            Err(e) if e.is_no_content() => {
                warn!("{} 📭 {}", ctx, e);
                stats.empty += 1;
            }
            Err(e) => {
                error!("{} ❌ 导出失败: {}", ctx, e);
                stats.failed += 1;
            }
        }
    }

    info!(
        "[系列 {}] 导出统计: 成功 {}, 无内容 {}, 失败 {}",
        series_id, stats.exported, stats.empty, stats.failed
    );

    Ok(stats)
}

/// 保存导出的文档
pub async fn save_artifact(output_dir: &Path, artifact: &ExportArtifact) -> AppResult<()> {
    write_output(output_dir, &artifact.file_name, &artifact.bytes).await
}

async fn write_output(output_dir: &Path, file_name: &str, bytes: &[u8]) -> AppResult<()> {
    tokio::fs::create_dir_all(output_dir)
        .await
        .map_err(|e| AppError::io(output_dir.display().to_string(), e))?;

    let path = output_dir.join(file_name);
    tokio::fs::write(&path, bytes)
        .await
        .map_err(|e| AppError::io(path.display().to_string(), e))
}

/// 输出章节概览（默认语言）
fn log_sections(series_id: &str, raw_json: &serde_json::Value) {
    let sections = group_by_section(&process_data(raw_json, Lang::default()));
    info!("[系列 {}] 章节数: {}", series_id, sections.len());
    for (sid, section) in sections.iter() {
        info!(
            "[系列 {}]   #{} {} ({} 道题)",
            series_id,
            sid,
            section.name,
            section.questions.len()
        );
    }
}
