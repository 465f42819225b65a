//! 批量系列处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责确定要导出的系列并逐个处理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：输出启动信息、创建 HttpFetcher
//! 2. **确定目标**：配置的系列 ID，或系列列表中的全部系列
//! 3. **顺序处理**：一次只处理一个系列，委托 series_processor
//! 4. **全局统计**：汇总所有系列的导出结果

use crate::clients::SeriesClient;
use crate::config::Config;
use crate::infrastructure::HttpFetcher;
use crate::models::SeriesSummary;
use crate::orchestrator::series_processor::{self, SeriesStats};
use crate::utils::logging::{log_series_start, log_startup, print_final_stats};
use crate::workflow::ExportFlow;
use anyhow::{bail, Result};
use tracing::{error, info, warn};

/// 静态输入且未配置系列 ID 时使用的占位 ID
const LOCAL_SERIES_ID: &str = "local";

/// 应用主结构
pub struct App {
    config: Config,
    fetcher: HttpFetcher,
}

/// 全局统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    pub series_total: usize,
    pub exported: usize,
    pub empty: usize,
    pub failed: usize,
}

impl RunStats {
    fn add(&mut self, stats: SeriesStats) {
        self.exported += stats.exported;
        self.empty += stats.empty;
        self.failed += stats.failed;
    }
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        Ok(Self {
            config,
            fetcher: HttpFetcher::new(),
        })
    }

    /// 使用指定的 HttpFetcher 初始化（测试中注入）
    pub fn with_fetcher(config: Config, fetcher: HttpFetcher) -> Self {
        Self { config, fetcher }
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<RunStats> {
        let flow = ExportFlow::new(&self.fetcher, &self.config);
        let targets = self.resolve_targets(flow.client()).await?;

        let mut stats = RunStats {
            series_total: targets.len(),
            ..Default::default()
        };

        for (idx, (series_id, series_name)) in targets.iter().enumerate() {
            log_series_start(idx + 1, targets.len(), series_id, series_name);

            match series_processor::process_series(&flow, series_id, &self.config).await {
                Ok(series_stats) => stats.add(series_stats),
                Err(e) => {
                    error!("[系列 {}] ❌ 处理失败: {}", series_id, e);
                    stats.failed += 1;
                }
            }
        }

        print_final_stats(
            stats.exported,
            stats.empty,
            stats.failed,
            &self.config.output_dir.display().to_string(),
        );

        Ok(stats)
    }

    /// 确定要导出的系列 (ID, 名称)
    async fn resolve_targets(&self, client: &SeriesClient<'_>) -> Result<Vec<(String, String)>> {
        if client.uses_static_input() {
            let ids = if self.config.series_ids.is_empty() {
                vec![LOCAL_SERIES_ID.to_string()]
            } else {
                self.config.series_ids.clone()
            };
            return Ok(ids.into_iter().map(|id| (id, String::new())).collect());
        }

        info!("\n📋 正在获取系列列表...");
        let series_list = match client.fetch_series_list().await {
            Ok(list) => Some(list),
            Err(e) => {
                warn!("⚠️ 获取系列列表失败: {}", e);
                None
            }
        };

        if self.config.series_ids.is_empty() {
            return match series_list {
                Some(list) if !list.is_empty() => Ok(list
                    .into_iter()
                    .map(|s| (s.series_id, s.series_name))
                    .collect()),
                _ => bail!("没有待导出的系列：未配置 series_ids，且系列列表为空或不可用"),
            };
        }

        Ok(select_configured(&self.config.series_ids, series_list.as_deref()))
    }
}

/// 按配置的 ID 选择系列
///
/// 系列列表可用时跳过列表中不存在的 ID；不可用时原样使用配置的 ID。
fn select_configured(series_ids: &[String], series_list: Option<&[SeriesSummary]>) -> Vec<(String, String)> {
    series_ids
        .iter()
        .filter_map(|id| match series_list {
            None => Some((id.clone(), String::new())),
            Some(list) => match list.iter().find(|s| &s.series_id == id) {
                Some(series) => Some((id.clone(), series.series_name.clone())),
                None => {
                    warn!("⚠️ 系列不存在，已跳过: {}", id);
                    None
                }
            },
        })
        .collect()
}
