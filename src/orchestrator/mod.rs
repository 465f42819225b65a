//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量处理和流程调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量系列处理器
//! - 管理应用生命周期（初始化、运行）
//! - 确定要导出的系列（配置或系列列表）
//! - 持有 HttpFetcher
//! - 输出全局统计信息
//!
//! ### `series_processor` - 单个系列处理器
//! - 获取一次负载，按每种语言导出
//! - 保存文档 / 原始 JSON
//! - 输出单个系列的统计信息
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<Series>)
//!     ↓
//! series_processor (处理 Vec<Lang>)
//!     ↓
//! workflow::ExportFlow (处理一次导出)
//!     ↓
//! clients / services (能力层：负载 / 解析 / 组装)
//!     ↓
//! infrastructure (基础设施：HttpFetcher / DOCX 写入)
//! ```

pub mod batch_processor;
pub mod series_processor;

// 重新导出主要类型
pub use batch_processor::{App, RunStats};
pub use series_processor::{process_series, SeriesStats};
