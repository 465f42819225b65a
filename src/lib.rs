//! # Question Export
//!
//! 把题库接口返回的系列题目（JSON，有时被包在畸形 HTML 里）整理成按语言解析的
//! 题目记录，并导出为内嵌图片的 DOCX 文档
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源，只暴露能力
//! - `HttpFetcher` - 唯一的 HTTP 客户端持有者，提供带超时的 GET
//! - `docx_writer` - 把写入指令序列化为 DOCX
//!
//! ### ② 业务能力层（Services / Clients）
//! - `services/` - 描述"我能做什么"，每个服务只做一件事
//! - `payload_recovery` - 按固定顺序尝试多种策略恢复 JSON
//! - `field_extractor` - HTML 片段 → 纯文本 + 图片地址
//! - `record_normalizer` - JSON 树 → 题目记录
//! - `section_grouper` - 按章节分组
//! - `image_fetcher` / `document_assembler` - 下载图片并组装文档
//! - `clients/SeriesClient` - 系列列表 / 题目负载
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一次导出"的完整流程
//! - `ExportCtx` - 上下文封装（series_id + 语言 + 章节）
//! - `ExportFlow` - 流程编排（获取 → 规范化 → 过滤 → 组装）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量系列处理器
//! - `orchestrator/series_processor` - 单个系列处理器，按语言导出并保存
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::SeriesClient;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::HttpFetcher;
pub use models::{Lang, QuestionRecord, SectionGroup};
pub use orchestrator::App;
pub use services::{group_by_section, parse_html_field, process_data, recover_json};
pub use workflow::{ExportCtx, ExportFlow};
