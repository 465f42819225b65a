pub mod export_ctx;
pub mod export_flow;

pub use export_ctx::ExportCtx;
pub use export_flow::{apply_export_filter, ExportArtifact, ExportFlow};
