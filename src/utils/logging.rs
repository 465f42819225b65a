/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use crate::config::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// 优先使用 `RUST_LOG`，否则按 `verbose` 选择 debug / info 级别。
/// 重复调用不会报错（测试中会多次初始化）。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!(
        "🚀 程序启动 - 题目导出 ({})",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    match &config.input_file {
        Some(path) => info!("📄 静态输入: {}", path.display()),
        None => info!("🌐 题目 API: {}", config.question_api_pattern),
    }
    info!(
        "🗣️ 语言: {}",
        config
            .languages
            .iter()
            .map(|l| l.code())
            .collect::<Vec<_>>()
            .join(", ")
    );
    info!("📂 输出目录: {}", config.output_dir.display());
    info!("{}", "=".repeat(60));
}

/// 记录系列开始信息
///
/// # 参数
/// - `index`: 系列序号（从 1 开始）
/// - `total`: 系列总数
/// - `series_id`: 系列 ID
/// - `series_name`: 系列名称，未知时为空
pub fn log_series_start(index: usize, total: usize, series_id: &str, series_name: &str) {
    info!("\n{}", "─".repeat(60));
    if series_name.is_empty() {
        info!("📦 开始处理第 {}/{} 个系列: #{}", index, total, series_id);
    } else {
        info!(
            "📦 开始处理第 {}/{} 个系列: #{} {}",
            index, total, series_id, series_name
        );
    }
    info!("{}", "─".repeat(60));
}

/// 打印最终统计信息
///
/// # 参数
/// - `success`: 成功导出的文档数
/// - `empty`: 没有内容的导出数
/// - `failed`: 失败数
/// - `output_dir`: 输出目录
pub fn print_final_stats(success: usize, empty: usize, failed: usize, output_dir: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}", success);
    info!("📭 无内容: {}", empty);
    info!("❌ 失败: {}", failed);
    info!("{}", "=".repeat(60));
    info!("\n文档已保存至: {}", output_dir);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
