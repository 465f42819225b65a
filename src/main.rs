use anyhow::{Context, Result};
use question_export::utils::logging;
use question_export::{App, Config};
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置：CONFIG_FILE 指定 TOML 文件，否则使用默认值 + 环境变量
    let config = match std::env::var("CONFIG_FILE") {
        Ok(path) => Config::from_toml_file(Path::new(&path))
            .with_context(|| format!("无法加载配置文件: {}", path))?,
        Err(_) => Config::from_env().context("无法加载配置")?,
    };

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化并运行应用
    let stats = App::initialize(config)?.run().await?;

    if stats.exported == 0 && stats.failed > 0 {
        anyhow::bail!("没有成功导出任何文档 (失败 {})", stats.failed);
    }

    Ok(())
}
