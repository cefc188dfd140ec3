use anyhow::Result;
use excel_interviewer::config::parse_flag;
use excel_interviewer::utils::logging;
use excel_interviewer::{App, Config};
use tracing::error;

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    let verbose = std::env::var("VERBOSE_LOGGING")
        .ok()
        .and_then(|v| parse_flag(&v))
        .unwrap_or(false);
    logging::init(verbose);

    // 加载配置，缺少凭证直接退出
    let config = Config::from_env().inspect_err(|e| error!("❌ 配置加载失败: {}", e))?;

    // 初始化并运行应用
    App::initialize(config).await?.run().await?;

    Ok(())
}
