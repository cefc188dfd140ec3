//! 日志工具模块
//!
//! 提供日志初始化、格式化输出和面试记录落盘的辅助函数

use std::fs;
use std::path::Path;

use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::Transcript;

/// 初始化日志
///
/// 优先使用 `RUST_LOG`，否则按 `verbose` 选择 debug / info。
/// 日志写到 stderr，不会和终端里的面试对话混在一起。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - Excel 模拟面试");
    info!("🤖 模型: {}", config.llm_model_name);
    info!("🌐 接口: {}", config.llm_api_url);
    info!("⏱️ 超时: {} 秒", config.llm_timeout_secs);
    info!("📚 题库: {}", config.question_bank_path);
    info!("{}", "=".repeat(60));
}

/// 记录题单构建结果
pub fn log_playlist_built(len: usize, requested: usize) {
    if len < requested {
        info!("✓ 题单已生成: {} 道题（期望 {} 道，题库不足）", len, requested);
    } else {
        info!("✓ 题单已生成: {} 道题", len);
    }
}

/// 把整场面试记录写入文件
///
/// 文件头带上生成时间，之后每行一条 `role: content`。
pub fn write_transcript_log(path: impl AsRef<Path>, transcript: &Transcript) -> AppResult<()> {
    let path = path.as_ref();
    let content = format!(
        "{}\n面试记录 - {}\n{}\n\n{}\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60),
        transcript.render()
    );

    fs::write(path, content)
        .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))?;

    info!("\n面试记录已保存至: {}", path.display());
    Ok(())
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度（按字符计）
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
