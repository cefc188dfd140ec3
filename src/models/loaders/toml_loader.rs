use crate::error::{AppError, AppResult, FileError};
use crate::models::interview_mix::{InterviewMix, InterviewMixFile};
use std::path::Path;
use tokio::fs;

/// 从 TOML 文件加载难度配比
///
/// 文件不存在时使用默认配比；文件损坏时同样回退到默认配比并给出警告。
pub async fn load_interview_mix(toml_file_path: &Path) -> InterviewMix {
    match try_load_interview_mix(toml_file_path).await {
        Ok(Some(mix)) => {
            tracing::info!(
                "已加载难度配比 {}: 共 {} 道题",
                toml_file_path.display(),
                mix.requested_total()
            );
            mix
        }
        Ok(None) => {
            tracing::debug!(
                "未找到 {}，使用默认难度配比",
                toml_file_path.display()
            );
            InterviewMix::default()
        }
        Err(e) => {
            tracing::warn!("⚠️ 难度配比加载失败，使用默认配比: {}", e);
            InterviewMix::default()
        }
    }
}

async fn try_load_interview_mix(toml_file_path: &Path) -> AppResult<Option<InterviewMix>> {
    let path_str = toml_file_path.display().to_string();

    if !fs::try_exists(toml_file_path).await.unwrap_or(false) {
        return Ok(None);
    }

    let content = fs::read_to_string(toml_file_path)
        .await
        .map_err(|e| AppError::file_read_failed(&path_str, e))?;

    let file: InterviewMixFile =
        toml::from_str(&content).map_err(|source| FileError::TomlParseFailed {
            path: path_str,
            source,
        })?;

    Ok(Some(file.into()))
}
