use crate::error::{AppError, AppResult, FileError};
use crate::models::question::{Difficulty, Question, QuestionBank, QuestionRecord};
use std::collections::BTreeMap;
use std::path::Path;
use tokio::fs;

/// 从 JSON 文件加载题库
///
/// 文件缺失或内容损坏时退化为空题库（面试会直接进入总结），不会中断程序。
pub async fn load_question_bank(path: &Path) -> QuestionBank {
    match try_load_question_bank(path).await {
        Ok(bank) => {
            tracing::info!(
                "成功加载题库 {}，共 {} 道题",
                path.display(),
                bank.total()
            );
            bank
        }
        Err(e) => {
            tracing::warn!("⚠️ 题库加载失败，使用空题库: {}", e);
            QuestionBank::empty()
        }
    }
}

async fn try_load_question_bank(path: &Path) -> AppResult<QuestionBank> {
    let path_str = path.display().to_string();

    if !fs::try_exists(path).await.unwrap_or(false) {
        return Err(FileError::NotFound { path: path_str }.into());
    }

    let content = fs::read_to_string(path)
        .await
        .map_err(|e| AppError::file_read_failed(&path_str, e))?;

    parse_question_bank(&content).map_err(|source| {
        FileError::JsonParseFailed {
            path: path_str,
            source,
        }
        .into()
    })
}

/// 解析题库 JSON 文本
///
/// 顶层对象的键为难度（easy / medium / hard），未知难度会被跳过。
pub fn parse_question_bank(content: &str) -> Result<QuestionBank, serde_json::Error> {
    let raw: BTreeMap<String, Vec<QuestionRecord>> = serde_json::from_str(content)?;

    let mut bank = QuestionBank::empty();
    for (key, records) in raw {
        let Some(difficulty) = Difficulty::from_key(&key) else {
            tracing::warn!("跳过未知难度 '{}' 下的 {} 道题", key, records.len());
            continue;
        };

        let questions = records
            .into_iter()
            .map(|r| Question::new(r.question_text, r.correct_formula, difficulty))
            .collect();
        bank = bank.with_pool(difficulty, questions);
    }

    Ok(bank)
}
