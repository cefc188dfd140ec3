use serde::{Deserialize, Serialize};

/// LLM 网络失败时展示给候选人的说明
pub const CONNECTIVITY_FAILURE_MESSAGE: &str =
    "Sorry, I was unable to connect to the evaluation service.";
/// LLM 返回结构异常时的说明
pub const UNEXPECTED_RESPONSE_MESSAGE: &str =
    "Sorry, I received an unexpected response from the AI.";
/// 返回内容无法解析时的说明
pub const EVALUATION_ERROR_MESSAGE: &str = "An error occurred during evaluation. Let's proceed.";
/// explanation 为空时的默认说明
pub const DEFAULT_EXPLANATION: &str = "I've noted that.";

/// 一次作答的评判结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub is_correct: bool,
    pub explanation: String,
}

impl Verdict {
    pub fn new(is_correct: bool, explanation: impl Into<String>) -> Self {
        Self {
            is_correct,
            explanation: explanation.into(),
        }
    }

    pub fn connectivity_failure() -> Self {
        Self::new(false, CONNECTIVITY_FAILURE_MESSAGE)
    }

    pub fn unexpected_response() -> Self {
        Self::new(false, UNEXPECTED_RESPONSE_MESSAGE)
    }

    pub fn evaluation_error() -> Self {
        Self::new(false, EVALUATION_ERROR_MESSAGE)
    }
}

/// 从模型输出中解析评判结果的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedVerdict {
    /// 通过了结构校验
    Valid(Verdict),
    /// 提取或校验失败
    ExtractionFailure { reason: String },
}

impl ParsedVerdict {
    /// 失败时回退到通用的"评估出错"结果
    pub fn into_verdict(self) -> Verdict {
        match self {
            ParsedVerdict::Valid(verdict) => verdict,
            ParsedVerdict::ExtractionFailure { .. } => Verdict::evaluation_error(),
        }
    }
}
