//! 面试阶段
//!
//! 面试阶段是一个封闭的枚举，界面通过 `available_actions()` 查询当前可做的操作，
//! 不再自己维护额外的布尔状态

use serde::{Deserialize, Serialize};

/// 面试阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InterviewPhase {
    /// 尚未开始
    Introduction,
    /// 等待界面请求下一题
    AskingQuestion,
    /// 已出题，等待候选人作答
    Evaluating,
    /// 面试结束（终态）
    Conclusion,
}

/// 界面可以触发的操作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewAction {
    /// "Start Interview"
    Start,
    /// 提交一次作答
    SubmitAnswer,
    /// "Next Question"
    NextQuestion,
    /// 结束后重新开始（由界面新建一场面试）
    Restart,
}

impl InterviewPhase {
    /// 当前阶段允许的操作
    pub fn available_actions(self) -> &'static [InterviewAction] {
        match self {
            InterviewPhase::Introduction => &[InterviewAction::Start],
            InterviewPhase::AskingQuestion => &[InterviewAction::NextQuestion],
            InterviewPhase::Evaluating => &[InterviewAction::SubmitAnswer],
            InterviewPhase::Conclusion => &[InterviewAction::Restart],
        }
    }

    pub fn allows(self, action: InterviewAction) -> bool {
        self.available_actions().contains(&action)
    }

    pub fn is_terminal(self) -> bool {
        self == InterviewPhase::Conclusion
    }

    pub fn as_str(self) -> &'static str {
        match self {
            InterviewPhase::Introduction => "INTRODUCTION",
            InterviewPhase::AskingQuestion => "ASKING_QUESTION",
            InterviewPhase::Evaluating => "EVALUATING",
            InterviewPhase::Conclusion => "CONCLUSION",
        }
    }
}

impl std::fmt::Display for InterviewPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
