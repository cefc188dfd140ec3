//! 流程层（Workflow Layer）
//!
//! 定义"一场面试"的状态机：阶段、可用操作、出题、评分、总结。

pub mod interview_phase;
pub mod interview_session;

pub use interview_phase::{InterviewAction, InterviewPhase};
pub use interview_session::{AnswerFeedback, InterviewSession, MAX_ATTEMPTS_PER_QUESTION};
