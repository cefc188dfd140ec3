//! 面试流程 - 流程层
//!
//! 核心职责：定义"一场面试"的状态机
//!
//! 流程顺序：
//! 1. start → 出第一题
//! 2. submit_answer → 评分 → 答对或用完两次机会则指针前移
//! 3. advance_to_next_question → 出下一题，或进入总结
//! 4. conclude → 告别语 + 总结报告
//!
//! 指针前移和出下一题是两个独立的调用，界面可以在中间插入"Next Question"按钮。

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::models::{Playlist, Transcript};
use crate::services::prompts::{self, CONCLUSION_MESSAGE, OUT_OF_TURN_MESSAGE};
use crate::services::GradingService;
use crate::utils::logging::truncate_text;
use crate::workflow::interview_phase::{InterviewAction, InterviewPhase};

/// 每道题最多的作答次数
pub const MAX_ATTEMPTS_PER_QUESTION: u32 = 2;

/// 一次作答的反馈
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerFeedback {
    pub content: String,
    pub is_correct: bool,
    pub attempts: u32,
}

/// 一场面试
///
/// - 持有题单、对话记录、题目指针和作答次数
/// - 单写者：所有操作都通过 `&mut self` 串行执行
/// - 每次操作最多发起一次 LLM 调用
pub struct InterviewSession {
    phase: InterviewPhase,
    playlist: Playlist,
    playlist_index: usize,
    attempts_on_current: u32,
    transcript: Transcript,
    grader: GradingService,
}

impl InterviewSession {
    /// 创建新的面试
    pub fn new(playlist: Playlist, grader: GradingService) -> Self {
        info!("--- 面试题单已就绪，共 {} 道题 ---", playlist.len());
        Self {
            phase: InterviewPhase::Introduction,
            playlist,
            playlist_index: 0,
            attempts_on_current: 0,
            transcript: Transcript::new(),
            grader,
        }
    }

    pub fn phase(&self) -> InterviewPhase {
        self.phase
    }

    pub fn playlist_index(&self) -> usize {
        self.playlist_index
    }

    pub fn attempts_on_current(&self) -> u32 {
        self.attempts_on_current
    }

    pub fn total_questions(&self) -> usize {
        self.playlist.len()
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// 当前阶段允许的操作
    pub fn available_actions(&self) -> &'static [InterviewAction] {
        self.phase.available_actions()
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_terminal()
    }

    /// 开场欢迎语（不写入对话记录）
    pub fn welcome_message(&self) -> String {
        prompts::welcome_message(self.playlist.len())
    }

    /// 开始面试并出第一题
    ///
    /// 只在 INTRODUCTION 阶段有效，其他阶段调用不做任何事。
    pub async fn start(&mut self) {
        if !self.phase.allows(InterviewAction::Start) {
            warn!("面试已在 {} 阶段，忽略重复的开始请求", self.phase);
            return;
        }

        info!("🚀 面试开始");
        self.phase = InterviewPhase::AskingQuestion;
        self.advance_to_next_question().await;
    }

    /// 出下一题；题单用完时进入总结
    ///
    /// 只在 ASKING_QUESTION 阶段有效，其他阶段调用不做任何事。
    pub async fn advance_to_next_question(&mut self) {
        if !self.phase.allows(InterviewAction::NextQuestion) {
            warn!("当前阶段 {} 不能出下一题，忽略", self.phase);
            return;
        }

        let total = self.playlist.len();
        if self.playlist_index >= total {
            self.conclude().await;
            return;
        }

        self.attempts_on_current = 0;
        if let Some(question) = self.playlist.get(self.playlist_index) {
            debug!(
                "出题 {}/{} ({}): {}",
                self.playlist_index + 1,
                total,
                question.difficulty,
                truncate_text(&question.question_text, 80)
            );
            self.transcript.push_assistant(prompts::question_prompt(
                self.playlist_index,
                total,
                &question.question_text,
            ));
        }
        self.phase = InterviewPhase::Evaluating;
    }

    /// 提交一次作答
    ///
    /// 不在作答阶段时只返回提示，不评分、不改变状态。
    pub async fn submit_answer(&mut self, text: &str) -> AnswerFeedback {
        if self.phase.is_terminal() {
            debug!("面试已结束，忽略作答");
            return self.out_of_turn_feedback();
        }

        self.transcript.push_user(text);

        if self.phase != InterviewPhase::Evaluating {
            debug!("当前阶段 {} 不接受作答", self.phase);
            return self.out_of_turn_feedback();
        }

        let Some(question) = self.playlist.get(self.playlist_index).cloned() else {
            warn!(
                "题目指针 {} 超出题单长度 {}，等待进入下一步",
                self.playlist_index,
                self.playlist.len()
            );
            self.phase = InterviewPhase::AskingQuestion;
            return self.out_of_turn_feedback();
        };

        self.attempts_on_current += 1;

        let verdict = self
            .grader
            .grade(&question.question_text, text, &question.correct_formula)
            .await;

        self.transcript.push_assistant(verdict.explanation.clone());

        info!(
            "[题目 {}/{}] 第 {} 次作答: {}",
            self.playlist_index + 1,
            self.playlist.len(),
            self.attempts_on_current,
            if verdict.is_correct { "✓ 正确" } else { "✗ 不正确" }
        );

        if verdict.is_correct || self.attempts_on_current >= MAX_ATTEMPTS_PER_QUESTION {
            self.playlist_index += 1;
            self.phase = InterviewPhase::AskingQuestion;
        }

        AnswerFeedback {
            content: verdict.explanation,
            is_correct: verdict.is_correct,
            attempts: self.attempts_on_current,
        }
    }

    /// 结束面试：追加告别语和总结报告
    ///
    /// 总结是尽力而为的，失败时内容为致歉文案。
    pub async fn conclude(&mut self) {
        if self.phase.is_terminal() {
            return;
        }

        info!("🏁 面试结束，共完成 {} 道题", self.playlist_index);
        self.phase = InterviewPhase::Conclusion;
        self.transcript.push_assistant(CONCLUSION_MESSAGE);

        let summary = self.grader.summarize(&self.transcript).await;
        self.transcript.push_assistant(prompts::summary_turn(&summary));
    }

    fn out_of_turn_feedback(&self) -> AnswerFeedback {
        AnswerFeedback {
            content: OUT_OF_TURN_MESSAGE.to_string(),
            is_correct: false,
            attempts: self.attempts_on_current,
        }
    }
}
