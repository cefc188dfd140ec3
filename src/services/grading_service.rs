//! 评分服务 - 业务能力层
//!
//! 只负责"评判一次作答"和"生成总结"能力，不关心流程
//!
//! 任何失败（网络、超时、非 2xx、结构异常、无法解析）都会被兜底成
//! 一个"不正确 + 致歉说明"的 `Verdict`，不会向上抛出。

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::infrastructure::ChatCompletion;
use crate::models::verdict::{CONNECTIVITY_FAILURE_MESSAGE, UNEXPECTED_RESPONSE_MESSAGE};
use crate::models::{ParsedVerdict, Transcript, Verdict};
use crate::services::prompts;
use crate::services::response_extractor::{parse_model_output, strip_reasoning};
use crate::utils::logging::truncate_text;

/// 评分服务
///
/// 职责：
/// - 调用 LLM 判断单次作答是否正确
/// - 调用 LLM 生成整场面试的总结
/// - 不出现 playlist_index / attempts
/// - 不关心流程顺序
#[derive(Clone)]
pub struct GradingService {
    backend: Arc<dyn ChatCompletion>,
    verbose_logging: bool,
}

impl GradingService {
    /// 创建新的评分服务
    pub fn new(backend: Arc<dyn ChatCompletion>) -> Self {
        Self {
            backend,
            verbose_logging: false,
        }
    }

    /// 是否在 info 级别打印模型原始输出
    pub fn with_verbose_logging(mut self, verbose: bool) -> Self {
        self.verbose_logging = verbose;
        self
    }

    /// 评判一次作答
    ///
    /// # 参数
    /// - `question`: 题目文本
    /// - `candidate_answer`: 候选人的回答
    /// - `reference_answer`: 参考答案
    ///
    /// # 返回
    /// 总是返回一个可用的 `Verdict`
    pub async fn grade(
        &self,
        question: &str,
        candidate_answer: &str,
        reference_answer: &str,
    ) -> Verdict {
        debug!(
            "开始评分，模型: {}, 作答: {}",
            self.backend.model(),
            truncate_text(candidate_answer, 80)
        );

        let messages = prompts::evaluation_messages(question, candidate_answer, reference_answer);

        let raw = match self.backend.complete(&messages).await {
            Ok(raw) => raw,
            Err(e) if e.is_unexpected_response() => {
                warn!("⚠️ 评分返回结构异常: {}", e);
                return Verdict::unexpected_response();
            }
            Err(e) => {
                warn!("⚠️ 评分请求失败: {}", e);
                return Verdict::connectivity_failure();
            }
        };

        self.log_raw_output(&raw);

        let parsed = parse_model_output(&raw);
        if let ParsedVerdict::ExtractionFailure { reason } = &parsed {
            warn!("⚠️ 无法解析评分结果: {}", reason);
        }

        let verdict = parsed.into_verdict();
        debug!("✓ 评分完成: is_correct={}", verdict.is_correct);
        verdict
    }

    /// 生成整场面试的总结
    ///
    /// 尽力而为：失败时返回致歉文案作为总结内容。
    pub async fn summarize(&self, transcript: &Transcript) -> String {
        info!("📝 正在生成面试总结，对话共 {} 条", transcript.len());

        let messages = prompts::summary_messages(transcript);

        match self.backend.complete(&messages).await {
            Ok(raw) => {
                self.log_raw_output(&raw);
                strip_reasoning(&raw).to_string()
            }
            Err(e) if e.is_unexpected_response() => {
                warn!("⚠️ 总结返回结构异常: {}", e);
                UNEXPECTED_RESPONSE_MESSAGE.to_string()
            }
            Err(e) => {
                warn!("⚠️ 总结请求失败: {}", e);
                CONNECTIVITY_FAILURE_MESSAGE.to_string()
            }
        }
    }

    fn log_raw_output(&self, raw: &str) {
        if self.verbose_logging {
            info!("模型原始输出: {}", truncate_text(raw, 500));
        } else {
            debug!("模型原始输出: {}", truncate_text(raw, 500));
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::LlmError;
    use crate::models::ChatMessage;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// 脚本化的后端：按顺序返回预设结果，并记录调用次数
    pub(crate) struct ScriptedBackend {
        replies: Mutex<VecDeque<Result<String, LlmError>>>,
        calls: AtomicUsize,
        last_messages: Mutex<Vec<ChatMessage>>,
    }

    impl ScriptedBackend {
        pub(crate) fn new(replies: Vec<Result<String, LlmError>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into()),
                calls: AtomicUsize::new(0),
                last_messages: Mutex::new(Vec::new()),
            })
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub(crate) fn last_messages(&self) -> Vec<ChatMessage> {
            self.last_messages.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatCompletion for ScriptedBackend {
        fn model(&self) -> &str {
            "scripted"
        }

        async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_messages.lock().unwrap() = messages.to_vec();
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok("summary".to_string()))
        }
    }

    pub(crate) fn correct_reply(explanation: &str) -> Result<String, LlmError> {
        Ok(format!(
            "<think>looks right</think>{{\"is_correct\": true, \"explanation\": \"{}\"}}",
            explanation
        ))
    }

    pub(crate) fn wrong_reply(hint: &str) -> Result<String, LlmError> {
        Ok(format!(
            "<think>not quite</think>{{\"is_correct\": false, \"explanation\": \"{}\"}}",
            hint
        ))
    }

    pub(crate) fn transport_failure() -> Result<String, LlmError> {
        Err(LlmError::Transport {
            endpoint: "http://localhost".to_string(),
            source: Box::new(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            )),
        })
    }

    fn service(backend: &Arc<ScriptedBackend>) -> GradingService {
        GradingService::new(backend.clone())
    }

    #[test]
    fn test_grade_correct_answer() {
        let backend = ScriptedBackend::new(vec![correct_reply("Spot on!")]);
        let verdict = tokio_test::block_on(service(&backend).grade(
            "Sum A1:A10",
            "=SUM(A1:A10)",
            "=SUM(A1:A10)",
        ));
        assert_eq!(verdict, Verdict::new(true, "Spot on!"));
        assert_eq!(backend.calls(), 1);

        let sent = backend.last_messages();
        assert!(sent[1].content.contains("=SUM(A1:A10)"));
    }

    #[tokio::test]
    async fn test_transport_failure_yields_incorrect_verdict() {
        let backend = ScriptedBackend::new(vec![transport_failure()]);
        let verdict = service(&backend).grade("q", "a", "r").await;
        assert!(!verdict.is_correct);
        assert!(!verdict.explanation.is_empty());
        assert_eq!(verdict, Verdict::connectivity_failure());
    }

    #[tokio::test]
    async fn test_timeout_and_bad_status_are_connectivity_failures() {
        let backend = ScriptedBackend::new(vec![
            Err(LlmError::Timeout {
                endpoint: "e".to_string(),
                timeout_secs: 60,
            }),
            Err(LlmError::BadStatus {
                endpoint: "e".to_string(),
                status: 503,
                body: "busy".to_string(),
            }),
        ]);
        let service = service(&backend);
        assert_eq!(service.grade("q", "a", "r").await, Verdict::connectivity_failure());
        assert_eq!(service.grade("q", "a", "r").await, Verdict::connectivity_failure());
    }

    #[tokio::test]
    async fn test_unexpected_response_verdict() {
        let backend = ScriptedBackend::new(vec![Err(LlmError::UnexpectedResponse {
            model: "scripted".to_string(),
            detail: "choices 为空".to_string(),
        })]);
        let verdict = service(&backend).grade("q", "a", "r").await;
        assert_eq!(verdict, Verdict::unexpected_response());
    }

    #[tokio::test]
    async fn test_malformed_output_yields_evaluation_error() {
        let backend = ScriptedBackend::new(vec![Ok("I think it's right!".to_string())]);
        let verdict = service(&backend).grade("q", "a", "r").await;
        assert_eq!(verdict, Verdict::evaluation_error());
    }

    #[tokio::test]
    async fn test_summarize_strips_reasoning_and_keeps_braces() {
        let backend = ScriptedBackend::new(vec![Ok(
            "<think>plan</think>You used {SUM} well.".to_string()
        )]);
        let mut transcript = Transcript::new();
        transcript.push_assistant("Q");
        let summary = service(&backend).summarize(&transcript).await;
        assert_eq!(summary, "You used {SUM} well.");
    }

    #[tokio::test]
    async fn test_summarize_failure_returns_apology() {
        let backend = ScriptedBackend::new(vec![transport_failure()]);
        let summary = service(&backend).summarize(&Transcript::new()).await;
        assert_eq!(summary, CONNECTIVITY_FAILURE_MESSAGE);
    }
}
