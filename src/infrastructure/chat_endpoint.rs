//! Chat 端点 - 基础设施层
//!
//! 持有唯一的 HTTP 客户端，只暴露"发送一组消息、拿回一段文本"的能力
//!
//! ## 技术栈
//! - 使用 `async-openai` 的请求类型构建 chat-completions 请求体
//! - 使用 `reqwest` 发送，超时由客户端统一控制
//! - 不做任何自动重试：失败直接返回给上层，由面试本身的两次作答机会兜底

use async_openai::types::chat::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequest,
    CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::EndpointConfig;
use crate::error::{AppError, AppResult, ConfigError, LlmError};
use crate::models::{ChatMessage, ChatRole};

/// chat-completions 能力
///
/// 评分服务只依赖这个 trait，测试中可以替换成脚本化的实现。
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    /// 当前使用的模型
    fn model(&self) -> &str;

    /// 发送消息并返回模型输出的原始文本
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError>;
}

/// 远程 chat-completions 端点
///
/// 职责：
/// - 持有 HTTP 客户端和鉴权信息
/// - 暴露 complete() 能力
/// - 不认识 Question / Verdict
/// - 不处理面试流程
pub struct ChatEndpoint {
    http: reqwest::Client,
    config: EndpointConfig,
}

impl ChatEndpoint {
    /// 创建新的端点
    ///
    /// 缺少凭证或地址时构造失败。
    pub fn new(config: EndpointConfig) -> AppResult<Self> {
        if config.auth_token.trim().is_empty() {
            return Err(AppError::missing_credential("LLM_API_KEY"));
        }
        if config.endpoint_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "endpoint_url".to_string(),
                reason: "不能为空".to_string(),
            }
            .into());
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ConfigError::InvalidValue {
                field: "http_client".to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self { http, config })
    }

    /// 构建请求体
    fn build_request(
        &self,
        messages: &[ChatMessage],
    ) -> Result<CreateChatCompletionRequest, LlmError> {
        let build_failed = |e: async_openai::error::OpenAIError| LlmError::RequestBuildFailed {
            model: self.config.model_id.clone(),
            message: e.to_string(),
        };

        let mut request_messages = Vec::with_capacity(messages.len());
        for message in messages {
            let built = match message.role {
                ChatRole::System => ChatCompletionRequestMessage::System(
                    ChatCompletionRequestSystemMessageArgs::default()
                        .content(message.content.as_str())
                        .build()
                        .map_err(build_failed)?,
                ),
                ChatRole::User => ChatCompletionRequestMessage::User(
                    ChatCompletionRequestUserMessageArgs::default()
                        .content(message.content.as_str())
                        .build()
                        .map_err(build_failed)?,
                ),
            };
            request_messages.push(built);
        }

        CreateChatCompletionRequestArgs::default()
            .model(&self.config.model_id)
            .messages(request_messages)
            .temperature(self.config.temperature)
            .max_tokens(self.config.max_tokens)
            .build()
            .map_err(build_failed)
    }

    fn transport_error(&self, e: reqwest::Error) -> LlmError {
        if e.is_timeout() {
            LlmError::Timeout {
                endpoint: self.config.endpoint_url.clone(),
                timeout_secs: self.config.timeout.as_secs(),
            }
        } else {
            LlmError::Transport {
                endpoint: self.config.endpoint_url.clone(),
                source: Box::new(e),
            }
        }
    }
}

#[async_trait]
impl ChatCompletion for ChatEndpoint {
    fn model(&self) -> &str {
        &self.config.model_id
    }

    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        debug!("调用 LLM API，模型: {}", self.config.model_id);
        debug!("消息数量: {}", messages.len());

        let request = self.build_request(messages)?;

        let response = self
            .http
            .post(&self.config.endpoint_url)
            .bearer_auth(&self.config.auth_token)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!("LLM API 调用失败: {}", e);
                self.transport_error(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("LLM API 返回错误状态: {}", status);
            return Err(LlmError::BadStatus {
                endpoint: self.config.endpoint_url.clone(),
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e))?;

        let content = extract_completion_content(&bytes).map_err(|detail| {
            warn!("LLM 返回结构异常: {}", detail);
            LlmError::UnexpectedResponse {
                model: self.config.model_id.clone(),
                detail,
            }
        })?;

        debug!("LLM API 调用成功");

        Ok(content.trim().to_string())
    }
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: Option<CompletionMessage>,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

/// 从响应体中取出 `choices[0].message.content`
fn extract_completion_content(body: &[u8]) -> Result<String, String> {
    let parsed: CompletionResponse =
        serde_json::from_slice(body).map_err(|e| format!("响应不是合法的 JSON 对象: {}", e))?;

    let choice = parsed
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| "choices 为空".to_string())?;

    choice
        .message
        .and_then(|m| m.content)
        .ok_or_else(|| "choices[0].message.content 缺失".to_string())
}
