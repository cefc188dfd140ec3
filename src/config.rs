use std::time::Duration;

use tracing::warn;

use crate::error::{AppError, AppResult, ConfigError};

/// 兼容 Hugging Face 的凭证变量名
const FALLBACK_TOKEN_VAR: &str = "HF_TOKEN";
const TOKEN_VAR: &str = "LLM_API_KEY";

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    // --- LLM 配置 ---
    pub llm_api_key: String,
    /// chat-completions 完整地址
    pub llm_api_url: String,
    pub llm_model_name: String,
    /// 单次请求超时（秒）
    pub llm_timeout_secs: u64,
    pub llm_temperature: f32,
    pub llm_max_tokens: u32,
    // --- 面试配置 ---
    /// 题库 JSON 文件
    pub question_bank_path: String,
    /// 题目难度配比（TOML，可选）
    pub interview_mix_path: String,
    /// 面试记录输出文件
    pub output_log_file: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm_api_key: String::new(),
            llm_api_url: "https://api-inference.huggingface.co/v1/chat/completions".to_string(),
            llm_model_name: "zai-org/GLM-4.5:novita".to_string(),
            llm_timeout_secs: 60,
            llm_temperature: 0.1,
            llm_max_tokens: 1024,
            question_bank_path: "question_bank.json".to_string(),
            interview_mix_path: "interview.toml".to_string(),
            output_log_file: "interview_log.txt".to_string(),
            verbose_logging: false,
        }
    }
}

/// 传给 `ChatEndpoint` 的端点配置
#[derive(Clone, Debug)]
pub struct EndpointConfig {
    pub endpoint_url: String,
    pub model_id: String,
    pub auth_token: String,
    pub timeout: Duration,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 缺少 API 凭证是唯一允许让进程启动失败的情况。
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源加载配置（便于测试）
    ///
    /// 非凭证项解析失败时给出警告并沿用默认值。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let default = Self::default();

        let llm_api_key = lookup(TOKEN_VAR)
            .or_else(|| lookup(FALLBACK_TOKEN_VAR))
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AppError::missing_credential(TOKEN_VAR))?;

        Ok(Self {
            llm_api_key,
            llm_api_url: lookup("LLM_API_URL").unwrap_or(default.llm_api_url),
            llm_model_name: lookup("LLM_MODEL_NAME").unwrap_or(default.llm_model_name),
            llm_timeout_secs: parse_var(
                &lookup,
                "LLM_TIMEOUT_SECS",
                "u64",
                default.llm_timeout_secs,
            ),
            llm_temperature: parse_var(
                &lookup,
                "LLM_TEMPERATURE",
                "f32",
                default.llm_temperature,
            ),
            llm_max_tokens: parse_var(&lookup, "LLM_MAX_TOKENS", "u32", default.llm_max_tokens),
            question_bank_path: lookup("QUESTION_BANK_PATH").unwrap_or(default.question_bank_path),
            interview_mix_path: lookup("INTERVIEW_MIX_PATH").unwrap_or(default.interview_mix_path),
            output_log_file: lookup("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            verbose_logging: parse_with(
                &lookup,
                "VERBOSE_LOGGING",
                "bool",
                default.verbose_logging,
                parse_flag,
            ),
        })
    }

    /// 生成端点配置
    pub fn endpoint(&self) -> EndpointConfig {
        EndpointConfig {
            endpoint_url: self.llm_api_url.clone(),
            model_id: self.llm_model_name.clone(),
            auth_token: self.llm_api_key.clone(),
            timeout: Duration::from_secs(self.llm_timeout_secs),
            temperature: self.llm_temperature,
            max_tokens: self.llm_max_tokens,
        }
    }
}

/// 解析开关类环境变量（true / false / 1 / 0，忽略大小写）
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var_name: &str,
    expected_type: &str,
    default: T,
) -> T {
    parse_with(lookup, var_name, expected_type, default, |v| v.trim().parse().ok())
}

fn parse_with<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    var_name: &str,
    expected_type: &str,
    default: T,
    parse: impl Fn(&str) -> Option<T>,
) -> T {
    let Some(value) = lookup(var_name) else {
        return default;
    };

    match parse(&value) {
        Some(parsed) => parsed,
        None => {
            let err = ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            };
            warn!("⚠️ {}，使用默认值", err);
            default
        }
    }
}
