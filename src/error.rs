use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// LLM 服务错误
    #[error("LLM错误: {0}")]
    Llm(#[from] LlmError),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 必需的凭证缺失
    #[error("缺少 API 凭证: 请设置环境变量 {var_name}")]
    MissingCredential { var_name: String },
    /// 配置值不合法
    #[error("配置项 {field} 不合法: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 文件不存在
    #[error("文件不存在: {path}")]
    NotFound { path: String },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// JSON 解析失败
    #[error("JSON解析失败 ({path}): {source}")]
    JsonParseFailed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// LLM 服务错误
///
/// 评分路径上的所有错误都会在 `GradingService` 内部被兜底成 `Verdict`，
/// 不会越过状态机边界。
#[derive(Debug, Error)]
pub enum LlmError {
    /// 构建请求失败
    #[error("构建 LLM 请求失败 (模型: {model}): {message}")]
    RequestBuildFailed { model: String, message: String },
    /// 网络请求失败（连接失败等）
    #[error("LLM API请求失败 ({endpoint}): {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 请求超时
    #[error("LLM API请求超时 ({endpoint}), 超时时间: {timeout_secs}秒")]
    Timeout { endpoint: String, timeout_secs: u64 },
    /// 返回非 2xx 状态码
    #[error("LLM API返回错误状态 ({endpoint}): status={status}, body={body}")]
    BadStatus {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// 返回结构缺少 choices / message.content
    #[error("LLM返回结构异常 (模型: {model}): {detail}")]
    UnexpectedResponse { model: String, detail: String },
}

impl LlmError {
    /// 是否属于"返回结构异常"（而非网络层失败）
    pub fn is_unexpected_response(&self) -> bool {
        matches!(self, LlmError::UnexpectedResponse { .. })
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建缺少凭证错误
    pub fn missing_credential(var_name: impl Into<String>) -> Self {
        AppError::Config(ConfigError::MissingCredential {
            var_name: var_name.into(),
        })
    }

    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
