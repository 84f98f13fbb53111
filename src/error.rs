use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 题目生成错误（重试耗尽）
    #[error("生成错误: {0}")]
    Generation(#[from] GenerationError),
    /// 终端输入输出错误
    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),
}

/// 模型输出解析错误
///
/// 每一种都只代表"这一次尝试"失败，由生成器决定是否重试。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// 模型没有返回可用文本
    #[error("模型返回内容为空")]
    EmptyResponse,
    /// 文本中没有 `{...}` 片段
    #[error("响应中未找到 JSON 对象:\n{text}")]
    NoJsonFound { text: String },
    /// 找到了 `{...}` 片段但无法解码
    #[error("JSON 解码失败: {message}")]
    MalformedJson { message: String },
    /// 解码成功但不符合题目结构
    #[error("题目结构无效: {0}")]
    Schema(SchemaViolation),
}

/// 题目结构校验失败的具体原因
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaViolation {
    #[error("顶层不是 JSON 对象")]
    NotAnObject,
    #[error("缺少字段 `{0}`")]
    MissingField(&'static str),
    #[error("字段 `{field}` 类型错误，期望 {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
    #[error("choices 必须恰好包含 4 个选项，实际为 {0} 个")]
    WrongChoiceCount(usize),
}

/// LLM 服务错误
#[derive(Debug, Error)]
pub enum LlmError {
    /// API 调用失败（网络、鉴权、配额等）
    #[error("LLM API调用失败 (模型: {model}): {source}")]
    ApiCallFailed {
        model: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// 单次生成尝试失败的原因
#[derive(Debug, Error)]
pub enum AttemptError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Transport(#[from] LlmError),
}

/// 题目生成错误
#[derive(Debug, Error)]
pub enum GenerationError {
    /// 所有尝试均失败
    #[error("尝试 {retries} 次后仍未生成有效题目。\n最后的错误: {last_error}\n原始响应:\n{raw_response}")]
    Exhausted {
        retries: u32,
        #[source]
        last_error: AttemptError,
        raw_response: String,
    },
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
    /// 必填项缺失
    #[error("缺少必填配置 {name} (环境变量: {env_hint})")]
    Missing {
        name: &'static str,
        env_hint: &'static str,
    },
    /// 取值不合法
    #[error("配置 {name} 取值不合法: {reason}")]
    InvalidValue { name: &'static str, reason: String },
    /// 提示词模板无法解析
    #[error("提示词模板无效: {0}")]
    InvalidPromptTemplate(String),
    /// 读取配置文件失败
    #[error("读取配置文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

// ========== 便捷构造函数 ==========

impl LlmError {
    /// 创建LLM API调用错误
    pub fn api_call_failed(
        model: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        LlmError::ApiCallFailed {
            model: model.into(),
            source: Box::new(source),
        }
    }
}

impl GenerationError {
    /// 生成失败时模型的最后一次原始输出
    pub fn raw_response(&self) -> &str {
        match self {
            GenerationError::Exhausted { raw_response, .. } => raw_response,
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
