/// LLM API 客户端
///
/// 封装与生成模型服务的交互。出题核心只依赖 `ModelClient` 能力，
/// 具体使用 `async-openai` 对接兼容 OpenAI API 的服务（如 Gemini 的兼容端点）。
use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::LlmError;

/// 模型单次调用的结果
///
/// `text` 为 None 与空字符串等价，都视为模型没有给出内容。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelResponse {
    pub text: Option<String>,
}

impl ModelResponse {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    /// 取出文本，缺失时为空字符串
    pub fn into_text(self) -> String {
        self.text.unwrap_or_default()
    }
}

/// "把提示词发给模型并拿回文本" 的能力
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// 模型标识，用于日志和错误信息
    fn model_name(&self) -> &str;

    /// 发送提示词，传输层失败（网络、鉴权、配额）返回 `LlmError`
    async fn generate_content(&self, prompt: &str) -> Result<ModelResponse, LlmError>;
}

/// 兼容 OpenAI API 的 LLM 客户端
///
/// 进程启动时构造一次，之后只读复用。
pub struct LlmClient {
    client: Client<OpenAIConfig>,
    model_name: String,
    temperature: f32,
    max_tokens: u32,
}

impl LlmClient {
    /// 创建新的 LLM 客户端
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        Self {
            client: Client::with_config(openai_config),
            model_name: config.llm_model_name.clone(),
            temperature: config.llm_temperature,
            max_tokens: config.llm_max_tokens,
        }
    }
}

#[async_trait]
impl ModelClient for LlmClient {
    fn model_name(&self) -> &str {
        &self.model_name
    }

    async fn generate_content(&self, prompt: &str) -> Result<ModelResponse, LlmError> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("提示词长度: {} 字符", prompt.len());

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()
            .map_err(|e| LlmError::api_call_failed(&self.model_name, e))?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(vec![ChatCompletionRequestMessage::User(user_msg)])
            .temperature(self.temperature)
            .max_tokens(self.max_tokens)
            .build()
            .map_err(|e| LlmError::api_call_failed(&self.model_name, e))?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            LlmError::api_call_failed(&self.model_name, e)
        })?;

        debug!("LLM API 调用成功");

        let text = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content);

        if text.is_none() {
            debug!("LLM 返回内容为空");
        }

        Ok(ModelResponse { text })
    }
}
