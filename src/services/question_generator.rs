//! 出题服务 - 业务能力层
//!
//! 每次调用只生成一道题：渲染提示词 → 调用模型 → 解析校验。
//! 任何一步失败都算这一次尝试失败，在重试预算内重新走完整流程；
//! 预算用尽后返回 `GenerationError::Exhausted`，带上最后一次的错误和原始输出。

use tracing::{debug, info, warn};

use crate::clients::ModelClient;
use crate::error::{AttemptError, GenerationError};
use crate::models::{GenerationRequest, Question};
use crate::services::prompt::PromptTemplate;
use crate::services::response_parser::ResponseParser;
use crate::utils::logging::truncate_text;

/// 单次尝试失败：原因 + 这次拿到的原始文本
#[derive(Debug)]
struct AttemptFailure {
    error: AttemptError,
    raw_response: String,
}

/// 出题器
///
/// 持有注入的模型客户端、提示词模板和解析器，两次调用之间不共享可变状态。
pub struct QuestionGenerator<C> {
    client: C,
    prompt: PromptTemplate,
    parser: ResponseParser,
}

impl<C: ModelClient> QuestionGenerator<C> {
    pub fn new(client: C, prompt: PromptTemplate) -> Result<Self, regex::Error> {
        Ok(Self {
            client,
            prompt,
            parser: ResponseParser::new()?,
        })
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// 按学科、难度、重试次数生成一道题
    pub async fn generate_question(
        &self,
        subject: &str,
        difficulty: &str,
        retries: u32,
    ) -> Result<Question, GenerationError> {
        let request = GenerationRequest::new(subject)
            .with_difficulty(difficulty)
            .with_retries(retries);
        self.generate(&request).await
    }

    /// 生成一道题
    ///
    /// 状态：Attempting(n) → 成功则结束；失败且 n < retries 进入 Attempting(n+1)；
    /// 失败且 n == retries 返回错误。尝试之间不等待。
    pub async fn generate(&self, request: &GenerationRequest) -> Result<Question, GenerationError> {
        let retries = request.retries();
        let prompt = self.prompt.render(&request.subject, &request.difficulty);
        debug!("出题提示词:\n{}", prompt);

        let mut attempt = 1;
        loop {
            match self.attempt(&prompt).await {
                Ok(question) => {
                    info!(
                        "✓ 第 {} 次尝试生成题目成功 (学科: {})",
                        attempt, request.subject
                    );
                    return Ok(question);
                }
                Err(failure) if attempt >= retries => {
                    return Err(GenerationError::Exhausted {
                        retries,
                        last_error: failure.error,
                        raw_response: failure.raw_response,
                    });
                }
                Err(failure) => {
                    warn!(
                        "模型输出无效 (第 {}/{} 次尝试): {}，重试中...",
                        attempt, retries, failure.error
                    );
                    attempt += 1;
                }
            }
        }
    }

    /// 一次完整的 "调用模型 → 解析校验"
    async fn attempt(&self, prompt: &str) -> Result<Question, AttemptFailure> {
        let raw_response = match self.client.generate_content(prompt).await {
            Ok(response) => response.into_text().trim().to_string(),
            Err(e) => {
                return Err(AttemptFailure {
                    error: e.into(),
                    raw_response: String::new(),
                })
            }
        };
        debug!(
            "模型 {} 原始输出: {}",
            self.client.model_name(),
            truncate_text(&raw_response, 200)
        );

        self.parser.parse(&raw_response).map_err(|e| AttemptFailure {
            error: e.into(),
            raw_response,
        })
    }
}
