//! # Quiz Gen
//!
//! 调用生成式模型出选择题，并在终端里完成一次测验
//!
//! ## 架构设计
//!
//! ### ① 客户端层（Clients）
//! - `clients/` - 持有模型服务连接，只暴露"发提示词、拿文本"的能力
//! - `ModelClient` - 出题核心唯一依赖的能力接口，测试中可替换
//! - `LlmClient` - 基于 async-openai 的实现
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，每次只处理一道题
//! - `ResponseParser` - 从模型原始输出中提取并校验题目 JSON
//! - `PromptTemplate` - 出题提示词模板
//! - `QuestionGenerator` - 调用模型 → 解析 → 有限次重试
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一次测验"的完整流程
//! - `QuizSession` - 作答与计分状态
//! - `TerminalQuiz` - 终端交互（询问 → 逐题出题 → 作答 → 得分）
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{LlmClient, ModelClient, ModelResponse};
pub use config::Config;
pub use error::{AppError, AppResult, GenerationError, ParseError};
pub use models::{GenerationRequest, Question};
pub use services::{PromptTemplate, QuestionGenerator, ResponseParser};
pub use workflow::{QuizSession, Score, TerminalQuiz};
