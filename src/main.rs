use anyhow::{Context, Result};
use quiz_gen::utils::logging;
use quiz_gen::{AppError, Config, LlmClient, QuestionGenerator, TerminalQuiz};
use tracing::error;

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::load().context("加载配置失败")?;

    // 初始化日志
    logging::init(config.verbose_logging);
    logging::log_startup(
        &config.llm_model_name,
        &config.difficulty,
        config.max_retries,
    );

    // 模型客户端只构造一次
    let generator = QuestionGenerator::new(LlmClient::new(&config), config.prompt()?)
        .context("初始化出题器失败")?;
    let quiz = TerminalQuiz::new(&generator, &config);

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();

    quiz.run(&mut input, &mut output)
        .await
        .map(|_| ())
        .map_err(report_failure)
}

/// 出题失败时先给用户一段可读的提示，再把错误交回 main 返回
fn report_failure(err: AppError) -> anyhow::Error {
    match err {
        AppError::Generation(e) => {
            error!("出题失败，测验终止");
            eprintln!(
                "\n无法生成题目，请检查网络连接和 API Key。\n\n技术细节: {}",
                e
            );
            anyhow::Error::new(e).context("出题失败，测验终止")
        }
        e => e.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_gen::error::{AttemptError, GenerationError, ParseError};

    #[test]
    fn test_generation_failure_becomes_error_return() {
        let err = report_failure(AppError::Generation(GenerationError::Exhausted {
            retries: 3,
            last_error: AttemptError::Parse(ParseError::EmptyResponse),
            raw_response: String::new(),
        }));
        assert_eq!(err.to_string(), "出题失败，测验终止");
        assert!(err.downcast_ref::<GenerationError>().is_some());
    }

    #[test]
    fn test_io_error_passes_through() {
        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "输入已结束");
        let err = report_failure(AppError::Io(io));
        assert!(matches!(
            err.downcast_ref::<AppError>(),
            Some(AppError::Io(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof
        ));
    }
}
