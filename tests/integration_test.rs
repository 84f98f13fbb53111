use async_trait::async_trait;
use quiz_gen::error::{AttemptError, LlmError};
use quiz_gen::services::QUIZ_PROMPT;
use quiz_gen::{
    Config, GenerationError, GenerationRequest, LlmClient, ModelClient, ModelResponse,
    PromptTemplate, QuestionGenerator, QuizSession,
};
use std::sync::atomic::{AtomicUsize, Ordering};

/// 前 `failures` 次调用失败，之后返回合法题目
struct FlakyModel {
    failures: usize,
    calls: AtomicUsize,
}

impl FlakyModel {
    fn new(failures: usize) -> Self {
        Self {
            failures,
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ModelClient for FlakyModel {
    fn model_name(&self) -> &str {
        "flaky"
    }

    async fn generate_content(&self, prompt: &str) -> Result<ModelResponse, LlmError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if n < self.failures {
            return Ok(ModelResponse::new("I'm sorry, I can't produce JSON today."));
        }
        let subject = prompt
            .lines()
            .find_map(|line| line.strip_prefix("Subject: "))
            .unwrap_or("unknown");
        Ok(ModelResponse::new(format!(
            "Here you go:\n```json\n{{\"question\": \"Which one is about {}?\", \"choices\": [\"w\", \"x\", \"y\", \"z\"], \"correct_index\": 3}}\n```",
            subject
        )))
    }
}

fn generator(model: FlakyModel) -> QuestionGenerator<FlakyModel> {
    QuestionGenerator::new(model, PromptTemplate::new(QUIZ_PROMPT).unwrap()).unwrap()
}

#[test]
fn test_generate_after_two_failures() {
    let gen = generator(FlakyModel::new(2));

    let question = tokio_test::block_on(gen.generate_question("astronomy", "medium", 3)).unwrap();

    assert_eq!(gen.client().calls(), 3);
    assert_eq!(question.text(), "Which one is about astronomy?");
    assert_eq!(question.correct_choice(), Some("z"));
}

#[test]
fn test_exhausted_keeps_last_raw_response() {
    let gen = generator(FlakyModel::new(usize::MAX));

    let err = tokio_test::block_on(gen.generate(&GenerationRequest::new("astronomy").with_retries(4)))
        .unwrap_err();

    assert_eq!(gen.client().calls(), 4);
    assert_eq!(err.raw_response(), "I'm sorry, I can't produce JSON today.");
    assert!(matches!(
        err,
        GenerationError::Exhausted {
            retries: 4,
            last_error: AttemptError::Parse(_),
            ..
        }
    ));
}

#[test]
fn test_sequential_questions_fill_a_session() {
    let gen = generator(FlakyModel::new(0));
    let mut session = QuizSession::new("astronomy", 3);

    for _ in 0..3 {
        let question = tokio_test::block_on(gen.generate_question("astronomy", "easy", 3)).unwrap();
        assert!(session.push_question(question));
        assert!(session.answer_current(3));
        session.go_forward();
    }

    assert_eq!(gen.client().calls(), 3);
    assert_eq!(session.score().correct, 3);
    assert_eq!(session.score().percentage(), 100.0);
}

/// 真实 API 出题测试
///
/// 运行方式：
/// ```bash
/// LLM_API_KEY=... cargo test test_generate_question_live -- --ignored --nocapture
/// ```
#[tokio::test]
#[ignore]
async fn test_generate_question_live() {
    quiz_gen::utils::logging::init(true);

    let config = Config::load().expect("加载配置失败");
    let gen = QuestionGenerator::new(LlmClient::new(&config), config.prompt().unwrap()).unwrap();

    let question = gen
        .generate_question("Rust programming", &config.difficulty, config.max_retries)
        .await
        .expect("出题失败");

    println!("{:#?}", question);
    assert_eq!(question.choices().len(), 4);
}
