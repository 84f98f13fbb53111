pub mod prompt;
pub mod question_generator;
pub mod response_parser;

pub use prompt::{PromptTemplate, QUIZ_PROMPT};
pub use question_generator::QuestionGenerator;
pub use response_parser::ResponseParser;
