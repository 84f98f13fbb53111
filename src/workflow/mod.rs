pub mod quiz_flow;
pub mod quiz_session;

pub use quiz_flow::TerminalQuiz;
pub use quiz_session::{QuizSession, Score};
