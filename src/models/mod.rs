pub mod question;
pub mod request;

pub use question::Question;
pub use request::{GenerationRequest, DEFAULT_DIFFICULTY, DEFAULT_RETRIES};
