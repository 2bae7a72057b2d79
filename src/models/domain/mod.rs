pub mod generation_outcome;
pub mod quiz_question;
pub mod quiz_request;
pub use generation_outcome::GenerationOutcome;
pub use quiz_question::QuizQuestion;
pub use quiz_request::{Difficulty, QuizRequest, UserId};
