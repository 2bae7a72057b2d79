pub mod past_questions_repository;

pub use past_questions_repository::{PastQuestionsRepository, PgPastQuestionsRepository};
