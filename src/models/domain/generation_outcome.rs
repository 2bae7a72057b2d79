use crate::models::domain::QuizQuestion;

/// Result of one pass through the quiz pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// The service produced a quiz.
    Generated(Vec<QuizQuestion>),
    /// The service refused the topic (`ok: false`).
    Declined(String),
    /// Something downstream of validation broke.
    Failed(String),
}

impl GenerationOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, GenerationOutcome::Generated(_))
    }

    pub fn question_count(&self) -> usize {
        match self {
            GenerationOutcome::Generated(questions) => questions.len(),
            _ => 0,
        }
    }
}
