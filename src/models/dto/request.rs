use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::errors::AppError;
use crate::models::domain::{Difficulty, QuizRequest, UserId};

pub const QUESTION_COUNT_MESSAGE: &str = "Number of questions must be between 5 and 20";
pub const DIFFICULTY_MESSAGE: &str = "Difficulty must be easy, medium, or hard";

/// `user_id` as it arrives on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserIdInput {
    Number(i64),
    Text(String),
}

impl From<UserIdInput> for UserId {
    fn from(input: UserIdInput) -> Self {
        match input {
            UserIdInput::Number(id) => UserId::new(id.to_string()),
            UserIdInput::Text(id) => UserId::new(id),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GenerateQuizRequestDto {
    pub user_id: UserIdInput,

    pub topic: String,

    #[validate(range(min = 5, max = 20, message = "Number of questions must be between 5 and 20"))]
    pub num_questions: i64,

    #[serde(default)]
    pub difficulty: String,
}

impl TryFrom<GenerateQuizRequestDto> for QuizRequest {
    type Error = AppError;

    /// Question count is checked before difficulty; the first failure wins.
    fn try_from(dto: GenerateQuizRequestDto) -> Result<Self, Self::Error> {
        dto.validate()
            .map_err(|errors| AppError::ValidationError(first_message(&errors)))?;

        let difficulty: Difficulty = dto
            .difficulty
            .parse()
            .map_err(|_| AppError::ValidationError(DIFFICULTY_MESSAGE.to_string()))?;

        let num_questions = u8::try_from(dto.num_questions)
            .map_err(|_| AppError::ValidationError(QUESTION_COUNT_MESSAGE.to_string()))?;

        Ok(QuizRequest {
            user_id: dto.user_id.into(),
            topic: dto.topic,
            num_questions,
            difficulty,
        })
    }
}

fn first_message(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|field_errors| field_errors.iter())
        .find_map(|error| error.message.as_ref().map(|message| message.to_string()))
        .unwrap_or_else(|| errors.to_string())
}
