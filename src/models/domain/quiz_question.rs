use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

pub const OPTION_COUNT: usize = 4;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Validate)]
pub struct QuizQuestion {
    #[serde(deserialize_with = "string_or_number")]
    pub serial_number: String,
    #[validate(length(min = 1, message = "question text must not be empty"))]
    pub question: String,
    #[validate(length(equal = 4, message = "each question must have exactly four options"))]
    pub options: Vec<String>,
    #[serde(alias = "correctAnswer")]
    pub correct_answer: String,
    #[serde(default)]
    pub description: String,
}

/// Models tend to number questions with bare integers even when asked for
/// strings.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum SerialNumber {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match SerialNumber::deserialize(deserializer)? {
        SerialNumber::Text(text) => text,
        SerialNumber::Number(number) => number.to_string(),
    })
}
