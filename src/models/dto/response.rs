use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::{GenerationOutcome, QuizQuestion};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuizResponseData {
    Questions(Vec<QuizQuestion>),
    Messages(Vec<String>),
}

/// Wire shape of a quiz result: `{"ok": bool, "data": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResponseDto {
    pub ok: bool,
    pub data: QuizResponseData,
}

impl From<GenerationOutcome> for QuizResponseDto {
    fn from(outcome: GenerationOutcome) -> Self {
        match outcome {
            GenerationOutcome::Generated(questions) => QuizResponseDto {
                ok: true,
                data: QuizResponseData::Questions(questions),
            },
            GenerationOutcome::Declined(reason) | GenerationOutcome::Failed(reason) => {
                QuizResponseDto {
                    ok: false,
                    data: QuizResponseData::Messages(vec![reason]),
                }
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub started_at: DateTime<Utc>,
    pub uptime_seconds: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub version: String,
    pub database: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn declined_outcome_serializes_to_single_reason() {
        let dto = QuizResponseDto::from(GenerationOutcome::Declined("inappropriate".into()));

        assert_eq!(
            serde_json::to_value(&dto).unwrap(),
            json!({ "ok": false, "data": ["inappropriate"] })
        );
    }

    #[test]
    fn failed_outcome_serializes_like_declined() {
        let dto = QuizResponseDto::from(GenerationOutcome::Failed("Invalid response format".into()));

        assert_eq!(
            serde_json::to_value(&dto).unwrap(),
            json!({ "ok": false, "data": ["Invalid response format"] })
        );
    }

    #[test]
    fn generated_outcome_serializes_questions() {
        let question = QuizQuestion {
            serial_number: "1".into(),
            question: "2 + 2?".into(),
            options: vec!["1".into(), "2".into(), "3".into(), "4".into()],
            correct_answer: "4".into(),
            description: "Basic addition.".into(),
        };
        let dto = QuizResponseDto::from(GenerationOutcome::Generated(vec![question]));
        let value = serde_json::to_value(&dto).unwrap();

        assert_eq!(value["ok"], true);
        assert_eq!(value["data"][0]["correct_answer"], "4");
        assert_eq!(value["data"][0]["options"].as_array().unwrap().len(), 4);
    }
}
