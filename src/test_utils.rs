#[cfg(test)]
pub mod fixtures {
    use serde_json::json;

    use crate::models::domain::{Difficulty, QuizRequest, UserId};

    /// The request used throughout the pipeline tests.
    pub fn sample_request() -> QuizRequest {
        QuizRequest {
            user_id: UserId::new("1"),
            topic: "generate me a quiz on Photosynthesis".to_string(),
            num_questions: 5,
            difficulty: Difficulty::Easy,
        }
    }

    pub fn question_json(serial: usize) -> serde_json::Value {
        json!({
            "serial_number": serial.to_string(),
            "question": format!("Photosynthesis question {}?", serial),
            "options": ["Light", "Water", "Carbon dioxide", "All of these"],
            "correctAnswer": "All of these",
            "description": "Plants need light, water and carbon dioxide."
        })
    }

    /// A model reply as it usually arrives: fenced JSON with `count` questions.
    pub fn quiz_reply(count: usize) -> String {
        let data: Vec<_> = (1..=count).map(question_json).collect();
        format!(
            "```json\n{}\n```",
            json!({ "ok": true, "data": data })
        )
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::services::response_parser::parse_response;

    #[test]
    fn test_fixtures_sample_request() {
        let request = sample_request();
        assert_eq!(request.num_questions, 5);
        assert_eq!(request.user_id.as_str(), "1");
    }

    #[test]
    fn test_fixtures_quiz_reply_parses() {
        let outcome = parse_response(&quiz_reply(3)).unwrap();
        assert_eq!(outcome.question_count(), 3);
    }
}
