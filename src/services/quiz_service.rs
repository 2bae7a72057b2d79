use std::{sync::Arc, time::Duration};

use crate::{
    errors::{AppError, AppResult, GenerationError, GenerationResult},
    models::domain::{GenerationOutcome, QuizRequest, UserId},
    repositories::PastQuestionsRepository,
    services::{
        generation_client::GenerationClient, prompt_builder::build_prompt,
        response_parser::parse_response, topic_normalizer::normalize,
    },
};

/// The quiz pipeline: normalize, look up history, prompt, generate, parse.
pub struct QuizService {
    past_questions: Arc<dyn PastQuestionsRepository>,
    generator: Arc<dyn GenerationClient>,
    lookup_timeout: Duration,
    generation_timeout: Duration,
}

impl QuizService {
    pub fn new(
        past_questions: Arc<dyn PastQuestionsRepository>,
        generator: Arc<dyn GenerationClient>,
        lookup_timeout: Duration,
        generation_timeout: Duration,
    ) -> Self {
        Self {
            past_questions,
            generator,
            lookup_timeout,
            generation_timeout,
        }
    }

    /// Only a generation call that outlives `generation_timeout` is an error;
    /// anything else that goes wrong after validation comes back as
    /// `GenerationOutcome::Failed`.
    pub async fn generate(&self, request: QuizRequest) -> AppResult<GenerationOutcome> {
        log::info!(
            "Starting quiz generation for user {}: topic={:?}, questions={}, difficulty={}",
            request.user_id,
            request.topic,
            request.num_questions,
            request.difficulty
        );

        let topic = normalize(&request.topic);
        log::info!("Normalized topic: {}", topic);

        let past_questions = self.fetch_past(&request.user_id, &topic).await;
        log::info!("Past questions fetched: {}", past_questions.len());

        match self.generate_strict(&topic, &request, &past_questions).await {
            Ok(outcome) => {
                match &outcome {
                    GenerationOutcome::Generated(questions) => {
                        log::info!("Returning valid quiz with {} questions", questions.len())
                    }
                    GenerationOutcome::Declined(reason) => {
                        log::warn!("Quiz generation declined: {}", reason)
                    }
                    GenerationOutcome::Failed(reason) => {
                        log::error!("Quiz generation failed: {}", reason)
                    }
                }
                Ok(outcome)
            }
            Err(GenerationError::Timeout(secs)) => {
                log::error!("Quiz generation for topic {} exceeded {}s", topic, secs);
                Err(AppError::GenerationTimeout(secs))
            }
            Err(e) => {
                log::error!("Quiz generation failed for topic {}: {}", topic, e);
                Ok(GenerationOutcome::Failed(e.to_string()))
            }
        }
    }

    /// Best effort: a lookup failure or a stalled lookup only costs us repeat
    /// suppression, so it is logged and treated as an empty history.
    pub async fn fetch_past(&self, user_id: &UserId, topic: &str) -> Vec<String> {
        let lookup = self.past_questions.find_by_user_and_topic(user_id, topic);

        match tokio::time::timeout(self.lookup_timeout, lookup).await {
            Ok(Ok(questions)) => questions,
            Ok(Err(e)) => {
                log::warn!(
                    "Failed to fetch past questions for user {} and topic {}: {}",
                    user_id,
                    topic,
                    e
                );
                Vec::new()
            }
            Err(_) => {
                log::warn!(
                    "Past questions lookup for user {} and topic {} exceeded {}ms",
                    user_id,
                    topic,
                    self.lookup_timeout.as_millis()
                );
                Vec::new()
            }
        }
    }

    /// Propagating: generation is the deliverable, so every failure here
    /// reaches the caller.
    async fn generate_strict(
        &self,
        topic: &str,
        request: &QuizRequest,
        past_questions: &[String],
    ) -> GenerationResult<GenerationOutcome> {
        let prompt = build_prompt(
            topic,
            request.num_questions,
            request.difficulty,
            past_questions,
        );

        let raw = tokio::time::timeout(self.generation_timeout, self.generator.invoke(&prompt))
            .await
            .map_err(|_| GenerationError::Timeout(self.generation_timeout.as_secs()))??;
        parse_response(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use crate::{
        repositories::past_questions_repository::MockPastQuestionsRepository,
        services::generation_client::MockGenerationClient,
        test_utils::fixtures::{quiz_reply, sample_request},
    };

    fn service(
        repository: MockPastQuestionsRepository,
        generator: MockGenerationClient,
    ) -> QuizService {
        QuizService::new(
            Arc::new(repository),
            Arc::new(generator),
            Duration::from_secs(1),
            Duration::from_secs(5),
        )
    }

    fn empty_history() -> MockPastQuestionsRepository {
        let mut repository = MockPastQuestionsRepository::new();
        repository
            .expect_find_by_user_and_topic()
            .returning(|_, _| Ok(vec![]));
        repository
    }

    fn replying(reply: &'static str) -> MockGenerationClient {
        let mut generator = MockGenerationClient::new();
        generator
            .expect_invoke()
            .times(1)
            .returning(move |_| Ok(reply.to_string()));
        generator
    }

    #[actix_web::test]
    async fn generates_quiz_from_well_formed_reply() {
        let mut generator = MockGenerationClient::new();
        generator
            .expect_invoke()
            .times(1)
            .returning(|_| Ok(quiz_reply(5)));

        let outcome = service(empty_history(), generator)
            .generate(sample_request())
            .await
            .unwrap();

        assert_eq!(outcome.question_count(), 5);
        assert!(outcome.is_ok());
    }

    #[actix_web::test]
    async fn lookup_uses_normalized_topic_and_user() {
        let mut repository = MockPastQuestionsRepository::new();
        repository
            .expect_find_by_user_and_topic()
            .times(1)
            .returning(|user_id, topic| {
                assert_eq!(user_id.as_str(), "1");
                assert_eq!(topic, "Photosynthesis");
                Ok(vec!["What is chlorophyll?".to_string()])
            });

        let mut generator = MockGenerationClient::new();
        generator.expect_invoke().times(1).returning(|prompt| {
            assert!(prompt.contains(r#""Photosynthesis""#));
            assert!(prompt.contains("Do NOT repeat these past questions: What is chlorophyll?."));
            Ok(quiz_reply(5))
        });

        let outcome = service(repository, generator)
            .generate(sample_request())
            .await
            .unwrap();
        assert!(outcome.is_ok());
    }

    #[actix_web::test]
    async fn lookup_failure_does_not_abort_generation() {
        let mut repository = MockPastQuestionsRepository::new();
        repository
            .expect_find_by_user_and_topic()
            .times(1)
            .returning(|_, _| Err(AppError::DatabaseError("connection refused".into())));

        let mut generator = MockGenerationClient::new();
        generator.expect_invoke().times(1).returning(|prompt| {
            assert!(prompt.contains("Do NOT repeat these past questions: None."));
            Ok(quiz_reply(5))
        });

        let outcome = service(repository, generator)
            .generate(sample_request())
            .await
            .unwrap();
        assert_eq!(outcome.question_count(), 5);
    }

    #[actix_web::test]
    async fn declined_reply_is_passed_through() {
        let outcome = service(
            empty_history(),
            replying(r#"{"ok": false, "data": ["reason"]}"#),
        )
        .generate(sample_request())
        .await
        .unwrap();

        assert_eq!(outcome, GenerationOutcome::Declined("reason".to_string()));
    }

    #[actix_web::test]
    async fn embedded_error_string_becomes_failure() {
        let outcome = service(
            empty_history(),
            replying(r#"{"ok": true, "data": ["some error text"]}"#),
        )
        .generate(sample_request())
        .await
        .unwrap();

        assert_eq!(
            outcome,
            GenerationOutcome::Failed("some error text".to_string())
        );
    }

    #[actix_web::test]
    async fn unexpected_data_shape_becomes_invalid_format() {
        let outcome = service(empty_history(), replying(r#"{"ok": true, "data": [42]}"#))
            .generate(sample_request())
            .await
            .unwrap();

        assert_eq!(
            outcome,
            GenerationOutcome::Failed("Invalid response format".to_string())
        );
    }

    #[actix_web::test]
    async fn service_error_becomes_failure() {
        let mut generator = MockGenerationClient::new();
        generator
            .expect_invoke()
            .times(1)
            .returning(|_| Err(GenerationError::Service("503 Service Unavailable".into())));

        let outcome = service(empty_history(), generator)
            .generate(sample_request())
            .await
            .unwrap();

        match outcome {
            GenerationOutcome::Failed(message) => {
                assert!(message.contains("503 Service Unavailable"))
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[actix_web::test]
    async fn unparseable_reply_becomes_failure() {
        let outcome = service(empty_history(), replying("Sorry, I can't do that."))
            .generate(sample_request())
            .await
            .unwrap();

        assert!(matches!(outcome, GenerationOutcome::Failed(_)));
    }

    struct StalledHistory;

    #[async_trait]
    impl PastQuestionsRepository for StalledHistory {
        async fn find_by_user_and_topic(
            &self,
            _user_id: &UserId,
            _topic: &str,
        ) -> AppResult<Vec<String>> {
            std::future::pending().await
        }
    }

    struct StalledGenerator;

    #[async_trait]
    impl GenerationClient for StalledGenerator {
        async fn invoke(&self, _prompt: &str) -> GenerationResult<String> {
            std::future::pending().await
        }
    }

    #[actix_web::test]
    async fn stalled_lookup_falls_back_to_empty_history() {
        let service = QuizService::new(
            Arc::new(StalledHistory),
            Arc::new(MockGenerationClient::new()),
            Duration::from_millis(50),
            Duration::from_secs(5),
        );

        let questions = service
            .fetch_past(&UserId::new("1"), "Photosynthesis")
            .await;
        assert!(questions.is_empty());
    }

    #[actix_web::test]
    async fn stalled_generation_is_a_timeout_error() {
        let service = QuizService::new(
            Arc::new(empty_history()),
            Arc::new(StalledGenerator),
            Duration::from_secs(1),
            Duration::from_millis(50),
        );

        let result = service.generate(sample_request()).await;
        assert!(matches!(result, Err(AppError::GenerationTimeout(_))));
    }
}
