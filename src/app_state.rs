use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::{
    config::Config,
    db::Database,
    repositories::{PastQuestionsRepository, PgPastQuestionsRepository},
    services::{
        generation_client::{GenerationClient, OpenAiGenerationClient},
        quiz_service::QuizService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub quiz_service: Arc<QuizService>,
    pub db: Database,
    pub config: Arc<Config>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let db = Database::from_config(&config);
        let past_questions = Arc::new(PgPastQuestionsRepository::new(db.clone()));
        let generator = Arc::new(OpenAiGenerationClient::new(&config));

        Self::with_collaborators(config, db, past_questions, generator)
    }

    /// Wires the pipeline around the given collaborators.
    pub fn with_collaborators(
        config: Config,
        db: Database,
        past_questions: Arc<dyn PastQuestionsRepository>,
        generator: Arc<dyn GenerationClient>,
    ) -> Self {
        Self {
            quiz_service: Arc::new(QuizService::new(
                past_questions,
                generator,
                config.past_questions_timeout,
                config.generation_timeout,
            )),
            db,
            config: Arc::new(config),
            started_at: Utc::now(),
        }
    }
}
