use async_trait::async_trait;

use crate::{
    db::{release, Database},
    errors::AppResult,
    models::domain::UserId,
};

/// Question texts already issued to a user for a topic, oldest first as the
/// database returns them.
const PAST_QUESTIONS_QUERY: &str = r#"
SELECT q.question
FROM questions q
JOIN quizzes z ON q.quiz_id = z.id
WHERE z.user_id::text = $1 AND LOWER(z.quiz_name) = LOWER($2)
"#;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PastQuestionsRepository: Send + Sync {
    async fn find_by_user_and_topic(&self, user_id: &UserId, topic: &str)
        -> AppResult<Vec<String>>;
}

pub struct PgPastQuestionsRepository {
    db: Database,
}

impl PgPastQuestionsRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PastQuestionsRepository for PgPastQuestionsRepository {
    async fn find_by_user_and_topic(
        &self,
        user_id: &UserId,
        topic: &str,
    ) -> AppResult<Vec<String>> {
        let mut connection = self.db.connect().await?;

        let questions = sqlx::query_scalar::<_, String>(PAST_QUESTIONS_QUERY)
            .bind(user_id.as_str())
            .bind(topic)
            .fetch_all(&mut connection)
            .await;

        release(connection).await;
        Ok(questions?)
    }
}
