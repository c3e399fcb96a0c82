//! Driving port for quiz mutations.

use async_trait::async_trait;

use crate::domain::{Error, Quiz, QuizId};

/// Write-side use cases consumed by inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizCommand: Send + Sync {
    /// Persist a new quiz and return it with its assigned id.
    ///
    /// Any id already present on `quiz` is ignored.
    async fn insert_quiz(&self, quiz: Quiz) -> Result<Quiz, Error>;

    /// Replace every field of the quiz keyed by `quiz.id`.
    ///
    /// # Errors
    /// Returns [`crate::domain::ErrorCode::InvalidRequest`] when `quiz.id` is
    /// `None`.
    async fn update_quiz(&self, quiz: Quiz) -> Result<Quiz, Error>;

    /// Remove the quiz keyed by `id`; unknown ids are a no-op.
    async fn delete_quiz_by_id(&self, id: QuizId) -> Result<(), Error>;
}
