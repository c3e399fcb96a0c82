//! Driving port for reading quizzes and playing them.

use async_trait::async_trait;

use crate::domain::{AnswerCheck, Error, Quiz, QuizId};

/// Read-side use cases consumed by inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizQuery: Send + Sync {
    /// All persisted quizzes in storage order.
    async fn select_all(&self) -> Result<Vec<Quiz>, Error>;

    /// The quiz stored under `id`; absence is not an error.
    async fn select_one_by_id(&self, id: QuizId) -> Result<Option<Quiz>, Error>;

    /// One uniformly chosen quiz, or `None` when nothing is stored.
    ///
    /// Calls are independent: the same quiz may be served repeatedly.
    async fn select_one_random_quiz(&self) -> Result<Option<Quiz>, Error>;

    /// Grade `candidate` against the quiz stored under `id`.
    async fn grade_quiz(&self, id: QuizId, candidate: bool) -> Result<AnswerCheck, Error>;

    /// `true` only when the quiz exists and `candidate` matches its answer.
    ///
    /// A missing quiz and a wrong answer both yield `false`; use
    /// [`QuizQuery::grade_quiz`] to tell them apart.
    async fn check_quiz(&self, id: QuizId, candidate: bool) -> Result<bool, Error> {
        Ok(self.grade_quiz(id, candidate).await?.is_correct())
    }
}
