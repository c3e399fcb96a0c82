//! Quiz service implementing the driving ports.
//!
//! A thin layer over [`QuizRepository`]: the only decisions made here are the
//! uniform random pick for play mode and the answer comparison.

use std::sync::Arc;

use async_trait::async_trait;
use rand::Rng;
use tracing::{debug, info};

use crate::domain::ports::{QuizCommand, QuizQuery, QuizRepository, QuizRepositoryError};
use crate::domain::{AnswerCheck, Error, Quiz, QuizId};

/// Quiz use cases backed by a repository.
#[derive(Clone)]
pub struct QuizService<R> {
    repository: Arc<R>,
}

impl<R> QuizService<R> {
    /// Create a service over `repository`.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

fn map_repository_error(error: QuizRepositoryError) -> Error {
    match error {
        QuizRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("quiz repository unavailable: {message}"))
        }
        QuizRepositoryError::Query { message } => {
            Error::internal(format!("quiz repository error: {message}"))
        }
    }
}

/// Pick one element with a uniform index over `[0, len)`.
///
/// The whole set is materialised by the caller, which is fine for the small
/// tables this service targets.
fn pick_uniform(quizzes: Vec<Quiz>) -> Option<Quiz> {
    if quizzes.is_empty() {
        return None;
    }
    let index = rand::thread_rng().gen_range(0..quizzes.len());
    quizzes.into_iter().nth(index)
}

#[async_trait]
impl<R> QuizQuery for QuizService<R>
where
    R: QuizRepository,
{
    async fn select_all(&self) -> Result<Vec<Quiz>, Error> {
        self.repository
            .find_all()
            .await
            .map_err(map_repository_error)
    }

    async fn select_one_by_id(&self, id: QuizId) -> Result<Option<Quiz>, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(map_repository_error)
    }

    async fn select_one_random_quiz(&self) -> Result<Option<Quiz>, Error> {
        let quizzes = self.select_all().await?;
        let count = quizzes.len();
        let picked = pick_uniform(quizzes);
        debug!(
            count,
            picked = ?picked.as_ref().and_then(|quiz| quiz.id),
            "random quiz selected"
        );
        Ok(picked)
    }

    async fn grade_quiz(&self, id: QuizId, candidate: bool) -> Result<AnswerCheck, Error> {
        let quiz = self.select_one_by_id(id).await?;
        let outcome = AnswerCheck::grade(quiz.as_ref(), candidate);
        debug!(%id, candidate, ?outcome, "quiz answer graded");
        Ok(outcome)
    }
}

#[async_trait]
impl<R> QuizCommand for QuizService<R>
where
    R: QuizRepository,
{
    async fn insert_quiz(&self, quiz: Quiz) -> Result<Quiz, Error> {
        let draft = Quiz { id: None, ..quiz };
        let saved = self
            .repository
            .save(&draft)
            .await
            .map_err(map_repository_error)?;
        info!(id = ?saved.id, "quiz inserted");
        Ok(saved)
    }

    async fn update_quiz(&self, quiz: Quiz) -> Result<Quiz, Error> {
        let Some(id) = quiz.id else {
            return Err(Error::invalid_request("quiz id is required for update"));
        };
        let saved = self
            .repository
            .save(&quiz)
            .await
            .map_err(map_repository_error)?;
        if saved.id != Some(id) {
            info!(requested = %id, assigned = ?saved.id, "quiz missing on update; inserted");
        } else {
            info!(%id, "quiz updated");
        }
        Ok(saved)
    }

    async fn delete_quiz_by_id(&self, id: QuizId) -> Result<(), Error> {
        self.repository
            .delete_by_id(id)
            .await
            .map_err(map_repository_error)?;
        info!(%id, "quiz deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "quiz_service_tests.rs"]
mod tests;
