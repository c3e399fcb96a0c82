//! PostgreSQL-backed [`QuizRepository`] using Diesel.
//!
//! Each method checks out one pooled connection and issues a single
//! statement, except `save` on a keyed quiz whose row has vanished: that
//! falls through to an insert so the record reappears under a fresh id.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{QuizRepository, QuizRepositoryError};
use crate::domain::{Quiz, QuizId};

use super::models::{NewQuizRow, QuizRow, QuizUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::quizzes;

/// Diesel implementation of the quiz store.
#[derive(Clone)]
pub struct DieselQuizRepository {
    pool: DbPool,
}

impl DieselQuizRepository {
    /// Repository drawing connections from `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> QuizRepositoryError {
    QuizRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> QuizRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "quiz query failed");
        }
        other => debug!(error = %other, "quiz query failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _)
        | DieselError::BrokenTransactionManager => {
            QuizRepositoryError::connection("database connection error")
        }
        DieselError::NotFound => QuizRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => QuizRepositoryError::query("database query error"),
        _ => QuizRepositoryError::query("database error"),
    }
}

#[async_trait]
impl QuizRepository for DieselQuizRepository {
    async fn find_all(&self) -> Result<Vec<Quiz>, QuizRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<QuizRow> = quizzes::table
            .order(quizzes::id.asc())
            .select(QuizRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Quiz::from).collect())
    }

    async fn find_by_id(&self, id: QuizId) -> Result<Option<Quiz>, QuizRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<QuizRow> = quizzes::table
            .find(id.get())
            .select(QuizRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Quiz::from))
    }

    async fn save(&self, quiz: &Quiz) -> Result<Quiz, QuizRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        if let Some(id) = quiz.id {
            let updated: Option<QuizRow> = diesel::update(quizzes::table.find(id.get()))
                .set(QuizUpdate::from(quiz))
                .returning(QuizRow::as_returning())
                .get_result(&mut conn)
                .await
                .optional()
                .map_err(map_diesel_error)?;
            if let Some(row) = updated {
                return Ok(row.into());
            }
            debug!(%id, "no row to update; inserting");
        }

        let inserted: QuizRow = diesel::insert_into(quizzes::table)
            .values(NewQuizRow::from(quiz))
            .returning(QuizRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(inserted.into())
    }

    async fn delete_by_id(&self, id: QuizId) -> Result<(), QuizRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(quizzes::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        debug!(%id, removed, "quiz delete executed");
        Ok(())
    }
}
