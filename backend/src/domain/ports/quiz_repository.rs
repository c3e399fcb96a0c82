//! Driven port for quiz persistence.
//!
//! Adapters provide a keyed store of [`Quiz`] records. Every method is a
//! single unit of work; callers never span a transaction across calls.

use async_trait::async_trait;

use crate::domain::{Quiz, QuizId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by quiz repository adapters.
    pub enum QuizRepositoryError {
        /// The store could not be reached.
        Connection { message: String } =>
            "quiz repository connection failed: {message}",
        /// A query or mutation failed while executing.
        Query { message: String } =>
            "quiz repository query failed: {message}",
    }
}

/// Keyed storage for quizzes.
///
/// # Save semantics
///
/// - A quiz without an id is inserted and the store assigns one.
/// - A quiz with an id fully replaces the stored record. When no record
///   exists under that id the quiz is inserted under a freshly assigned id.
/// - The persisted value, including its id, is returned.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizRepository: Send + Sync {
    /// Every stored quiz, ordered by ascending id.
    async fn find_all(&self) -> Result<Vec<Quiz>, QuizRepositoryError>;

    /// The quiz stored under `id`, or `None`.
    async fn find_by_id(&self, id: QuizId) -> Result<Option<Quiz>, QuizRepositoryError>;

    /// Insert or replace `quiz`, returning the stored value.
    async fn save(&self, quiz: &Quiz) -> Result<Quiz, QuizRepositoryError>;

    /// Remove the quiz stored under `id`. Unknown ids are not an error.
    async fn delete_by_id(&self, id: QuizId) -> Result<(), QuizRepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn connection_error_formats_message() {
        let error = QuizRepositoryError::connection("refused");
        assert_eq!(
            error.to_string(),
            "quiz repository connection failed: refused"
        );
    }

    #[rstest]
    fn query_error_formats_message() {
        let error = QuizRepositoryError::query("syntax");
        assert!(matches!(error, QuizRepositoryError::Query { .. }));
        assert!(error.to_string().contains("syntax"));
    }
}
