//! Shared HTTP adapter state.
//!
//! Handlers take this through `web::Data` and see only the driving ports, so
//! tests can swap in mocks or the in-memory store.

use std::sync::Arc;

use crate::domain::ports::{QuizCommand, QuizQuery};

/// Port implementations available to handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Read-side use cases.
    pub quizzes: Arc<dyn QuizQuery>,
    /// Write-side use cases.
    pub quiz_commands: Arc<dyn QuizCommand>,
}

impl HttpState {
    /// Bundle the read and write ports.
    pub fn new(quizzes: Arc<dyn QuizQuery>, quiz_commands: Arc<dyn QuizCommand>) -> Self {
        Self {
            quizzes,
            quiz_commands,
        }
    }

    /// Use one value for both ports, typically a
    /// [`crate::domain::QuizService`].
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: QuizQuery + QuizCommand + 'static,
    {
        Self {
            quizzes: service.clone(),
            quiz_commands: service,
        }
    }
}
