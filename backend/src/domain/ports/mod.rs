//! Domain ports for the hexagonal boundary.
//!
//! Driving ports ([`QuizQuery`], [`QuizCommand`]) are what inbound adapters
//! call; the driven port ([`QuizRepository`]) is what outbound adapters
//! implement.

mod macros;
pub(crate) use macros::define_port_error;

mod quiz_command;
mod quiz_query;
mod quiz_repository;

pub use quiz_command::QuizCommand;
pub use quiz_query::QuizQuery;
#[cfg(test)]
pub use quiz_command::MockQuizCommand;
#[cfg(test)]
pub use quiz_query::MockQuizQuery;
#[cfg(test)]
pub use quiz_repository::MockQuizRepository;
pub use quiz_repository::{QuizRepository, QuizRepositoryError};
