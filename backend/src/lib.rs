//! Quiz management backend.
//!
//! Hexagonal layout: [`domain`] holds the quiz entity, its ports, and the
//! service; [`inbound`] serves HTTP; [`outbound`] stores quizzes.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

pub use doc::ApiDoc;
pub use middleware::Trace;
