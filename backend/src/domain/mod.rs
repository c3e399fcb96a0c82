//! Domain primitives, services, and ports.
//!
//! Purpose: hold the quiz entity and the only business rules of the
//! application (random selection and answer checking). Nothing in here knows
//! about Actix, Diesel, or any other framework; adapters live under
//! `inbound` and `outbound`.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Quiz / QuizId: the persisted true/false question.
//! - AnswerCheck: three-way grading outcome.
//! - QuizService: implementation of the driving ports in [`ports`].
//! - TraceId: request-scoped correlation identifier.

pub mod error;
pub mod ports;
pub mod quiz;
pub mod quiz_service;
pub mod trace_id;

pub use self::error::{Error, ErrorCode};
pub use self::quiz::{AnswerCheck, Quiz, QuizId};
pub use self::quiz_service::QuizService;
pub use self::trace_id::TraceId;

/// HTTP header name used to propagate trace identifiers.
pub const TRACE_ID_HEADER: &str = "trace-id";
