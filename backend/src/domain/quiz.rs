//! Quiz entity and answer-check outcome.

use std::fmt;

/// Storage-assigned quiz identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QuizId(i32);

impl QuizId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// Raw integer value.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl From<i32> for QuizId {
    fn from(raw: i32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for QuizId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A true/false question.
///
/// ## Invariants
/// - `id` is `None` only for a value that has not been inserted yet; storage
///   assigns it on insert and it is unique across persisted records.
/// - `question` and `author` are non-blank once they pass the inbound form
///   validation. The entity itself does not re-check them.
///
/// # Examples
/// ```
/// use quiz_backend::domain::{Quiz, QuizId};
///
/// let draft = Quiz::new("Is Rust memory safe?", true, "ferris");
/// assert!(draft.id.is_none());
///
/// let saved = draft.with_id(QuizId::new(1));
/// assert!(saved.is_correct(true));
/// assert!(!saved.is_correct(false));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quiz {
    /// Assigned by storage on insert.
    pub id: Option<QuizId>,
    /// Question text.
    pub question: String,
    /// The correct answer.
    pub answer: bool,
    /// Who registered the quiz.
    pub author: String,
}

impl Quiz {
    /// Build a quiz that has not been persisted yet.
    pub fn new(question: impl Into<String>, answer: bool, author: impl Into<String>) -> Self {
        Self {
            id: None,
            question: question.into(),
            answer,
            author: author.into(),
        }
    }

    /// Return a copy keyed by `id`.
    #[must_use]
    pub fn with_id(mut self, id: QuizId) -> Self {
        self.id = Some(id);
        self
    }

    /// Whether `candidate` matches the stored answer.
    #[must_use]
    pub fn is_correct(&self, candidate: bool) -> bool {
        self.answer == candidate
    }
}

/// Outcome of grading a submitted answer.
///
/// [`crate::domain::ports::QuizQuery::check_quiz`] collapses this into a
/// boolean where `NotFound` and `Incorrect` both read as `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerCheck {
    /// The quiz exists and the answer matches.
    Correct,
    /// The quiz exists and the answer does not match.
    Incorrect,
    /// No quiz is stored under the requested id.
    NotFound,
}

impl AnswerCheck {
    /// Grade `candidate` against an optional stored quiz.
    #[must_use]
    pub fn grade(quiz: Option<&Quiz>, candidate: bool) -> Self {
        match quiz {
            Some(quiz) if quiz.is_correct(candidate) => Self::Correct,
            Some(_) => Self::Incorrect,
            None => Self::NotFound,
        }
    }

    /// `true` only for [`AnswerCheck::Correct`].
    #[must_use]
    pub fn is_correct(self) -> bool {
        matches!(self, Self::Correct)
    }
}
