//! Form-backing structure for the quiz pages.
//!
//! Bound from `application/x-www-form-urlencoded` bodies and from query
//! strings, and echoed back inside view models so a client can redisplay the
//! form. Mapping to and from [`Quiz`] is explicit.

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::domain::{Quiz, QuizId};

use super::messages;

/// Quiz input and display state.
///
/// Every field has a default so partially filled forms still bind; blank
/// values are reported by [`QuizForm::validate`] instead of failing
/// extraction. `answer` defaults to `true`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizForm {
    /// Storage id; blank on the registration form.
    #[serde(default, deserialize_with = "blank_as_none")]
    pub id: Option<i32>,
    /// Question text.
    #[serde(default)]
    pub question: String,
    /// Expected answer.
    #[serde(default = "default_answer")]
    pub answer: bool,
    /// Who registered the quiz.
    #[serde(default)]
    pub author: String,
    /// `true` for the registration form, `false` for the update form.
    #[serde(default)]
    pub new_quiz: bool,
}

impl Default for QuizForm {
    fn default() -> Self {
        Self {
            id: None,
            question: String::new(),
            answer: default_answer(),
            author: String::new(),
            new_quiz: false,
        }
    }
}

fn default_answer() -> bool {
    true
}

/// Treat an empty `id=` field as absent rather than as a parse failure.
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// A validation message attached to one form field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct FieldError {
    /// Form field name as submitted.
    pub field: String,
    /// Message to display next to the field.
    pub message: String,
}

impl FieldError {
    fn required(field: &str, label: &str) -> Self {
        Self {
            field: field.to_owned(),
            message: messages::required(label),
        }
    }
}

impl QuizForm {
    /// Registration form with defaults.
    pub fn blank() -> Self {
        Self {
            new_quiz: true,
            ..Self::default()
        }
    }

    /// Populate a form from a stored quiz.
    pub fn from_entity(quiz: &Quiz) -> Self {
        Self {
            id: quiz.id.map(QuizId::get),
            question: quiz.question.clone(),
            answer: quiz.answer,
            author: quiz.author.clone(),
            new_quiz: false,
        }
    }

    /// Build the entity this form describes.
    pub fn to_entity(&self) -> Quiz {
        Quiz {
            id: self.id.map(QuizId::new),
            question: self.question.clone(),
            answer: self.answer,
            author: self.author.clone(),
        }
    }

    /// Blank question and author are errors. `require_id` adds the id check
    /// used by the update form.
    pub fn validate(&self, require_id: bool) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if require_id && self.id.is_none() {
            errors.push(FieldError::required("id", "Id"));
        }
        if self.question.trim().is_empty() {
            errors.push(FieldError::required("question", "Question"));
        }
        if self.author.trim().is_empty() {
            errors.push(FieldError::required("author", "Author"));
        }
        errors
    }
}
