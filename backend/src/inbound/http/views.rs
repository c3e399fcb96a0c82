//! JSON view models returned by the quiz pages.
//!
//! Each body carries a `view` discriminator naming the page a client should
//! render, plus the data that page displays.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Quiz;

use super::messages;
use super::quiz_form::{FieldError, QuizForm};
use super::session::Flash;

/// Page discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ViewName {
    /// Registration and update form, with the list on registration.
    Crud,
    /// One quiz to answer.
    Play,
    /// Outcome of an answer.
    Answer,
}

/// A stored quiz as listed on the registration page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct QuizItem {
    /// Storage id.
    pub id: Option<i32>,
    /// Question text.
    pub question: String,
    /// Expected answer.
    pub answer: bool,
    /// Who registered the quiz.
    pub author: String,
}

impl From<Quiz> for QuizItem {
    fn from(quiz: Quiz) -> Self {
        Self {
            id: quiz.id.map(|id| id.get()),
            question: quiz.question,
            answer: quiz.answer,
            author: quiz.author,
        }
    }
}

/// Registration and update page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CrudView {
    /// Always [`ViewName::Crud`].
    pub view: ViewName,
    /// Page heading.
    pub title: String,
    /// Form state to redisplay.
    pub quiz_form: QuizForm,
    /// Present on the registration page only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list: Option<Vec<QuizItem>>,
    /// Set when the registration page lists nothing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_list_msg: Option<String>,
    /// Flash after a registration or update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complete: Option<String>,
    /// Flash after a deletion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delcomplete: Option<String>,
    /// Field errors from a rejected form.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl CrudView {
    /// Registration page: the full list plus a form for a new quiz.
    pub fn list(quizzes: Vec<Quiz>, mut form: QuizForm) -> Self {
        form.new_quiz = true;
        let no_list_msg = quizzes.is_empty().then(|| messages::NO_LIST.to_owned());
        Self {
            view: ViewName::Crud,
            title: messages::TITLE_INPUT.to_owned(),
            quiz_form: form,
            list: Some(quizzes.into_iter().map(QuizItem::from).collect()),
            no_list_msg,
            complete: None,
            delcomplete: None,
            errors: Vec::new(),
        }
    }

    /// Update page for a single quiz.
    pub fn update(mut form: QuizForm) -> Self {
        form.new_quiz = false;
        Self {
            view: ViewName::Crud,
            title: messages::TITLE_UPDATE.to_owned(),
            quiz_form: form,
            list: None,
            no_list_msg: None,
            complete: None,
            delcomplete: None,
            errors: Vec::new(),
        }
    }

    /// Attach flash messages taken from the session.
    #[must_use]
    pub fn with_flash(mut self, flash: Flash) -> Self {
        self.complete = flash.complete;
        self.delcomplete = flash.delcomplete;
        self
    }

    /// Attach field errors from a rejected form.
    #[must_use]
    pub fn with_errors(mut self, errors: Vec<FieldError>) -> Self {
        self.errors = errors;
        self
    }
}

/// Play page: one quiz, or a message when there is none.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlayView {
    /// Always [`ViewName::Play`].
    pub view: ViewName,
    /// The quiz to answer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quiz_form: Option<QuizForm>,
    /// Set when nothing is stored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
}

impl From<Option<Quiz>> for PlayView {
    fn from(quiz: Option<Quiz>) -> Self {
        match quiz {
            Some(quiz) => Self {
                view: ViewName::Play,
                quiz_form: Some(QuizForm::from_entity(&quiz)),
                msg: None,
            },
            None => Self {
                view: ViewName::Play,
                quiz_form: None,
                msg: Some(messages::NO_QUIZ.to_owned()),
            },
        }
    }
}

/// Result page after an answer is submitted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct AnswerView {
    /// Always [`ViewName::Answer`].
    pub view: ViewName,
    /// Message shown to the player.
    pub msg: String,
    /// Whether the submitted answer matched.
    pub correct: bool,
}

impl AnswerView {
    /// View for a graded answer; a missing quiz is reported as incorrect.
    pub fn new(correct: bool) -> Self {
        let msg = if correct {
            messages::CORRECT
        } else {
            messages::INCORRECT
        };
        Self {
            view: ViewName::Answer,
            msg: msg.to_owned(),
            correct,
        }
    }
}
