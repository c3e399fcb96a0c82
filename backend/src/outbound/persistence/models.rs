//! Diesel row structs for the `quizzes` table.
//!
//! Internal to the persistence adapter; the domain only ever sees [`Quiz`].

use diesel::prelude::*;

use crate::domain::{Quiz, QuizId};

use super::schema::quizzes;

/// A stored quiz row.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = quizzes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct QuizRow {
    pub id: i32,
    pub question: String,
    pub answer: bool,
    pub author: String,
}

impl From<QuizRow> for Quiz {
    fn from(row: QuizRow) -> Self {
        Quiz::new(row.question, row.answer, row.author).with_id(QuizId::new(row.id))
    }
}

/// Insert payload; the serial column assigns `id`.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = quizzes)]
pub(crate) struct NewQuizRow<'a> {
    pub question: &'a str,
    pub answer: bool,
    pub author: &'a str,
}

/// Full replacement of every mutable column.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = quizzes)]
pub(crate) struct QuizUpdate<'a> {
    pub question: &'a str,
    pub answer: bool,
    pub author: &'a str,
}

impl<'a> From<&'a Quiz> for NewQuizRow<'a> {
    fn from(quiz: &'a Quiz) -> Self {
        Self {
            question: &quiz.question,
            answer: quiz.answer,
            author: &quiz.author,
        }
    }
}

impl<'a> From<&'a Quiz> for QuizUpdate<'a> {
    fn from(quiz: &'a Quiz) -> Self {
        Self {
            question: &quiz.question,
            answer: quiz.answer,
            author: &quiz.author,
        }
    }
}
