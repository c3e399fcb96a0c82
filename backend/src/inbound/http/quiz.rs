//! Quiz page handlers.
//!
//! ```text
//! GET  /quiz            registration page with the full list
//! POST /quiz/insert     create, then redirect to /quiz
//! GET  /quiz/play       random quiz
//! GET  /quiz/{id}       update page
//! POST /quiz/update     replace, then redirect to /quiz/{id}
//! POST /quiz/delete     remove, then redirect to /quiz
//! POST /quiz/check      grade an answer
//! ```
//!
//! Invalid forms re-render the page with `400` and field errors; the service
//! is not called. Redirects are `302` and carry a flash message.

use actix_web::{HttpResponse, get, http::header, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, QuizId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::malformed_input;
use crate::inbound::http::messages;
use crate::inbound::http::quiz_form::QuizForm;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::{FlashKind, FlashMessages};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views::{AnswerView, CrudView, PlayView};

const LIST_PATH: &str = "/quiz";

/// Body of `POST /quiz/delete`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct DeleteForm {
    /// Quiz to remove.
    pub id: i32,
}

/// Body of `POST /quiz/check`. Other quiz fields are ignored.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CheckForm {
    /// Quiz being answered.
    pub id: i32,
    /// Submitted answer.
    pub answer: bool,
}

fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

async fn list_view(state: &HttpState, form: QuizForm) -> ApiResult<CrudView> {
    let quizzes = state.quizzes.select_all().await?;
    Ok(CrudView::list(quizzes, form))
}

/// Registration page listing every quiz.
#[utoipa::path(
    get,
    path = "/quiz",
    responses(
        (status = 200, description = "Quiz list and a blank registration form", body = CrudView),
        (status = 503, description = "Storage unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["quiz"],
    operation_id = "showQuizList"
)]
#[get("/quiz")]
pub async fn show_list(
    state: web::Data<HttpState>,
    flash: FlashMessages,
) -> ApiResult<HttpResponse> {
    let view = list_view(&state, QuizForm::blank())
        .await?
        .with_flash(flash.take()?);
    Ok(HttpResponse::Ok().json(view))
}

/// Register a new quiz.
#[utoipa::path(
    post,
    path = "/quiz/insert",
    request_body(content = QuizForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Created; redirect to the list", headers(("Location" = String, description = "Redirect target"))),
        (status = 400, description = "Blank fields; the registration page with errors", body = CrudView),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["quiz"],
    operation_id = "insertQuiz"
)]
#[post("/quiz/insert")]
pub async fn insert(
    state: web::Data<HttpState>,
    flash: FlashMessages,
    form: web::Form<QuizForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    let errors = form.validate(false);
    if !errors.is_empty() {
        let view = list_view(&state, form).await?.with_errors(errors);
        return Ok(HttpResponse::BadRequest().json(view));
    }
    state.quiz_commands.insert_quiz(form.to_entity()).await?;
    flash.set(FlashKind::Complete, messages::COMPLETE_INPUT)?;
    Ok(redirect(LIST_PATH))
}

/// Serve one random quiz.
#[utoipa::path(
    get,
    path = "/quiz/play",
    responses(
        (status = 200, description = "A quiz, or a message when none exist", body = PlayView),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["quiz"],
    operation_id = "playQuiz"
)]
#[get("/quiz/play")]
pub async fn play(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let quiz = state.quizzes.select_one_random_quiz().await?;
    Ok(HttpResponse::Ok().json(PlayView::from(quiz)))
}

/// Update page for one quiz.
///
/// An unknown id falls back to the form bound from the query string, keyed by
/// the path id.
#[utoipa::path(
    get,
    path = "/quiz/{id}",
    params(("id" = i32, Path, description = "Quiz id")),
    responses(
        (status = 200, description = "Update form", body = CrudView),
        (status = 400, description = "Non-numeric id", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["quiz"],
    operation_id = "showQuizUpdate"
)]
#[get("/quiz/{id}")]
pub async fn show_update(
    state: web::Data<HttpState>,
    flash: FlashMessages,
    path: web::Path<i32>,
    fallback: web::Query<QuizForm>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let form = match state.quizzes.select_one_by_id(QuizId::new(id)).await? {
        Some(quiz) => QuizForm::from_entity(&quiz),
        None => QuizForm {
            id: Some(id),
            ..fallback.into_inner()
        },
    };
    let view = CrudView::update(form).with_flash(flash.take()?);
    Ok(HttpResponse::Ok().json(view))
}

/// Replace every field of a quiz.
#[utoipa::path(
    post,
    path = "/quiz/update",
    request_body(content = QuizForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Updated; redirect to the update page", headers(("Location" = String, description = "Redirect target"))),
        (status = 400, description = "Blank fields or missing id; the update page with errors", body = CrudView),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["quiz"],
    operation_id = "updateQuiz"
)]
#[post("/quiz/update")]
pub async fn update(
    state: web::Data<HttpState>,
    flash: FlashMessages,
    form: web::Form<QuizForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    let errors = form.validate(true);
    if !errors.is_empty() {
        let view = CrudView::update(form).with_errors(errors);
        return Ok(HttpResponse::BadRequest().json(view));
    }
    let saved = state.quiz_commands.update_quiz(form.to_entity()).await?;
    let id = saved
        .id
        .ok_or_else(|| Error::internal("stored quiz has no id"))?;
    flash.set(FlashKind::Complete, messages::COMPLETE_UPDATE)?;
    Ok(redirect(&format!("{LIST_PATH}/{id}")))
}

/// Delete a quiz. Unknown ids succeed.
#[utoipa::path(
    post,
    path = "/quiz/delete",
    request_body(content = DeleteForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Deleted; redirect to the list", headers(("Location" = String, description = "Redirect target"))),
        (status = 400, description = "Missing or non-numeric id", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["quiz"],
    operation_id = "deleteQuiz"
)]
#[post("/quiz/delete")]
pub async fn delete(
    state: web::Data<HttpState>,
    flash: FlashMessages,
    form: web::Form<DeleteForm>,
) -> ApiResult<HttpResponse> {
    state
        .quiz_commands
        .delete_quiz_by_id(QuizId::new(form.id))
        .await?;
    flash.set(FlashKind::DeleteComplete, messages::COMPLETE_DELETE)?;
    Ok(redirect(LIST_PATH))
}

/// Grade a submitted answer.
#[utoipa::path(
    post,
    path = "/quiz/check",
    request_body(content = CheckForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Correct or incorrect message", body = AnswerView),
        (status = 400, description = "Missing or malformed id or answer", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["quiz"],
    operation_id = "checkQuiz"
)]
#[post("/quiz/check")]
pub async fn check(
    state: web::Data<HttpState>,
    form: web::Form<CheckForm>,
) -> ApiResult<HttpResponse> {
    let correct = state
        .quizzes
        .check_quiz(QuizId::new(form.id), form.answer)
        .await?;
    Ok(HttpResponse::Ok().json(AnswerView::new(correct)))
}

/// Register the quiz pages.
///
/// Malformed paths, query strings, and form bodies answer `400` with the JSON
/// error payload. `/quiz/play` is registered ahead of `/quiz/{id}`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::FormConfig::default().error_handler(malformed_input))
        .app_data(web::PathConfig::default().error_handler(malformed_input))
        .app_data(web::QueryConfig::default().error_handler(malformed_input))
        .service(show_list)
        .service(insert)
        .service(play)
        .service(show_update)
        .service(update)
        .service(delete)
        .service(check);
}

#[cfg(test)]
#[path = "quiz_tests.rs"]
mod tests;
