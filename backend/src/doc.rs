//! OpenAPI document for the quiz pages and health probes.
//!
//! Served by Swagger UI at `/docs` in debug builds and printed by the
//! `openapi-dump` binary.

use utoipa::OpenApi;

use crate::inbound::http::quiz::{CheckForm, DeleteForm};
use crate::inbound::http::quiz_form::{FieldError, QuizForm};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::views::{AnswerView, CrudView, PlayView, QuizItem, ViewName};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Quiz backend API",
        description = "Register, edit, and play true/false quizzes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::quiz::show_list,
        crate::inbound::http::quiz::insert,
        crate::inbound::http::quiz::play,
        crate::inbound::http::quiz::show_update,
        crate::inbound::http::quiz::update,
        crate::inbound::http::quiz::delete,
        crate::inbound::http::quiz::check,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        QuizForm,
        FieldError,
        DeleteForm,
        CheckForm,
        QuizItem,
        ViewName,
        CrudView,
        PlayView,
        AnswerView,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "quiz", description = "Quiz registration and play"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;
