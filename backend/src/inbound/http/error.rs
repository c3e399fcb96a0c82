//! HTTP mapping for domain errors.
//!
//! Handlers return [`ApiResult`]; Actix turns the error side into a JSON
//! body, a status code, and a `trace-id` header. Messages of internal errors
//! never reach clients.

use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if error.code() != ErrorCode::InternalError {
        return error.clone();
    }
    error!(message = error.message(), trace_id = ?error.trace_id(), "internal error");
    let redacted = Error::internal("Internal server error");
    match error.trace_id() {
        Some(id) => redacted.with_trace_id(id.to_owned()),
        None => redacted,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(redact_if_internal(self))
    }
}

/// Turn an extractor failure (bad path segment, query, or form body) into a
/// `400` domain error.
///
/// Registered on `PathConfig`, `QueryConfig`, and `FormConfig` so malformed
/// input shares the JSON error shape of every other failure.
pub fn malformed_input<E>(err: E, req: &HttpRequest) -> actix_web::Error
where
    E: std::fmt::Display,
{
    Error::invalid_request(format!("malformed request: {err}"))
        .with_details(serde_json::json!({ "path": req.path() }))
        .into()
}
