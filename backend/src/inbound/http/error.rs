//! HTTP adapter mapping for domain errors.
//!
//! The domain [`Error`] stays HTTP-agnostic; this module assigns status codes,
//! echoes the trace id as a header and redacts internal failures before they
//! reach the client.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::{error, warn};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Replace internal failures with a generic payload, keeping the trace id.
///
/// Storage messages and `draw_failure` details stay in the logs only.
fn redact_if_internal(error: &Error) -> Error {
    match error.code() {
        ErrorCode::InternalError => {
            error!(
                message = error.message(),
                details = ?error.details(),
                trace_id = error.trace_id(),
                "request failed with internal error"
            );
            with_trace_of(error, Error::internal("Internal server error"))
        }
        ErrorCode::ServiceUnavailable => {
            warn!(
                message = error.message(),
                trace_id = error.trace_id(),
                "request failed: dependency unavailable"
            );
            with_trace_of(error, Error::service_unavailable("Service temporarily unavailable"))
        }
        _ => error.clone(),
    }
}

fn with_trace_of(source: &Error, redacted: Error) -> Error {
    match source.trace_id() {
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

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}
