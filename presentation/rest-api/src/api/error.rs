use poem::{IntoResponse, Response, http::StatusCode};
use poem_openapi::{Object, payload::Json};

use business::domain::errors::{DomainError, ErrorKind};

#[derive(Object, Debug)]
pub struct ErrorResponse {
    /// Error kind, e.g. `ValidationError` or `InsufficientStock`
    pub name: String,
    /// Machine-readable error code, e.g. `sweet.price_negative`
    pub message: String,
}

impl ErrorResponse {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            name: kind.name().to_string(),
            message: message.into(),
        }
    }
}

pub trait IntoErrorResponse {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>);
}

/// The single place where an error kind becomes an HTTP status.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation | ErrorKind::InvalidId | ErrorKind::InsufficientStock => {
            StatusCode::BAD_REQUEST
        }
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Forbidden => StatusCode::FORBIDDEN,
        ErrorKind::Unauthenticated => StatusCode::UNAUTHORIZED,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl<E: DomainError> IntoErrorResponse for E {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        let kind = self.kind();
        if kind == ErrorKind::Internal {
            tracing::error!(error = ?self, "Request failed with an internal error");
        }

        (
            status_for(kind),
            Json(ErrorResponse::new(kind, self.to_string())),
        )
    }
}

/// Body for request values rejected before reaching a use case.
pub fn validation_error(message: &str) -> Json<ErrorResponse> {
    Json(ErrorResponse::new(ErrorKind::Validation, message))
}

/// Renders errors raised by the framework itself (failed bearer auth,
/// unparsable bodies or params, unknown routes) with the same body shape as
/// use-case errors.
pub fn framework_error_response(err: &poem::Error) -> (StatusCode, Json<ErrorResponse>) {
    let status = err.status();
    let (kind, code) = match status {
        StatusCode::UNAUTHORIZED => (ErrorKind::Unauthenticated, "auth.unauthenticated"),
        StatusCode::FORBIDDEN => (ErrorKind::Forbidden, "auth.forbidden"),
        StatusCode::NOT_FOUND => (ErrorKind::NotFound, "request.not_found"),
        s if s.is_client_error() => (ErrorKind::Validation, "request.invalid"),
        _ => (ErrorKind::Internal, "internal.unexpected"),
    };

    if kind == ErrorKind::Internal {
        tracing::error!(error = %err, "Request failed before reaching a handler");
    } else {
        tracing::debug!(error = %err, status = %status, "Request rejected");
    }

    (status_for(kind), Json(ErrorResponse::new(kind, code)))
}

pub async fn render_framework_error(err: poem::Error) -> Response {
    let (status, body) = framework_error_response(&err);
    body.with_status(status).into_response()
}
