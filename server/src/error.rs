use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use error_stack::Report;
use kernel::{ErrorKind, KernelError};
use serde_json::json;
use std::process::{ExitCode, Termination};

#[derive(Debug)]
pub struct StackTrace(Report<KernelError>);

impl From<Report<KernelError>> for StackTrace {
    fn from(e: Report<KernelError>) -> Self {
        StackTrace(e)
    }
}

impl Termination for StackTrace {
    fn report(self) -> ExitCode {
        self.0.report()
    }
}

#[derive(Debug)]
pub struct ErrorStatus(Report<KernelError>);

impl From<Report<KernelError>> for ErrorStatus {
    fn from(e: Report<KernelError>) -> Self {
        ErrorStatus(e)
    }
}

impl ErrorStatus {
    fn status(&self) -> StatusCode {
        match self.0.current_context().kind() {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Timeout => StatusCode::REQUEST_TIMEOUT,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ErrorStatus {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{:?}", self.0);
        } else {
            tracing::debug!("{:?}", self.0);
        }
        let body = json!({ "error": self.0.current_context().to_string() });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod test {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use error_stack::Report;
    use kernel::prelude::entity::BookingTransition;
    use kernel::KernelError;

    use crate::error::ErrorStatus;

    fn status_of(error: KernelError) -> StatusCode {
        ErrorStatus::from(Report::new(error)).into_response().status()
    }

    #[test]
    fn status_by_kind() {
        assert_eq!(status_of(KernelError::InvalidBookingRange), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(KernelError::InvalidGuestCount), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(KernelError::InvalidValue), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(KernelError::PropertyNotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_of(KernelError::BookingNotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_of(KernelError::PropertyUnavailable), StatusCode::CONFLICT);
        assert_eq!(
            status_of(KernelError::InvalidStateTransition(BookingTransition::Cancel)),
            StatusCode::CONFLICT
        );
        assert_eq!(status_of(KernelError::Concurrency), StatusCode::CONFLICT);
        assert_eq!(status_of(KernelError::Timeout), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(status_of(KernelError::Internal), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn context_survives_attachments() {
        let report = Report::new(KernelError::BookingNotFound).attach_printable("booking id: x");
        assert_eq!(
            ErrorStatus::from(report).into_response().status(),
            StatusCode::NOT_FOUND
        );
    }
}
