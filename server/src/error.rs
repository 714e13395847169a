use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use error_stack::Report;
use kernel::KernelError;
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

impl ErrorStatus {
    pub fn status(&self) -> StatusCode {
        match self.0.current_context() {
            KernelError::InvalidKey | KernelError::Validation => StatusCode::BAD_REQUEST,
            KernelError::NotFound => StatusCode::NOT_FOUND,
            KernelError::Unsupported => StatusCode::METHOD_NOT_ALLOWED,
            KernelError::OutOfStock => StatusCode::CONFLICT,
            KernelError::Timeout => StatusCode::SERVICE_UNAVAILABLE,
            KernelError::Concurrency | KernelError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        let context = self.0.current_context();
        if self.status().is_server_error() {
            return context.to_string();
        }
        let detail = self
            .0
            .frames()
            .find_map(|frame| {
                frame
                    .downcast_ref::<String>()
                    .cloned()
                    .or_else(|| frame.downcast_ref::<&'static str>().map(|s| s.to_string()))
            });
        match detail {
            Some(detail) => format!("{context}: {detail}"),
            None => context.to_string(),
        }
    }
}

impl From<Report<KernelError>> for ErrorStatus {
    fn from(e: Report<KernelError>) -> Self {
        ErrorStatus(e)
    }
}

impl From<KernelError> for ErrorStatus {
    fn from(e: KernelError) -> Self {
        ErrorStatus(Report::new(e))
    }
}

impl IntoResponse for ErrorStatus {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{:?}", self.0);
        } else {
            tracing::debug!("{:?}", self.0);
        }
        let body = json!({
            "error": {
                "code": status.as_u16().to_string(),
                "message": self.message(),
            }
        });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod test {
    use axum::http::StatusCode;
    use error_stack::Report;
    use kernel::KernelError;

    use super::ErrorStatus;

    #[test]
    fn status_mapping() {
        let cases = [
            (KernelError::InvalidKey, StatusCode::BAD_REQUEST),
            (KernelError::Validation, StatusCode::BAD_REQUEST),
            (KernelError::NotFound, StatusCode::NOT_FOUND),
            (KernelError::Unsupported, StatusCode::METHOD_NOT_ALLOWED),
            (KernelError::OutOfStock, StatusCode::CONFLICT),
            (KernelError::Concurrency, StatusCode::INTERNAL_SERVER_ERROR),
            (KernelError::Timeout, StatusCode::SERVICE_UNAVAILABLE),
            (KernelError::Internal, StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (error, status) in cases {
            assert_eq!(ErrorStatus::from(error).status(), status);
        }
    }

    #[test]
    fn message_carries_the_latest_detail() {
        let report = Report::new(KernelError::Validation)
            .attach_printable("amount must be positive".to_string());
        assert_eq!(
            ErrorStatus::from(report).message(),
            "Validation failed: amount must be positive"
        );
    }

    #[test]
    fn internal_details_stay_in_the_log() {
        let report = Report::new(KernelError::Internal).attach_printable("pool exhausted");
        assert_eq!(ErrorStatus::from(report).message(), "Internal kernel error");
    }

    #[test]
    fn store_faults_are_server_errors() {
        let timeout = ErrorStatus::from(
            Report::new(KernelError::Timeout).attach_printable("lock wait exceeded"),
        );
        assert!(timeout.status().is_server_error());
        assert_eq!(timeout.message(), KernelError::Timeout.to_string());

        let collision = ErrorStatus::from(
            Report::new(KernelError::Concurrency).attach_printable("duplicate order id"),
        );
        assert!(collision.status().is_server_error());
        assert_eq!(collision.message(), KernelError::Concurrency.to_string());

        let oversold = ErrorStatus::from(KernelError::OutOfStock);
        assert!(oversold.status().is_client_error());
    }
}
