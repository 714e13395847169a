use axum::extract::rejection::JsonRejection;
use axum::Json;
use error_stack::{Report, ResultExt};
use kernel::KernelError;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub use self::{author::*, book::*, order::*};

mod author;
mod book;
mod order;

/// Unwraps the JSON body of a write request. Anything that is not a JSON
/// document is a validation failure.
pub fn json_body(body: Result<Json<Value>, JsonRejection>) -> error_stack::Result<Value, KernelError> {
    body.map(|Json(value)| value).map_err(|rejection| {
        Report::new(KernelError::Validation).attach_printable(rejection.body_text())
    })
}

fn parse_body<T: DeserializeOwned>(body: Value) -> error_stack::Result<T, KernelError> {
    serde_json::from_value(body)
        .change_context_lazy(|| KernelError::Validation)
        .attach_printable_lazy(|| "Malformed request payload")
}
