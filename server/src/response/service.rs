use axum::response::{IntoResponse, Response};
use axum::Json;
use kernel::prelude::path::EntitySet;
use serde::Serialize;

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
struct EntitySetResponse {
    name: &'static str,
    url: &'static str,
}

/// Lists the entity sets the catalog serves.
#[derive(Debug, Serialize)]
pub struct ServiceDocumentResponse {
    #[serde(rename = "@odata.context")]
    context: &'static str,
    value: Vec<EntitySetResponse>,
}

impl IntoResponse for ServiceDocumentResponse {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

pub struct ServicePresenter;

impl Exhaust<[EntitySet; 3]> for ServicePresenter {
    type To = ServiceDocumentResponse;
    fn emit(&self, input: [EntitySet; 3]) -> Self::To {
        let value = input
            .into_iter()
            .map(|set| EntitySetResponse {
                name: set.name(),
                url: set.name(),
            })
            .collect();
        ServiceDocumentResponse {
            context: super::METADATA,
            value,
        }
    }
}
