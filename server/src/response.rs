use axum::response::{IntoResponse, Response};
use axum::Json;
use kernel::prelude::path::EntitySet;
use serde::Serialize;

pub use self::{author::*, book::*, order::*, service::*};

mod author;
mod book;
mod order;
mod service;

const METADATA: &str = "$metadata";

#[derive(Debug, Serialize)]
pub struct CollectionResponse<T> {
    #[serde(rename = "@odata.context")]
    context: String,
    value: Vec<T>,
}

impl<T: Serialize> CollectionResponse<T> {
    pub fn new(set: EntitySet, value: Vec<T>) -> Self {
        Self {
            context: format!("{METADATA}#{}", set.name()),
            value,
        }
    }
}

impl<T: Serialize> IntoResponse for CollectionResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct EntityResponse<T> {
    #[serde(rename = "@odata.context")]
    context: String,
    #[serde(flatten)]
    entity: T,
}

impl<T: Serialize> EntityResponse<T> {
    pub fn new(set: EntitySet, entity: T) -> Self {
        Self {
            context: format!("{METADATA}#{}/$entity", set.name()),
            entity,
        }
    }
}

impl<T: Serialize> IntoResponse for EntityResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
