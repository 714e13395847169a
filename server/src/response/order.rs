use application::transfer::OrderDto;
use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::prelude::path::EntitySet;
use kernel::KernelError;
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::controller::{Exhaust, TryExhaust};
use crate::error::ErrorStatus;
use crate::response::{CollectionResponse, EntityResponse};

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    #[serde(rename = "ID")]
    id: Uuid,
    #[serde(rename = "book_ID")]
    book_id: i32,
    amount: i32,
    country_code: Option<String>,
    #[serde(rename = "createdAt", with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
    #[serde(rename = "createdBy")]
    created_by: String,
    #[serde(rename = "modifiedAt", with = "time::serde::rfc3339")]
    modified_at: OffsetDateTime,
    #[serde(rename = "modifiedBy")]
    modified_by: String,
}

impl From<OrderDto> for OrderResponse {
    fn from(value: OrderDto) -> Self {
        Self {
            id: value.id,
            book_id: value.book_id,
            amount: value.amount,
            country_code: value.country_code,
            created_at: value.created_at,
            created_by: value.created_by,
            modified_at: value.modified_at,
            modified_by: value.modified_by,
        }
    }
}

/// Order that was just placed, answered with `201 Created`.
#[derive(Debug)]
pub struct CreatedOrderResponse(EntityResponse<OrderResponse>, String);

impl IntoResponse for CreatedOrderResponse {
    fn into_response(self) -> Response {
        let CreatedOrderResponse(entity, location) = self;
        (StatusCode::CREATED, [(LOCATION, location)], entity).into_response()
    }
}

pub struct OrderPresenter;

impl Exhaust<Vec<OrderDto>> for OrderPresenter {
    type To = CollectionResponse<OrderResponse>;
    fn emit(&self, input: Vec<OrderDto>) -> Self::To {
        let value = input.into_iter().map(OrderResponse::from).collect();
        CollectionResponse::new(EntitySet::Orders, value)
    }
}

impl TryExhaust<Option<OrderDto>> for OrderPresenter {
    type To = EntityResponse<OrderResponse>;
    type Error = ErrorStatus;
    fn emit(&self, input: Option<OrderDto>) -> Result<Self::To, Self::Error> {
        let order = input.ok_or(KernelError::NotFound)?;
        Ok(EntityResponse::new(EntitySet::Orders, order.into()))
    }
}

impl Exhaust<OrderDto> for OrderPresenter {
    type To = EntityResponse<OrderResponse>;
    fn emit(&self, input: OrderDto) -> Self::To {
        EntityResponse::new(EntitySet::Orders, input.into())
    }
}

pub struct PlacedOrderPresenter;

impl Exhaust<OrderDto> for PlacedOrderPresenter {
    type To = CreatedOrderResponse;
    fn emit(&self, input: OrderDto) -> Self::To {
        let location = format!("/catalog/{}({})", EntitySet::Orders.name(), input.id);
        CreatedOrderResponse(EntityResponse::new(EntitySet::Orders, input.into()), location)
    }
}

pub struct DeletedPresenter;

impl Exhaust<()> for DeletedPresenter {
    type To = StatusCode;
    fn emit(&self, _: ()) -> Self::To {
        StatusCode::NO_CONTENT
    }
}
