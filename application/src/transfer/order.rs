use time::OffsetDateTime;
use uuid::Uuid;

use kernel::prelude::entity::{DestructOrder, Order};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDto {
    pub id: Uuid,
    pub book_id: i32,
    pub amount: i32,
    pub country_code: Option<String>,
    pub created_at: OffsetDateTime,
    pub created_by: String,
    pub modified_at: OffsetDateTime,
    pub modified_by: String,
}

impl From<Order> for OrderDto {
    fn from(value: Order) -> Self {
        let DestructOrder {
            id,
            book_id,
            amount,
            country_code,
            audit,
        } = value.into_destruct();
        Self {
            id: id.into(),
            book_id: book_id.into(),
            amount: amount.into(),
            country_code: country_code.map(Into::into),
            created_at: audit.created_at().clone().into(),
            created_by: audit.created_by().clone().into(),
            modified_at: audit.modified_at().clone().into(),
            modified_by: audit.modified_by().clone().into(),
        }
    }
}

pub struct GetOrderDto {
    pub id: Uuid,
}

pub struct PlaceOrderDto {
    pub book_id: i32,
    pub amount: i32,
    pub country_code: Option<String>,
}

pub struct UpdateOrderDto {
    pub id: Uuid,
    /// `None` keeps the current country, `Some(None)` clears it.
    pub country_code: Option<Option<String>>,
}

pub struct DeleteOrderDto {
    pub id: Uuid,
}
