use application::transfer::BookDto;
use kernel::prelude::path::EntitySet;
use kernel::KernelError;
use serde::Serialize;

use crate::controller::{Exhaust, TryExhaust};
use crate::error::ErrorStatus;
use crate::response::{CollectionResponse, EntityResponse};

#[derive(Debug, Serialize)]
pub struct BookResponse {
    #[serde(rename = "ID")]
    id: i32,
    title: String,
    #[serde(rename = "author_ID")]
    author_id: i32,
    stock: i32,
    discount: Option<i32>,
}

impl From<BookDto> for BookResponse {
    fn from(value: BookDto) -> Self {
        Self {
            id: value.id,
            title: value.title,
            author_id: value.author_id,
            stock: value.stock,
            discount: value.discount,
        }
    }
}

pub struct BookPresenter;

impl Exhaust<Vec<BookDto>> for BookPresenter {
    type To = CollectionResponse<BookResponse>;
    fn emit(&self, input: Vec<BookDto>) -> Self::To {
        let value = input.into_iter().map(BookResponse::from).collect();
        CollectionResponse::new(EntitySet::Books, value)
    }
}

impl Exhaust<BookDto> for BookPresenter {
    type To = EntityResponse<BookResponse>;
    fn emit(&self, input: BookDto) -> Self::To {
        EntityResponse::new(EntitySet::Books, input.into())
    }
}

impl TryExhaust<Option<BookDto>> for BookPresenter {
    type To = EntityResponse<BookResponse>;
    type Error = ErrorStatus;
    fn emit(&self, input: Option<BookDto>) -> Result<Self::To, Self::Error> {
        let book = input.ok_or(KernelError::NotFound)?;
        Ok(EntityResponse::new(EntitySet::Books, book.into()))
    }
}
