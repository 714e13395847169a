use application::transfer::AuthorDto;
use kernel::prelude::path::EntitySet;
use kernel::KernelError;
use serde::Serialize;

use crate::controller::{Exhaust, TryExhaust};
use crate::error::ErrorStatus;
use crate::response::{CollectionResponse, EntityResponse};

#[derive(Debug, Serialize)]
pub struct AuthorResponse {
    #[serde(rename = "ID")]
    id: i32,
    name: String,
}

impl From<AuthorDto> for AuthorResponse {
    fn from(value: AuthorDto) -> Self {
        Self {
            id: value.id,
            name: value.name,
        }
    }
}

pub struct AuthorPresenter;

impl Exhaust<Vec<AuthorDto>> for AuthorPresenter {
    type To = CollectionResponse<AuthorResponse>;
    fn emit(&self, input: Vec<AuthorDto>) -> Self::To {
        let value = input.into_iter().map(AuthorResponse::from).collect();
        CollectionResponse::new(EntitySet::Authors, value)
    }
}

impl TryExhaust<Option<AuthorDto>> for AuthorPresenter {
    type To = EntityResponse<AuthorResponse>;
    type Error = ErrorStatus;
    fn emit(&self, input: Option<AuthorDto>) -> Result<Self::To, Self::Error> {
        let author = input.ok_or(KernelError::NotFound)?;
        Ok(EntityResponse::new(EntitySet::Authors, author.into()))
    }
}
