use crate::controller::{Intake, TryIntake};
use crate::request::parse_body;
use application::transfer::{GetBookDto, PutBookDto};
use error_stack::Report;
use kernel::KernelError;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug)]
pub struct GetBookRequest {
    id: i32,
}

impl GetBookRequest {
    pub fn new(id: i32) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct PutBookRequest {
    id: i32,
    body: Value,
}

impl PutBookRequest {
    pub fn new(id: i32, body: Value) -> Self {
        Self { id, body }
    }
}

#[derive(Debug, Deserialize)]
struct PutBookBody {
    #[serde(rename = "ID", default)]
    id: Option<i32>,
    title: String,
    #[serde(rename = "author_ID")]
    author_id: i32,
    stock: i32,
    #[serde(default)]
    discount: Option<i32>,
}

pub struct BookTransformer;

impl Intake<GetBookRequest> for BookTransformer {
    type To = GetBookDto;
    fn emit(&self, input: GetBookRequest) -> Self::To {
        GetBookDto { id: input.id }
    }
}

impl TryIntake<PutBookRequest> for BookTransformer {
    type To = PutBookDto;
    type Error = Report<KernelError>;
    fn emit(&self, input: PutBookRequest) -> Result<Self::To, Self::Error> {
        let PutBookBody {
            id,
            title,
            author_id,
            stock,
            discount,
        } = parse_body(input.body)?;
        Ok(PutBookDto {
            id: input.id,
            body_id: id,
            title,
            author_id,
            stock,
            discount,
        })
    }
}
