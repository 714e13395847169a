use crate::controller::{Intake, TryIntake};
use crate::request::parse_body;
use application::transfer::{DeleteOrderDto, GetOrderDto, PlaceOrderDto, UpdateOrderDto};
use error_stack::Report;
use kernel::KernelError;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use uuid::Uuid;

const IMMUTABLE_FIELDS: [&str; 2] = ["book_ID", "amount"];

#[derive(Debug)]
pub struct GetOrderRequest {
    id: Uuid,
}

impl GetOrderRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct CreateOrderRequest {
    body: Value,
}

impl CreateOrderRequest {
    pub fn new(body: Value) -> Self {
        Self { body }
    }
}

#[derive(Debug)]
pub struct UpdateOrderRequest {
    id: Uuid,
    body: Value,
}

impl UpdateOrderRequest {
    pub fn new(id: Uuid, body: Value) -> Self {
        Self { id, body }
    }
}

#[derive(Debug)]
pub struct DeleteOrderRequest {
    id: Uuid,
}

impl DeleteOrderRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

#[derive(Debug, Deserialize)]
struct CreateOrderBody {
    #[serde(rename = "book_ID")]
    book_id: i32,
    amount: i32,
    #[serde(default)]
    country_code: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UpdateOrderBody {
    #[serde(default, deserialize_with = "present")]
    country_code: Option<Option<String>>,
}

// Tells an explicit `null` apart from a missing field.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

pub struct OrderTransformer;

impl Intake<GetOrderRequest> for OrderTransformer {
    type To = GetOrderDto;
    fn emit(&self, input: GetOrderRequest) -> Self::To {
        GetOrderDto { id: input.id }
    }
}

impl TryIntake<CreateOrderRequest> for OrderTransformer {
    type To = PlaceOrderDto;
    type Error = Report<KernelError>;
    fn emit(&self, input: CreateOrderRequest) -> Result<Self::To, Self::Error> {
        let CreateOrderBody {
            book_id,
            amount,
            country_code,
        } = parse_body(input.body)?;
        Ok(PlaceOrderDto {
            book_id,
            amount,
            country_code,
        })
    }
}

impl TryIntake<UpdateOrderRequest> for OrderTransformer {
    type To = UpdateOrderDto;
    type Error = Report<KernelError>;
    fn emit(&self, input: UpdateOrderRequest) -> Result<Self::To, Self::Error> {
        if let Some(field) = IMMUTABLE_FIELDS
            .into_iter()
            .find(|field| input.body.get(field).is_some())
        {
            return Err(Report::new(KernelError::Validation)
                .attach_printable(format!("`{field}` cannot change after placement")));
        }
        let UpdateOrderBody { country_code } = parse_body(input.body)?;
        Ok(UpdateOrderDto {
            id: input.id,
            country_code,
        })
    }
}

impl Intake<DeleteOrderRequest> for OrderTransformer {
    type To = DeleteOrderDto;
    fn emit(&self, input: DeleteOrderRequest) -> Self::To {
        DeleteOrderDto { id: input.id }
    }
}
