use crate::controller::Intake;
use application::transfer::GetAuthorDto;

#[derive(Debug)]
pub struct GetAuthorRequest {
    id: i32,
}

impl GetAuthorRequest {
    pub fn new(id: i32) -> Self {
        Self { id }
    }
}

pub struct AuthorTransformer;

impl Intake<GetAuthorRequest> for AuthorTransformer {
    type To = GetAuthorDto;
    fn emit(&self, input: GetAuthorRequest) -> Self::To {
        GetAuthorDto { id: input.id }
    }
}
