mod id;
mod name;

pub use self::{id::*, name::*};
use destructure::Destructure;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Author {
    id: AuthorId,
    name: AuthorName,
}

impl Author {
    pub fn new(id: AuthorId, name: AuthorName) -> Self {
        Self { id, name }
    }
}
