use kernel::prelude::entity::{Author, DestructAuthor};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorDto {
    pub id: i32,
    pub name: String,
}

impl From<Author> for AuthorDto {
    fn from(value: Author) -> Self {
        let DestructAuthor { id, name } = value.into_destruct();
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

pub struct GetAuthorDto {
    pub id: i32,
}
