use kernel::prelude::entity::{Book, DestructBook};

/// Book as read by clients. `title` carries the rendered discount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDto {
    pub id: i32,
    pub title: String,
    pub author_id: i32,
    pub stock: i32,
    pub discount: Option<i32>,
}

impl From<Book> for BookDto {
    fn from(value: Book) -> Self {
        let title = value.display_title();
        let DestructBook {
            id,
            author_id,
            stock,
            discount,
            ..
        } = value.into_destruct();
        Self {
            id: id.into(),
            title,
            author_id: author_id.into(),
            stock: stock.into(),
            discount: discount.map(Into::into),
        }
    }
}

pub struct GetBookDto {
    pub id: i32,
}

/// Full replacement of the book addressed by `id`.
pub struct PutBookDto {
    pub id: i32,
    /// `ID` repeated in the payload, if the client sent one.
    pub body_id: Option<i32>,
    pub title: String,
    pub author_id: i32,
    pub stock: i32,
    pub discount: Option<i32>,
}
