use error_stack::Report;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{AuthorQuery, BookQuery, DependOnAuthorQuery, DependOnBookQuery};
use kernel::interface::update::{BookModifier, DependOnBookModifier};
use kernel::prelude::entity::{AuthorId, Book, BookDiscount, BookId, BookStock, BookTitle};
use kernel::KernelError;

use crate::transfer::{BookDto, GetBookDto, PutBookDto};

#[async_trait::async_trait]
pub trait GetBookService: 'static + Sync + Send + DependOnBookQuery {
    async fn get_all_books(&self) -> error_stack::Result<Vec<BookDto>, KernelError> {
        let mut connection = self.database_connection().snapshot().await?;
        let books = self.book_query().find_all(&mut connection).await?;
        Ok(books.into_iter().map(BookDto::from).collect())
    }

    async fn get_book(&self, dto: &GetBookDto) -> error_stack::Result<Option<BookDto>, KernelError> {
        let mut connection = self.database_connection().snapshot().await?;
        let id = BookId::new(dto.id);
        let book = self.book_query().find_by_id(&mut connection, &id).await?;
        Ok(book.map(BookDto::from))
    }
}

impl<T> GetBookService for T where T: DependOnBookQuery {}

#[async_trait::async_trait]
pub trait UpdateBookService:
    'static + Sync + Send + DependOnAuthorQuery + DependOnBookModifier
{
    /// Creates or fully replaces the book. A title that still carries the
    /// rendered suffix of the payload's discount is stored without it.
    async fn put_book(&self, dto: PutBookDto) -> error_stack::Result<BookDto, KernelError> {
        if let Some(body_id) = dto.body_id.filter(|body_id| *body_id != dto.id) {
            return Err(Report::new(KernelError::Validation).attach_printable(format!(
                "payload ID {body_id} does not match key {}",
                dto.id
            )));
        }
        let stock = BookStock::new(dto.stock);
        if stock.is_negative() {
            return Err(Report::new(KernelError::Validation)
                .attach_printable(format!("stock must not be negative, got {}", dto.stock)));
        }
        let discount = dto.discount.map(BookDiscount::new);
        if discount.is_some_and(|discount| !discount.is_valid()) {
            return Err(Report::new(KernelError::Validation)
                .attach_printable("discount must be between 0 and 100"));
        }
        let title = BookTitle::from_display(dto.title, discount.as_ref());
        if title.is_blank() {
            return Err(Report::new(KernelError::Validation).attach_printable("title is empty"));
        }

        let mut connection = self.database_connection().transact().await?;
        let author_id = AuthorId::new(dto.author_id);
        if self
            .author_query()
            .find_by_id(&mut connection, &author_id)
            .await?
            .is_none()
        {
            return Err(Report::new(KernelError::Validation)
                .attach_printable(format!("author {} does not exist", dto.author_id)));
        }

        let book = Book::new(BookId::new(dto.id), title, author_id, stock, discount);
        self.book_modifier().upsert(&mut connection, &book).await?;
        connection.commit().await?;
        tracing::debug!(book = dto.id, "book replaced");

        Ok(BookDto::from(book))
    }
}

impl<T> UpdateBookService for T where T: DependOnAuthorQuery + DependOnBookModifier {}
