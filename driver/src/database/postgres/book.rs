use sqlx::PgConnection;

use kernel::interface::query::BookQuery;
use kernel::interface::update::BookModifier;
use kernel::prelude::entity::{AuthorId, Book, BookDiscount, BookId, BookStock, BookTitle};
use kernel::KernelError;

use crate::database::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresBookRepository;

#[async_trait::async_trait]
impl BookQuery for PostgresBookRepository {
    type Transaction = PostgresTransaction;

    async fn find_all(
        &self,
        con: &mut PostgresTransaction,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        PgBookInternal::find_all(con).await
    }

    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        PgBookInternal::find_by_id(con, id).await
    }

    async fn find_by_id_for_update(
        &self,
        con: &mut PostgresTransaction,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        PgBookInternal::find_by_id_for_update(con, id).await
    }
}

#[async_trait::async_trait]
impl BookModifier for PostgresBookRepository {
    type Transaction = PostgresTransaction;

    async fn upsert(
        &self,
        con: &mut PostgresTransaction,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        PgBookInternal::upsert(con, book).await
    }
}

#[derive(sqlx::FromRow)]
struct BookRow {
    id: i32,
    title: String,
    author_id: i32,
    stock: i32,
    discount: Option<i32>,
}

impl From<BookRow> for Book {
    fn from(value: BookRow) -> Self {
        Book::new(
            BookId::new(value.id),
            BookTitle::new(value.title),
            AuthorId::new(value.author_id),
            BookStock::new(value.stock),
            value.discount.map(BookDiscount::new),
        )
    }
}

pub(in crate::database) struct PgBookInternal;

impl PgBookInternal {
    async fn find_all(con: &mut PgConnection) -> error_stack::Result<Vec<Book>, KernelError> {
        let rows = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, title, author_id, stock, discount
            FROM books
            ORDER BY id
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn find_by_id(
        con: &mut PgConnection,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        let row = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, title, author_id, stock, discount
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Book::from))
    }

    async fn find_by_id_for_update(
        con: &mut PgConnection,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        let row = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, title, author_id, stock, discount
            FROM books
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Book::from))
    }

    async fn upsert(con: &mut PgConnection, book: &Book) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            INSERT INTO books (id, title, author_id, stock, discount)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE
            SET title = $2, author_id = $3, stock = $4, discount = $5
            "#,
        )
        .bind(book.id().as_ref())
        .bind(book.title().as_ref())
        .bind(book.author_id().as_ref())
        .bind(book.stock().as_ref())
        .bind(book.discount().as_ref().map(|d| *d.as_ref()))
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::BookQuery;
    use kernel::interface::update::BookModifier;
    use kernel::prelude::entity::{AuthorId, Book, BookId, BookStock, BookTitle};
    use kernel::KernelError;

    use crate::database::{PostgresBookRepository, PostgresDatabase};

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn test() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;

        let ids = PostgresBookRepository
            .find_all(&mut con)
            .await?
            .iter()
            .map(|b| i32::from(*b.id()))
            .collect::<Vec<i32>>();
        assert_eq!(ids, vec![201, 207, 251, 252, 271]);

        let id = BookId::new(9001);
        let book = Book::new(
            id,
            BookTitle::new("test"),
            AuthorId::new(170),
            BookStock::new(1),
            None,
        );
        PostgresBookRepository.upsert(&mut con, &book).await?;
        let found = PostgresBookRepository
            .find_by_id_for_update(&mut con, &id)
            .await?;
        assert_eq!(found, Some(book.clone()));

        let book = book.reconstruct(|b| b.title = BookTitle::new("test2"));
        PostgresBookRepository.upsert(&mut con, &book).await?;
        let found = PostgresBookRepository.find_by_id(&mut con, &id).await?;
        assert_eq!(found, Some(book));

        // dropped without commit
        Ok(())
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn negative_stock_is_rejected() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;
        let book = Book::new(
            BookId::new(9002),
            BookTitle::new("test"),
            AuthorId::new(170),
            BookStock::new(-1),
            None,
        );
        let report = PostgresBookRepository
            .upsert(&mut con, &book)
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Validation);
        Ok(())
    }
}
