use sqlx::PgConnection;

use kernel::interface::query::AuthorQuery;
use kernel::prelude::entity::{Author, AuthorId, AuthorName};
use kernel::KernelError;

use crate::database::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresAuthorRepository;

#[async_trait::async_trait]
impl AuthorQuery for PostgresAuthorRepository {
    type Transaction = PostgresTransaction;

    async fn find_all(
        &self,
        con: &mut PostgresTransaction,
    ) -> error_stack::Result<Vec<Author>, KernelError> {
        PgAuthorInternal::find_all(con).await
    }

    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &AuthorId,
    ) -> error_stack::Result<Option<Author>, KernelError> {
        PgAuthorInternal::find_by_id(con, id).await
    }
}

#[derive(sqlx::FromRow)]
struct AuthorRow {
    id: i32,
    name: String,
}

impl From<AuthorRow> for Author {
    fn from(value: AuthorRow) -> Self {
        Author::new(AuthorId::new(value.id), AuthorName::new(value.name))
    }
}

pub(in crate::database) struct PgAuthorInternal;

impl PgAuthorInternal {
    async fn find_all(con: &mut PgConnection) -> error_stack::Result<Vec<Author>, KernelError> {
        let rows = sqlx::query_as::<_, AuthorRow>(
            // language=postgresql
            r#"
            SELECT id, name
            FROM authors
            ORDER BY id
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Author::from).collect())
    }

    async fn find_by_id(
        con: &mut PgConnection,
        id: &AuthorId,
    ) -> error_stack::Result<Option<Author>, KernelError> {
        let row = sqlx::query_as::<_, AuthorRow>(
            // language=postgresql
            r#"
            SELECT id, name
            FROM authors
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Author::from))
    }
}

#[cfg(test)]
mod test {
    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::AuthorQuery;
    use kernel::prelude::entity::AuthorId;
    use kernel::KernelError;

    use crate::database::{PostgresAuthorRepository, PostgresDatabase};

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn test() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;

        let all = PostgresAuthorRepository.find_all(&mut con).await?;
        let ids = all.iter().map(|a| i32::from(*a.id())).collect::<Vec<i32>>();
        assert_eq!(ids, vec![101, 107, 150, 170]);

        let found = PostgresAuthorRepository
            .find_by_id(&mut con, &AuthorId::new(101))
            .await?;
        assert_eq!(found.as_ref(), all.first());
        Ok(())
    }
}
