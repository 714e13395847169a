use kernel::interface::database::DatabaseConnection;
use kernel::interface::query::{AuthorQuery, DependOnAuthorQuery};
use kernel::prelude::entity::AuthorId;
use kernel::KernelError;

use crate::transfer::{AuthorDto, GetAuthorDto};

#[async_trait::async_trait]
pub trait GetAuthorService: 'static + Sync + Send + DependOnAuthorQuery {
    async fn get_all_authors(&self) -> error_stack::Result<Vec<AuthorDto>, KernelError> {
        let mut connection = self.database_connection().snapshot().await?;
        let authors = self.author_query().find_all(&mut connection).await?;
        Ok(authors.into_iter().map(AuthorDto::from).collect())
    }

    async fn get_author(
        &self,
        dto: &GetAuthorDto,
    ) -> error_stack::Result<Option<AuthorDto>, KernelError> {
        let mut connection = self.database_connection().snapshot().await?;
        let id = AuthorId::new(dto.id);
        let author = self.author_query().find_by_id(&mut connection, &id).await?;
        Ok(author.map(AuthorDto::from))
    }
}

impl<T> GetAuthorService for T where T: DependOnAuthorQuery {}
