use kernel::interface::query::AuthorQuery;
use kernel::prelude::entity::{Author, AuthorId};
use kernel::KernelError;

use crate::database::MemoryTransaction;

pub struct MemoryAuthorRepository;

#[async_trait::async_trait]
impl AuthorQuery for MemoryAuthorRepository {
    type Transaction = MemoryTransaction;

    async fn find_all(
        &self,
        con: &mut MemoryTransaction,
    ) -> error_stack::Result<Vec<Author>, KernelError> {
        Ok(con.authors.values().cloned().collect())
    }

    async fn find_by_id(
        &self,
        con: &mut MemoryTransaction,
        id: &AuthorId,
    ) -> error_stack::Result<Option<Author>, KernelError> {
        Ok(con.authors.get(id).cloned())
    }
}
