use kernel::interface::query::BookQuery;
use kernel::interface::update::BookModifier;
use kernel::prelude::entity::{Book, BookId};
use kernel::KernelError;

use crate::database::MemoryTransaction;

pub struct MemoryBookRepository;

#[async_trait::async_trait]
impl BookQuery for MemoryBookRepository {
    type Transaction = MemoryTransaction;

    async fn find_all(
        &self,
        con: &mut MemoryTransaction,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        Ok(con.books.values().cloned().collect())
    }

    async fn find_by_id(
        &self,
        con: &mut MemoryTransaction,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        Ok(con.books.get(id).cloned())
    }

    // Write transactions already hold the writer lock.
    async fn find_by_id_for_update(
        &self,
        con: &mut MemoryTransaction,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        self.find_by_id(con, id).await
    }
}

#[async_trait::async_trait]
impl BookModifier for MemoryBookRepository {
    type Transaction = MemoryTransaction;

    async fn upsert(
        &self,
        con: &mut MemoryTransaction,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        con.books.insert(*book.id(), book.clone());
        Ok(())
    }
}
