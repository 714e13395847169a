use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Order, OrderId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait OrderQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_all(
        &self,
        con: &mut Self::Transaction,
    ) -> error_stack::Result<Vec<Order>, KernelError>;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &OrderId,
    ) -> error_stack::Result<Option<Order>, KernelError>;
}

pub trait DependOnOrderQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type OrderQuery: OrderQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn order_query(&self) -> &Self::OrderQuery;
}
