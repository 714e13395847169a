use error_stack::Report;
use uuid::Uuid;

use kernel::interface::query::OrderQuery;
use kernel::interface::update::OrderModifier;
use kernel::prelude::entity::{Order, OrderId};
use kernel::KernelError;

use crate::database::MemoryTransaction;

pub struct MemoryOrderRepository;

#[async_trait::async_trait]
impl OrderQuery for MemoryOrderRepository {
    type Transaction = MemoryTransaction;

    async fn find_all(
        &self,
        con: &mut MemoryTransaction,
    ) -> error_stack::Result<Vec<Order>, KernelError> {
        Ok(con.orders.values().cloned().collect())
    }

    async fn find_by_id(
        &self,
        con: &mut MemoryTransaction,
        id: &OrderId,
    ) -> error_stack::Result<Option<Order>, KernelError> {
        Ok(con.orders.get(id).cloned())
    }
}

#[async_trait::async_trait]
impl OrderModifier for MemoryOrderRepository {
    type Transaction = MemoryTransaction;

    async fn create(
        &self,
        con: &mut MemoryTransaction,
        order: &Order,
    ) -> error_stack::Result<(), KernelError> {
        if con.orders.contains_key(order.id()) {
            return Err(Report::new(KernelError::Concurrency)
                .attach_printable(format!("Order {} already exists", Uuid::from(*order.id()))));
        }
        con.orders.insert(*order.id(), order.clone());
        Ok(())
    }

    async fn update(
        &self,
        con: &mut MemoryTransaction,
        order: &Order,
    ) -> error_stack::Result<(), KernelError> {
        let stored = con.orders.get_mut(order.id()).ok_or_else(|| {
            Report::new(KernelError::NotFound)
                .attach_printable(format!("Order {} not found", Uuid::from(*order.id())))
        })?;
        *stored = order.clone();
        Ok(())
    }

    async fn delete(
        &self,
        con: &mut MemoryTransaction,
        order_id: &OrderId,
    ) -> error_stack::Result<(), KernelError> {
        con.orders.remove(order_id).map(|_| ()).ok_or_else(|| {
            Report::new(KernelError::NotFound)
                .attach_printable(format!("Order {} not found", Uuid::from(*order_id)))
        })
    }
}
