use error_stack::{Report, ResultExt};
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{BookQuery, DependOnBookQuery, DependOnOrderQuery, OrderQuery};
use kernel::interface::update::{
    BookModifier, DependOnBookModifier, DependOnOrderModifier, OrderModifier,
};
use kernel::prelude::entity::{BookId, CountryCode, Identity, Order, OrderAmount, OrderId};
use kernel::KernelError;

use crate::transfer::{DeleteOrderDto, GetOrderDto, OrderDto, PlaceOrderDto, UpdateOrderDto};

fn country_code(code: Option<String>) -> error_stack::Result<Option<CountryCode>, KernelError> {
    match code.map(CountryCode::new) {
        Some(code) if !code.is_valid() => Err(Report::new(KernelError::Validation)
            .attach_printable(format!("invalid country code `{}`", String::from(code)))),
        code => Ok(code),
    }
}

/// Current time at the microsecond precision the stores keep.
fn now() -> error_stack::Result<OffsetDateTime, KernelError> {
    let now = OffsetDateTime::now_utc();
    now.replace_nanosecond(now.nanosecond() / 1_000 * 1_000)
        .change_context_lazy(|| KernelError::Internal)
}

#[async_trait::async_trait]
pub trait GetOrderService: 'static + Sync + Send + DependOnOrderQuery {
    async fn get_all_orders(&self) -> error_stack::Result<Vec<OrderDto>, KernelError> {
        let mut connection = self.database_connection().snapshot().await?;
        let orders = self.order_query().find_all(&mut connection).await?;
        Ok(orders.into_iter().map(OrderDto::from).collect())
    }

    async fn get_order(
        &self,
        dto: &GetOrderDto,
    ) -> error_stack::Result<Option<OrderDto>, KernelError> {
        let mut connection = self.database_connection().snapshot().await?;
        let id = OrderId::new(dto.id);
        let order = self.order_query().find_by_id(&mut connection, &id).await?;
        Ok(order.map(OrderDto::from))
    }
}

impl<T> GetOrderService for T where T: DependOnOrderQuery {}

#[async_trait::async_trait]
pub trait PlaceOrderService:
    'static + Sync + Send + DependOnBookQuery + DependOnBookModifier + DependOnOrderModifier
{
    /// Withdraws the ordered amount from stock and records the order in one
    /// transaction. Nothing is written when the stock does not cover the amount.
    async fn place_order(
        &self,
        identity: &Identity,
        dto: PlaceOrderDto,
    ) -> error_stack::Result<OrderDto, KernelError> {
        let amount = OrderAmount::new(dto.amount);
        if !amount.is_positive() {
            return Err(Report::new(KernelError::Validation)
                .attach_printable(format!("amount must be positive, got {}", dto.amount)));
        }
        let country_code = country_code(dto.country_code)?;
        let book_id = BookId::new(dto.book_id);

        let mut connection = self.database_connection().transact().await?;
        let mut book = self
            .book_query()
            .find_by_id_for_update(&mut connection, &book_id)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::Validation)
                    .attach_printable(format!("book {} does not exist", dto.book_id))
            })?;

        if let Err(report) = book.withdraw(&amount) {
            connection.roll_back().await?;
            return Err(report);
        }

        let order = Order::place(book_id, amount, country_code, identity, now()?);
        self.order_modifier().create(&mut connection, &order).await?;
        self.book_modifier().upsert(&mut connection, &book).await?;
        connection.commit().await?;
        tracing::debug!(
            order = %Uuid::from(*order.id()),
            book = dto.book_id,
            amount = dto.amount,
            "order placed"
        );

        Ok(OrderDto::from(order))
    }
}

impl<T> PlaceOrderService for T where
    T: DependOnBookQuery + DependOnBookModifier + DependOnOrderModifier
{
}

#[async_trait::async_trait]
pub trait UpdateOrderService:
    'static + Sync + Send + DependOnOrderQuery + DependOnOrderModifier
{
    /// Changes the destination country. Book and amount stay as placed.
    async fn update_order(
        &self,
        identity: &Identity,
        dto: UpdateOrderDto,
    ) -> error_stack::Result<OrderDto, KernelError> {
        let requested = dto.country_code.map(country_code).transpose()?;
        let id = OrderId::new(dto.id);

        let mut connection = self.database_connection().transact().await?;
        let mut order = self
            .order_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::NotFound)
                    .attach_printable(format!("order {} does not exist", dto.id))
            })?;
        let country_code = requested.unwrap_or_else(|| order.country_code().clone());
        order.relocate(country_code, identity, now()?);
        self.order_modifier().update(&mut connection, &order).await?;
        connection.commit().await?;

        Ok(OrderDto::from(order))
    }
}

impl<T> UpdateOrderService for T where T: DependOnOrderQuery + DependOnOrderModifier {}

#[async_trait::async_trait]
pub trait DeleteOrderService: 'static + Sync + Send + DependOnOrderModifier {
    /// Removes the order. The withdrawn stock is not given back.
    async fn delete_order(&self, dto: &DeleteOrderDto) -> error_stack::Result<(), KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let id = OrderId::new(dto.id);
        self.order_modifier().delete(&mut connection, &id).await?;
        connection.commit().await?;
        tracing::debug!(order = %dto.id, "order deleted");
        Ok(())
    }
}

impl<T> DeleteOrderService for T where T: DependOnOrderModifier {}
