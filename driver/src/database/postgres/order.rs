use error_stack::Report;
use sqlx::PgConnection;
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::query::OrderQuery;
use kernel::interface::update::OrderModifier;
use kernel::prelude::entity::{
    Audit, BookId, CountryCode, CreatedAt, Identity, ModifiedAt, Order, OrderAmount, OrderId,
};
use kernel::KernelError;

use crate::database::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresOrderRepository;

#[async_trait::async_trait]
impl OrderQuery for PostgresOrderRepository {
    type Transaction = PostgresTransaction;

    async fn find_all(
        &self,
        con: &mut PostgresTransaction,
    ) -> error_stack::Result<Vec<Order>, KernelError> {
        PgOrderInternal::find_all(con).await
    }

    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &OrderId,
    ) -> error_stack::Result<Option<Order>, KernelError> {
        PgOrderInternal::find_by_id(con, id).await
    }
}

#[async_trait::async_trait]
impl OrderModifier for PostgresOrderRepository {
    type Transaction = PostgresTransaction;

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        order: &Order,
    ) -> error_stack::Result<(), KernelError> {
        PgOrderInternal::create(con, order).await
    }

    async fn update(
        &self,
        con: &mut PostgresTransaction,
        order: &Order,
    ) -> error_stack::Result<(), KernelError> {
        PgOrderInternal::update(con, order).await
    }

    async fn delete(
        &self,
        con: &mut PostgresTransaction,
        order_id: &OrderId,
    ) -> error_stack::Result<(), KernelError> {
        PgOrderInternal::delete(con, order_id).await
    }
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    book_id: i32,
    amount: i32,
    country_code: Option<String>,
    created_at: OffsetDateTime,
    created_by: String,
    modified_at: OffsetDateTime,
    modified_by: String,
}

impl From<OrderRow> for Order {
    fn from(value: OrderRow) -> Self {
        Order::new(
            OrderId::new(value.id),
            BookId::new(value.book_id),
            OrderAmount::new(value.amount),
            value.country_code.map(CountryCode::new),
            Audit::new(
                CreatedAt::new(value.created_at),
                Identity::new(value.created_by),
                ModifiedAt::new(value.modified_at),
                Identity::new(value.modified_by),
            ),
        )
    }
}

fn not_found(id: &OrderId) -> Report<KernelError> {
    Report::new(KernelError::NotFound).attach_printable(format!("Order {} not found", Uuid::from(*id)))
}

pub(in crate::database) struct PgOrderInternal;

impl PgOrderInternal {
    async fn find_all(con: &mut PgConnection) -> error_stack::Result<Vec<Order>, KernelError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            // language=postgresql
            r#"
            SELECT id, book_id, amount, country_code, created_at, created_by, modified_at, modified_by
            FROM orders
            ORDER BY id
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Order::from).collect())
    }

    async fn find_by_id(
        con: &mut PgConnection,
        id: &OrderId,
    ) -> error_stack::Result<Option<Order>, KernelError> {
        let row = sqlx::query_as::<_, OrderRow>(
            // language=postgresql
            r#"
            SELECT id, book_id, amount, country_code, created_at, created_by, modified_at, modified_by
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Order::from))
    }

    async fn create(con: &mut PgConnection, order: &Order) -> error_stack::Result<(), KernelError> {
        let audit = order.audit();
        // language=postgresql
        sqlx::query(
            r#"
            INSERT INTO orders (id, book_id, amount, country_code, created_at, created_by, modified_at, modified_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(order.id().as_ref())
        .bind(order.book_id().as_ref())
        .bind(order.amount().as_ref())
        .bind(order.country_code().clone().map(String::from))
        .bind(audit.created_at().as_ref())
        .bind(audit.created_by().as_ref())
        .bind(audit.modified_at().as_ref())
        .bind(audit.modified_by().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn update(con: &mut PgConnection, order: &Order) -> error_stack::Result<(), KernelError> {
        let audit = order.audit();
        // language=postgresql
        let result = sqlx::query(
            r#"
            UPDATE orders
            SET country_code = $2, modified_at = $3, modified_by = $4
            WHERE id = $1
            "#,
        )
        .bind(order.id().as_ref())
        .bind(order.country_code().clone().map(String::from))
        .bind(audit.modified_at().as_ref())
        .bind(audit.modified_by().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        if result.rows_affected() == 0 {
            return Err(not_found(order.id()));
        }
        Ok(())
    }

    async fn delete(con: &mut PgConnection, order_id: &OrderId) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        let result = sqlx::query(
            r#"
            DELETE FROM orders
            WHERE id = $1
            "#,
        )
        .bind(order_id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        if result.rows_affected() == 0 {
            return Err(not_found(order_id));
        }
        Ok(())
    }
}
