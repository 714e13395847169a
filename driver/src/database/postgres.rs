use std::ops::{Deref, DerefMut};

use error_stack::{Report, ResultExt};
use sqlx::{Error, PgConnection, Pool, Postgres};

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{DependOnAuthorQuery, DependOnBookQuery, DependOnOrderQuery};
use kernel::interface::update::{DependOnBookModifier, DependOnOrderModifier};
use kernel::KernelError;

use crate::env;
use crate::error::ConvertError;

pub use self::{author::*, book::*, order::*};

mod author;
mod book;
mod order;

static POSTGRES_URL: &str = "POSTGRES_URL";

#[derive(Clone)]
pub struct PostgresDatabase {
    pool: Pool<Postgres>,
}

impl PostgresDatabase {
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        let url = env(POSTGRES_URL)?;
        Self::connect(&url).await
    }

    /// Connects and brings the schema up to date.
    pub async fn connect(url: &str) -> error_stack::Result<Self, KernelError> {
        let pool = Pool::connect(url).await.convert_error()?;
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .change_context_lazy(|| KernelError::Internal)
            .attach_printable_lazy(|| "Failed to migrate catalog schema")?;
        tracing::info!("connected to postgres");
        Ok(Self { pool })
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for PostgresDatabase {
    type Transaction = PostgresTransaction;
    async fn transact(&self) -> error_stack::Result<Self::Transaction, KernelError> {
        let tx = self.pool.begin().await.convert_error()?;
        Ok(PostgresTransaction(tx))
    }
}

pub struct PostgresTransaction(sqlx::Transaction<'static, Postgres>);

#[async_trait::async_trait]
impl Transaction for PostgresTransaction {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        self.0.commit().await.convert_error()
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        self.0.rollback().await.convert_error()
    }
}

impl Deref for PostgresTransaction {
    type Target = PgConnection;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for PostgresTransaction {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl DependOnAuthorQuery for PostgresDatabase {
    type AuthorQuery = PostgresAuthorRepository;
    fn author_query(&self) -> &Self::AuthorQuery {
        &PostgresAuthorRepository
    }
}

impl DependOnBookQuery for PostgresDatabase {
    type BookQuery = PostgresBookRepository;
    fn book_query(&self) -> &Self::BookQuery {
        &PostgresBookRepository
    }
}

impl DependOnBookModifier for PostgresDatabase {
    type BookModifier = PostgresBookRepository;
    fn book_modifier(&self) -> &Self::BookModifier {
        &PostgresBookRepository
    }
}

impl DependOnOrderQuery for PostgresDatabase {
    type OrderQuery = PostgresOrderRepository;
    fn order_query(&self) -> &Self::OrderQuery {
        &PostgresOrderRepository
    }
}

impl DependOnOrderModifier for PostgresDatabase {
    type OrderModifier = PostgresOrderRepository;
    fn order_modifier(&self) -> &Self::OrderModifier {
        &PostgresOrderRepository
    }
}

impl<T> ConvertError for Result<T, Error> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| {
            let context = match &error {
                Error::PoolTimedOut => KernelError::Timeout,
                Error::Database(e) if e.is_check_violation() => KernelError::Validation,
                Error::Database(e) if e.is_unique_violation() => KernelError::Concurrency,
                _ => KernelError::Internal,
            };
            Report::from(error).change_context(context)
        })
    }
}
