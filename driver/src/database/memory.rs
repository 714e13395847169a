use std::collections::BTreeMap;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::time::Duration;

use error_stack::{Report, ResultExt};
use serde::Deserialize;
use time::OffsetDateTime;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{DependOnAuthorQuery, DependOnBookQuery, DependOnOrderQuery};
use kernel::interface::update::{DependOnBookModifier, DependOnOrderModifier};
use kernel::prelude::entity::{
    Audit, Author, AuthorId, AuthorName, Book, BookDiscount, BookId, BookStock, BookTitle,
    CountryCode, CreatedAt, Identity, ModifiedAt, Order, OrderAmount, OrderId,
};
use kernel::KernelError;

pub use self::{author::*, book::*, order::*};

mod author;
mod book;
mod order;

const FIXTURE: &str = include_str!("../../fixtures/catalog.json");
const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub(in crate::database) authors: BTreeMap<AuthorId, Author>,
    pub(in crate::database) books: BTreeMap<BookId, Book>,
    pub(in crate::database) orders: BTreeMap<OrderId, Order>,
}

/// Process local store. Write transactions are exclusive: each one holds the
/// writer lock until it is committed or dropped. Snapshots never wait for it.
#[derive(Clone)]
pub struct MemoryDatabase {
    published: Arc<RwLock<Arc<Tables>>>,
    writer: Arc<Mutex<()>>,
    lock_timeout: Duration,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::from_tables(Tables::default())
    }

    /// Store filled with the bundled catalog fixture.
    pub fn seeded() -> error_stack::Result<Self, KernelError> {
        let fixture: Fixture = serde_json::from_str(FIXTURE)
            .change_context_lazy(|| KernelError::Internal)
            .attach_printable_lazy(|| "Failed to parse catalog fixture")?;
        let tables = fixture.into_tables();
        tracing::debug!(
            authors = tables.authors.len(),
            books = tables.books.len(),
            orders = tables.orders.len(),
            "seeded memory database"
        );
        Ok(Self::from_tables(tables))
    }

    pub fn from_tables(tables: Tables) -> Self {
        Self {
            published: Arc::new(RwLock::new(Arc::new(tables))),
            writer: Arc::new(Mutex::new(())),
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
        }
    }

    pub fn with_lock_timeout(self, lock_timeout: Duration) -> Self {
        Self {
            lock_timeout,
            ..self
        }
    }

    async fn current(&self) -> Arc<Tables> {
        Arc::clone(&*self.published.read().await)
    }
}

impl Default for MemoryDatabase {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for MemoryDatabase {
    type Transaction = MemoryTransaction;
    async fn transact(&self) -> error_stack::Result<Self::Transaction, KernelError> {
        let guard = tokio::time::timeout(self.lock_timeout, self.writer.clone().lock_owned())
            .await
            .map_err(|_| {
                Report::new(KernelError::Timeout)
                    .attach_printable("Timed out waiting for the memory database lock")
            })?;
        Ok(MemoryTransaction {
            tables: self.current().await,
            writer: Some(Writer {
                _guard: guard,
                published: Arc::clone(&self.published),
            }),
        })
    }

    async fn snapshot(&self) -> error_stack::Result<Self::Transaction, KernelError> {
        Ok(MemoryTransaction {
            tables: self.current().await,
            writer: None,
        })
    }
}

struct Writer {
    _guard: OwnedMutexGuard<()>,
    published: Arc<RwLock<Arc<Tables>>>,
}

/// Shares the committed tables until the first write, which copies them.
/// Commit publishes the copy.
pub struct MemoryTransaction {
    tables: Arc<Tables>,
    writer: Option<Writer>,
}

#[async_trait::async_trait]
impl Transaction for MemoryTransaction {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        let MemoryTransaction { tables, writer } = self;
        let Some(writer) = writer else {
            return Err(Report::new(KernelError::Internal)
                .attach_printable("Cannot commit a memory database snapshot"));
        };
        *writer.published.write().await = tables;
        Ok(())
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        Ok(())
    }
}

impl Deref for MemoryTransaction {
    type Target = Tables;
    fn deref(&self) -> &Self::Target {
        &self.tables
    }
}

impl DerefMut for MemoryTransaction {
    fn deref_mut(&mut self) -> &mut Self::Target {
        Arc::make_mut(&mut self.tables)
    }
}

impl DependOnAuthorQuery for MemoryDatabase {
    type AuthorQuery = MemoryAuthorRepository;
    fn author_query(&self) -> &Self::AuthorQuery {
        &MemoryAuthorRepository
    }
}

impl DependOnBookQuery for MemoryDatabase {
    type BookQuery = MemoryBookRepository;
    fn book_query(&self) -> &Self::BookQuery {
        &MemoryBookRepository
    }
}

impl DependOnBookModifier for MemoryDatabase {
    type BookModifier = MemoryBookRepository;
    fn book_modifier(&self) -> &Self::BookModifier {
        &MemoryBookRepository
    }
}

impl DependOnOrderQuery for MemoryDatabase {
    type OrderQuery = MemoryOrderRepository;
    fn order_query(&self) -> &Self::OrderQuery {
        &MemoryOrderRepository
    }
}

impl DependOnOrderModifier for MemoryDatabase {
    type OrderModifier = MemoryOrderRepository;
    fn order_modifier(&self) -> &Self::OrderModifier {
        &MemoryOrderRepository
    }
}

#[derive(Deserialize)]
struct Fixture {
    authors: Vec<AuthorFixture>,
    books: Vec<BookFixture>,
    orders: Vec<OrderFixture>,
}

#[derive(Deserialize)]
struct AuthorFixture {
    id: i32,
    name: String,
}

#[derive(Deserialize)]
struct BookFixture {
    id: i32,
    title: String,
    author_id: i32,
    stock: i32,
    discount: Option<i32>,
}

#[derive(Deserialize)]
struct OrderFixture {
    id: Uuid,
    book_id: i32,
    amount: i32,
    country_code: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
    created_by: String,
    #[serde(with = "time::serde::rfc3339")]
    modified_at: OffsetDateTime,
    modified_by: String,
}

impl Fixture {
    fn into_tables(self) -> Tables {
        let authors = self
            .authors
            .into_iter()
            .map(|a| {
                let id = AuthorId::new(a.id);
                (id, Author::new(id, AuthorName::new(a.name)))
            })
            .collect();
        let books = self
            .books
            .into_iter()
            .map(|b| {
                let id = BookId::new(b.id);
                let book = Book::new(
                    id,
                    BookTitle::new(b.title),
                    AuthorId::new(b.author_id),
                    BookStock::new(b.stock),
                    b.discount.map(BookDiscount::new),
                );
                (id, book)
            })
            .collect();
        let orders = self
            .orders
            .into_iter()
            .map(|o| {
                let id = OrderId::new(o.id);
                let audit = Audit::new(
                    CreatedAt::new(o.created_at),
                    Identity::new(o.created_by),
                    ModifiedAt::new(o.modified_at),
                    Identity::new(o.modified_by),
                );
                let order = Order::new(
                    id,
                    BookId::new(o.book_id),
                    OrderAmount::new(o.amount),
                    o.country_code.map(CountryCode::new),
                    audit,
                );
                (id, order)
            })
            .collect();
        Tables {
            authors,
            books,
            orders,
        }
    }
}
