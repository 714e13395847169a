mod amount;
mod country;
mod id;

pub use self::{amount::*, country::*, id::*};
use crate::entity::{Audit, BookId, Identity};
use destructure::Destructure;
use time::OffsetDateTime;
use uuid::Uuid;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Order {
    id: OrderId,
    book_id: BookId,
    amount: OrderAmount,
    country_code: Option<CountryCode>,
    audit: Audit<Order>,
}

impl Order {
    pub fn new(
        id: OrderId,
        book_id: BookId,
        amount: OrderAmount,
        country_code: Option<CountryCode>,
        audit: Audit<Order>,
    ) -> Self {
        Self {
            id,
            book_id,
            amount,
            country_code,
            audit,
        }
    }

    /// New order with a freshly generated id, stamped as created by `by` at `now`.
    pub fn place(
        book_id: BookId,
        amount: OrderAmount,
        country_code: Option<CountryCode>,
        by: &Identity,
        now: OffsetDateTime,
    ) -> Self {
        Self::new(
            OrderId::new(Uuid::new_v4()),
            book_id,
            amount,
            country_code,
            Audit::stamp(by, now),
        )
    }

    pub fn relocate(&mut self, country_code: Option<CountryCode>, by: &Identity, now: OffsetDateTime) {
        self.country_code = country_code;
        self.audit.touch(by, now);
    }
}
