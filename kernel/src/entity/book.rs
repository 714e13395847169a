mod discount;
mod id;
mod stock;
mod title;

pub use self::{discount::*, id::*, stock::*, title::*};
use crate::entity::{AuthorId, OrderAmount};
use crate::KernelError;
use destructure::Destructure;
use error_stack::Report;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Book {
    id: BookId,
    title: BookTitle,
    author_id: AuthorId,
    stock: BookStock,
    discount: Option<BookDiscount>,
}

impl Book {
    pub fn new(
        id: BookId,
        title: BookTitle,
        author_id: AuthorId,
        stock: BookStock,
        discount: Option<BookDiscount>,
    ) -> Self {
        Self {
            id,
            title,
            author_id,
            stock,
            discount,
        }
    }

    /// Title as shown to readers. The stored title never carries the discount suffix.
    pub fn display_title(&self) -> String {
        render_title(&self.title, self.discount.as_ref())
    }

    /// Takes `amount` copies out of stock. Leaves the book untouched when the
    /// stock would drop below zero.
    pub fn withdraw(&mut self, amount: &OrderAmount) -> error_stack::Result<(), KernelError> {
        let rest = self.stock.withdraw(amount).ok_or_else(|| {
            Report::new(KernelError::OutOfStock).attach_printable(format!(
                "{} exceeds stock {} of book #{}",
                i32::from(*amount),
                i32::from(self.stock),
                i32::from(self.id)
            ))
        })?;
        self.stock = rest;
        Ok(())
    }
}
