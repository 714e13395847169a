use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::entity::OrderAmount;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct BookStock(i32);

impl BookStock {
    pub fn new(stock: impl Into<i32>) -> Self {
        Self(stock.into())
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub fn withdraw(&self, amount: &OrderAmount) -> Option<Self> {
        self.0
            .checked_sub(i32::from(*amount))
            .filter(|rest| *rest >= 0)
            .map(Self)
    }
}
