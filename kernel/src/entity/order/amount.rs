use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct OrderAmount(i32);

impl OrderAmount {
    pub fn new(amount: impl Into<i32>) -> Self {
        Self(amount.into())
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }
}
