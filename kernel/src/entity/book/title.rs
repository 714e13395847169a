use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::entity::BookDiscount;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct BookTitle(String);

impl BookTitle {
    pub fn new(title: impl Into<String>) -> Self {
        Self(title.into())
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Builds the stored title from what a client sent, dropping the suffix a
    /// previous read rendered for `discount`. Any other suffix is kept as text.
    pub fn from_display(title: impl Into<String>, discount: Option<&BookDiscount>) -> Self {
        let title = title.into();
        match discount.and_then(|discount| crate::entity::strip_discount(&title, discount)) {
            Some(base) => Self(base.to_string()),
            None => Self(title),
        }
    }
}
