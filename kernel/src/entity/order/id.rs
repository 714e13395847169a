use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vodca::{AsRefln, Fromln};

#[derive(
    Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize, Fromln, AsRefln,
)]
pub struct OrderId(Uuid);

impl OrderId {
    pub fn new(id: impl Into<Uuid>) -> Self {
        Self(id.into())
    }
}
