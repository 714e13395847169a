use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

pub const ANONYMOUS: &str = "anonymous";

/// Caller on whose behalf a write happens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Fromln, AsRefln)]
pub struct Identity(String);

impl Identity {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn anonymous() -> Self {
        Self::new(ANONYMOUS)
    }
}

impl Default for Identity {
    fn default() -> Self {
        Self::anonymous()
    }
}
