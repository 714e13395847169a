use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

/// Destination country of an order, an ISO 3166 alpha code such as `DE` or `USA`.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct CountryCode(String);

impl CountryCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn is_valid(&self) -> bool {
        (2..=3).contains(&self.0.len()) && self.0.bytes().all(|b| b.is_ascii_uppercase())
    }
}

#[cfg(test)]
mod test {
    use super::CountryCode;

    #[test]
    fn accepts_alpha_codes() {
        assert!(CountryCode::new("DE").is_valid());
        assert!(CountryCode::new("USA").is_valid());
    }

    #[test]
    fn rejects_other_shapes() {
        assert!(!CountryCode::new("").is_valid());
        assert!(!CountryCode::new("de").is_valid());
        assert!(!CountryCode::new("GERMANY").is_valid());
        assert!(!CountryCode::new("D1").is_valid());
    }
}
