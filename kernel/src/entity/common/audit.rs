use time::OffsetDateTime;

use crate::entity::{CreatedAt, Identity, ModifiedAt};

/// Creation and modification stamps of a mutable record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Audit<T> {
    created_at: CreatedAt<T>,
    created_by: Identity,
    modified_at: ModifiedAt<T>,
    modified_by: Identity,
}

impl<T> Audit<T> {
    pub fn new(
        created_at: CreatedAt<T>,
        created_by: Identity,
        modified_at: ModifiedAt<T>,
        modified_by: Identity,
    ) -> Self {
        Self {
            created_at,
            created_by,
            modified_at,
            modified_by,
        }
    }

    /// Stamps a record that is being created: both pairs get `by` and `now`.
    pub fn stamp(by: &Identity, now: OffsetDateTime) -> Self {
        Self::new(
            CreatedAt::new(now),
            by.clone(),
            ModifiedAt::new(now),
            by.clone(),
        )
    }

    /// Stamps a modification. Creation stamps stay as they are.
    pub fn touch(&mut self, by: &Identity, now: OffsetDateTime) {
        self.modified_at = ModifiedAt::new(now);
        self.modified_by = by.clone();
    }

    pub fn created_at(&self) -> &CreatedAt<T> {
        &self.created_at
    }

    pub fn created_by(&self) -> &Identity {
        &self.created_by
    }

    pub fn modified_at(&self) -> &ModifiedAt<T> {
        &self.modified_at
    }

    pub fn modified_by(&self) -> &Identity {
        &self.modified_by
    }
}
