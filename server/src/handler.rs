use std::ops::Deref;
use std::sync::Arc;

use kernel::interface::query::{DependOnAuthorQuery, DependOnBookQuery, DependOnOrderQuery};
use kernel::interface::update::{DependOnBookModifier, DependOnOrderModifier};
use kernel::prelude::entity::Identity;

/// Every store capability the catalog routes use.
pub trait CatalogDatabase:
    DependOnAuthorQuery
    + DependOnBookQuery
    + DependOnBookModifier
    + DependOnOrderQuery
    + DependOnOrderModifier
{
}

impl<T> CatalogDatabase for T where
    T: DependOnAuthorQuery
        + DependOnBookQuery
        + DependOnBookModifier
        + DependOnOrderQuery
        + DependOnOrderModifier
{
}

pub struct AppModule<D>(Arc<Handler<D>>);

impl<D: CatalogDatabase> AppModule<D> {
    pub fn new(database: D) -> Self {
        Self(Arc::new(Handler::new(database)))
    }
}

impl<D> Clone for AppModule<D> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<D> Deref for AppModule<D> {
    type Target = Handler<D>;
    fn deref(&self) -> &Self::Target {
        Deref::deref(&self.0)
    }
}

pub struct Handler<D> {
    database: D,
}

impl<D: CatalogDatabase> Handler<D> {
    pub fn new(database: D) -> Self {
        Self { database }
    }
}

impl<D> Handler<D> {
    pub fn database(&self) -> &D {
        &self.database
    }

    /// Caller of the current request. There is no authentication, so every
    /// request acts as the anonymous user.
    pub fn identity(&self) -> Identity {
        Identity::anonymous()
    }
}
