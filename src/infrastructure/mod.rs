pub mod diesel_store;
pub mod memory_store;
pub mod models;

pub use diesel_store::DieselStore;
pub use memory_store::InMemoryStore;

use crate::domain::errors::DomainError;
use crate::domain::ports::{Store, UnitOfWork};

/// Storage backend the HTTP layer is wired to.
#[derive(Clone)]
pub enum AppStore {
    Postgres(DieselStore),
    InMemory(InMemoryStore),
}

impl From<DieselStore> for AppStore {
    fn from(store: DieselStore) -> Self {
        AppStore::Postgres(store)
    }
}

impl From<InMemoryStore> for AppStore {
    fn from(store: InMemoryStore) -> Self {
        AppStore::InMemory(store)
    }
}

impl Store for AppStore {
    fn transaction<T, F>(&self, work: F) -> Result<T, DomainError>
    where
        F: FnOnce(&mut dyn UnitOfWork) -> Result<T, DomainError>,
    {
        match self {
            AppStore::Postgres(store) => store.transaction(work),
            AppStore::InMemory(store) => store.transaction(work),
        }
    }
}
