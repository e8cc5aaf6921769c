// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Database layer.
//!
//! [`Database`] dispatches to Firestore in production or to the in-memory
//! backend for tests and local development. Both backends store the same
//! camelCase JSON documents and return query results newest first.

pub mod firestore;
pub mod memory;
mod records;

pub use firestore::FirestoreBackend;
pub use memory::MemoryBackend;
pub use records::CascadeReport;

use crate::config::StoreConfig;
use crate::error::AppError;
use crate::models::{Competition, Feature, Feedback, PhysicalProgram, Training, User};
use serde::{de::DeserializeOwned, Serialize};

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const TRAININGS: &str = "trainings";
    pub const PHYSICAL_PROGRAMS: &str = "physical_programs";
    pub const COMPETITIONS: &str = "competitions";
    pub const FEEDBACKS: &str = "feedbacks";
    pub const FEATURES: &str = "features";
}

/// Timestamp field every document carries; queries sort on it.
pub const ORDER_FIELD: &str = "date";

/// Field holding the owner's user id on owned documents.
pub const OWNER_FIELD: &str = "userId";

/// A record stored as one document in a fixed collection.
pub trait Document: Serialize + DeserializeOwned + Send + Sync + 'static {
    const COLLECTION: &'static str;

    fn id(&self) -> &str;
}

/// A record that belongs to exactly one user.
pub trait Owned: Document {
    fn owner_id(&self) -> &str;
}

macro_rules! document {
    ($ty:ty, $collection:expr) => {
        impl Document for $ty {
            const COLLECTION: &'static str = $collection;

            fn id(&self) -> &str {
                &self.id
            }
        }
    };
    ($ty:ty, $collection:expr, owned) => {
        document!($ty, $collection);

        impl Owned for $ty {
            fn owner_id(&self) -> &str {
                &self.user_id
            }
        }
    };
}

document!(User, collections::USERS);
document!(Feature, collections::FEATURES);
document!(Training, collections::TRAININGS, owned);
document!(PhysicalProgram, collections::PHYSICAL_PROGRAMS, owned);
document!(Competition, collections::COMPETITIONS, owned);
document!(Feedback, collections::FEEDBACKS, owned);

#[derive(Clone)]
enum Backend {
    Firestore(FirestoreBackend),
    Memory(MemoryBackend),
}

/// Handle to the document store. Cheap to clone.
#[derive(Clone)]
pub struct Database {
    backend: Backend,
}

impl Database {
    /// Connect to the configured store.
    pub async fn connect(store: &StoreConfig) -> Result<Self, AppError> {
        let backend = match store {
            StoreConfig::Firestore { project_id } => {
                Backend::Firestore(FirestoreBackend::connect(project_id).await?)
            }
            StoreConfig::Memory => {
                tracing::warn!("Using in-memory document store; data will not persist");
                Backend::Memory(MemoryBackend::new())
            }
        };
        Ok(Self { backend })
    }

    /// Fresh, empty in-memory store.
    pub fn in_memory() -> Self {
        Self {
            backend: Backend::Memory(MemoryBackend::new()),
        }
    }

    pub async fn get<T: Document>(&self, id: &str) -> Result<Option<T>, AppError> {
        match &self.backend {
            Backend::Firestore(fs) => fs.get(T::COLLECTION, id).await,
            Backend::Memory(mem) => mem.get(T::COLLECTION, id),
        }
    }

    /// Create or fully replace a document.
    pub async fn save<T: Document>(&self, doc: &T) -> Result<(), AppError> {
        match &self.backend {
            Backend::Firestore(fs) => fs.put(T::COLLECTION, doc.id(), doc).await,
            Backend::Memory(mem) => mem.put(T::COLLECTION, doc.id(), doc),
        }
    }

    /// Delete by id. Deleting a missing document is not an error.
    pub async fn delete<T: Document>(&self, id: &str) -> Result<(), AppError> {
        match &self.backend {
            Backend::Firestore(fs) => fs.delete(T::COLLECTION, id).await,
            Backend::Memory(mem) => mem.delete(T::COLLECTION, id),
        }
    }

    pub async fn delete_many<T: Document>(&self, ids: &[String]) -> Result<(), AppError> {
        if ids.is_empty() {
            return Ok(());
        }
        match &self.backend {
            Backend::Firestore(fs) => fs.delete_many(T::COLLECTION, ids).await,
            Backend::Memory(mem) => mem.delete_many(T::COLLECTION, ids),
        }
    }

    /// Documents whose string `field` equals `value`, newest first.
    pub async fn find_by<T: Document>(
        &self,
        field: &'static str,
        value: &str,
        limit: Option<u32>,
    ) -> Result<Vec<T>, AppError> {
        match &self.backend {
            Backend::Firestore(fs) => fs.find_by(T::COLLECTION, field, value, limit).await,
            Backend::Memory(mem) => mem.find_by(T::COLLECTION, field, value, limit),
        }
    }

    /// Every document in `T`'s collection, newest first.
    pub async fn list_all<T: Document>(&self) -> Result<Vec<T>, AppError> {
        match &self.backend {
            Backend::Firestore(fs) => fs.list(T::COLLECTION).await,
            Backend::Memory(mem) => mem.list(T::COLLECTION),
        }
    }
}
