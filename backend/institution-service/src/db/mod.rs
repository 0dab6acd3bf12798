//! Credential store seam.
//!
//! The document database itself is an external collaborator; this module only
//! fixes the capability the identity flows rely on: create with unique-index
//! enforcement, point lookups, and partial update-by-id.

pub mod memory;

use async_trait::async_trait;
use error_types::ApiError;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Institution, InstitutionPatch, NewInstitution};

pub use memory::MemoryInstitutionStore;

/// Field with a unique index in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    Email,
    AccreditationNumber,
    Passkey,
}

impl fmt::Display for UniqueField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UniqueField::Email => write!(f, "Email"),
            UniqueField::AccreditationNumber => write!(f, "Accreditation number"),
            UniqueField::Passkey => write!(f, "Passkey"),
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0} already in use")]
    Conflict(UniqueField),

    #[error("institution not found")]
    NotFound,

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(field) => ApiError::Conflict(format!("{field} already in use")),
            StoreError::NotFound => ApiError::NotFound("Institution not found".to_string()),
            StoreError::Unavailable(msg) => ApiError::Unavailable(msg),
        }
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Storage contract for institution records.
///
/// Uniqueness of email, accreditation number, and passkey is enforced here,
/// atomically with the write — callers may precheck for friendlier messages,
/// but the store is the authoritative backstop against racing signups.
#[async_trait]
pub trait InstitutionStore: Send + Sync + 'static {
    /// Insert a new record, failing with `Conflict` if any unique field is
    /// already taken.
    async fn create(&self, new: NewInstitution) -> StoreResult<Institution>;

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Institution>>;

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Institution>>;

    async fn find_by_accreditation_number(
        &self,
        number: &str,
    ) -> StoreResult<Option<Institution>>;

    /// Apply a partial update and refresh `updated_at`. Fails with `NotFound`
    /// if the id does not exist, `Conflict` if the patch would break passkey
    /// uniqueness.
    async fn update_by_id(&self, id: Uuid, patch: InstitutionPatch) -> StoreResult<Institution>;
}
