//! In-process credential store.
//!
//! Holds every record behind a single `RwLock` so that unique-index checks
//! and the write they guard happen atomically — concurrent signups racing on
//! the same email, accreditation number, or passkey cannot both win.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{Institution, InstitutionPatch, NewInstitution};

use super::{InstitutionStore, StoreError, StoreResult, UniqueField};

#[derive(Default)]
struct Inner {
    records: HashMap<Uuid, Institution>,
    by_email: HashMap<String, Uuid>,
    by_accreditation: HashMap<String, Uuid>,
    by_passkey: HashMap<String, Uuid>,
}

#[derive(Default)]
pub struct MemoryInstitutionStore {
    inner: RwLock<Inner>,
}

impl MemoryInstitutionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InstitutionStore for MemoryInstitutionStore {
    async fn create(&self, new: NewInstitution) -> StoreResult<Institution> {
        let mut inner = self.inner.write().await;

        if inner.by_email.contains_key(&new.email) {
            return Err(StoreError::Conflict(UniqueField::Email));
        }
        if inner.by_accreditation.contains_key(&new.accreditation_number) {
            return Err(StoreError::Conflict(UniqueField::AccreditationNumber));
        }
        if inner.by_passkey.contains_key(&new.passkey) {
            return Err(StoreError::Conflict(UniqueField::Passkey));
        }

        let now = Utc::now();
        let institution = Institution {
            id: Uuid::new_v4(),
            name: new.name,
            email: new.email,
            password_hash: new.password_hash,
            accreditation_number: new.accreditation_number,
            passkey: new.passkey,
            bio: new.bio,
            logo: String::new(),
            website: new.website,
            contact_email: new.contact_email,
            description: new.description,
            pending_payments: Vec::new(),
            journals: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        inner
            .by_email
            .insert(institution.email.clone(), institution.id);
        inner
            .by_accreditation
            .insert(institution.accreditation_number.clone(), institution.id);
        inner
            .by_passkey
            .insert(institution.passkey.clone(), institution.id);
        inner.records.insert(institution.id, institution.clone());

        Ok(institution)
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Institution>> {
        let inner = self.inner.read().await;
        Ok(inner.records.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Institution>> {
        let inner = self.inner.read().await;
        let id = inner.by_email.get(email).copied();
        Ok(id.and_then(|id| inner.records.get(&id).cloned()))
    }

    async fn find_by_accreditation_number(
        &self,
        number: &str,
    ) -> StoreResult<Option<Institution>> {
        let inner = self.inner.read().await;
        let id = inner.by_accreditation.get(number).copied();
        Ok(id.and_then(|id| inner.records.get(&id).cloned()))
    }

    async fn update_by_id(&self, id: Uuid, patch: InstitutionPatch) -> StoreResult<Institution> {
        let mut inner = self.inner.write().await;

        let old_passkey = match inner.records.get(&id) {
            Some(record) => record.passkey.clone(),
            None => return Err(StoreError::NotFound),
        };

        // Passkey uniqueness is checked before any field is touched so a
        // conflicting patch leaves the record unchanged.
        if let Some(passkey) = &patch.passkey {
            if let Some(owner) = inner.by_passkey.get(passkey) {
                if *owner != id {
                    return Err(StoreError::Conflict(UniqueField::Passkey));
                }
            }
            inner.by_passkey.remove(&old_passkey);
            inner.by_passkey.insert(passkey.clone(), id);
        }

        let Some(record) = inner.records.get_mut(&id) else {
            return Err(StoreError::NotFound);
        };
        if let Some(name) = patch.name {
            record.name = name;
        }
        if let Some(bio) = patch.bio {
            record.bio = bio;
        }
        if let Some(logo) = patch.logo {
            record.logo = logo;
        }
        if let Some(website) = patch.website {
            record.website = website;
        }
        if let Some(contact_email) = patch.contact_email {
            record.contact_email = contact_email;
        }
        if let Some(description) = patch.description {
            record.description = description;
        }
        if let Some(passkey) = patch.passkey {
            record.passkey = passkey;
        }
        record.updated_at = Utc::now();

        Ok(record.clone())
    }
}
