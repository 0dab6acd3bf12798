//! Identity service — signup, login, profile update, and passkey rotation.

use std::sync::Arc;

use error_types::{ApiError, ApiResult};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::db::{InstitutionStore, StoreError, UniqueField};
use crate::models::{InstitutionPatch, InstitutionProfile, NewInstitution};
use crate::security::token::TokenIssuer;
use crate::security::{generate_passkey, hash_password, verify_password};
use crate::validators::{validate_email, PasswordPolicy};

/// Profile fields a caller may mutate through `update_profile`, by their wire
/// names. Shared by every update path; anything else is rejected outright.
pub const ALLOWED_PROFILE_FIELDS: [&str; 6] = [
    "name",
    "bio",
    "logo",
    "website",
    "contactEmail",
    "description",
];

/// Bounded retries when a freshly generated passkey loses the uniqueness
/// race at the store.
const MAX_PASSKEY_ATTEMPTS: u32 = 5;

/// Input for the signup flow. Optional profile fields default to empty.
#[derive(Debug, Clone)]
pub struct SignupInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub accreditation_number: String,
    pub bio: String,
    pub website: String,
    pub contact_email: String,
    pub description: String,
}

/// Successful signup/login result: the profile plus a fresh session token.
#[derive(Debug)]
pub struct AuthOutput {
    pub institution: InstitutionProfile,
    pub token: String,
}

/// Orchestrates the credential store, password hashing, passkey generation,
/// and token issuance. Every public method is one atomic request-scoped
/// operation.
pub struct IdentityService {
    store: Arc<dyn InstitutionStore>,
    tokens: TokenIssuer,
    policy: PasswordPolicy,
}

impl IdentityService {
    pub fn new(
        store: Arc<dyn InstitutionStore>,
        tokens: TokenIssuer,
        policy: PasswordPolicy,
    ) -> Self {
        Self {
            store,
            tokens,
            policy,
        }
    }

    /// Register a new institution and issue its first session token.
    pub async fn signup(&self, input: SignupInput) -> ApiResult<AuthOutput> {
        if input.name.is_empty()
            || input.email.is_empty()
            || input.password.is_empty()
            || input.accreditation_number.is_empty()
        {
            return Err(ApiError::InvalidInput(
                "All required fields must be filled".to_string(),
            ));
        }

        if !validate_email(&input.email) {
            return Err(ApiError::InvalidInput("Email is not valid".to_string()));
        }

        if !self.policy.is_strong(&input.password) {
            return Err(ApiError::InvalidInput(
                "Password is not strong enough".to_string(),
            ));
        }

        // Friendly prechecks; the store's unique indexes remain the backstop
        // against signups racing on the same values.
        if self.store.find_by_email(&input.email).await?.is_some() {
            return Err(ApiError::Conflict("Email already in use".to_string()));
        }
        if self
            .store
            .find_by_accreditation_number(&input.accreditation_number)
            .await?
            .is_some()
        {
            return Err(ApiError::Conflict(
                "Accreditation number already in use".to_string(),
            ));
        }

        let password_hash = hash_password(&input.password)?;

        let mut attempts = 0;
        let institution = loop {
            attempts += 1;
            let result = self
                .store
                .create(NewInstitution {
                    name: input.name.clone(),
                    email: input.email.clone(),
                    password_hash: password_hash.clone(),
                    accreditation_number: input.accreditation_number.clone(),
                    passkey: generate_passkey(),
                    bio: input.bio.clone(),
                    website: input.website.clone(),
                    contact_email: input.contact_email.clone(),
                    description: input.description.clone(),
                })
                .await;

            match result {
                Ok(institution) => break institution,
                Err(StoreError::Conflict(UniqueField::Passkey))
                    if attempts < MAX_PASSKEY_ATTEMPTS =>
                {
                    tracing::warn!(attempts, "passkey collision at signup, regenerating");
                    continue;
                }
                Err(StoreError::Conflict(UniqueField::Passkey)) => {
                    return Err(ApiError::Internal(
                        "Failed to generate a unique passkey".to_string(),
                    ));
                }
                Err(err) => return Err(err.into()),
            }
        };

        let token = self.tokens.issue(institution.id)?;
        tracing::info!(institution_id = %institution.id, "institution registered");

        Ok(AuthOutput {
            institution: institution.into_profile(),
            token,
        })
    }

    /// Authenticate with email + password and issue a session token.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<AuthOutput> {
        if email.is_empty() || password.is_empty() {
            return Err(ApiError::InvalidInput(
                "All fields must be filled".to_string(),
            ));
        }

        let institution = self
            .store
            .find_by_email(email)
            .await?
            .ok_or_else(|| ApiError::Unauthorized("Incorrect email".to_string()))?;

        if !verify_password(password, &institution.password_hash)? {
            return Err(ApiError::Unauthorized("Incorrect password".to_string()));
        }

        let token = self.tokens.issue(institution.id)?;
        tracing::info!(institution_id = %institution.id, "institution logged in");

        Ok(AuthOutput {
            institution: institution.into_profile(),
            token,
        })
    }

    /// Fetch an institution's profile.
    pub async fn profile(&self, id: Uuid) -> ApiResult<InstitutionProfile> {
        let institution = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Institution not found".to_string()))?;
        Ok(institution.into_profile())
    }

    /// Apply a profile update, rejecting any field outside the allow-list.
    pub async fn update_profile(
        &self,
        caller_id: Uuid,
        updates: Map<String, Value>,
    ) -> ApiResult<InstitutionProfile> {
        let mut patch = InstitutionPatch::default();

        for (key, value) in &updates {
            if !ALLOWED_PROFILE_FIELDS.contains(&key.as_str()) {
                return Err(ApiError::InvalidInput("Invalid updates".to_string()));
            }

            let value = value
                .as_str()
                .ok_or_else(|| ApiError::InvalidInput("Invalid updates".to_string()))?
                .to_string();

            match key.as_str() {
                "name" => patch.name = Some(value),
                "bio" => patch.bio = Some(value),
                "logo" => patch.logo = Some(value),
                "website" => patch.website = Some(value),
                "contactEmail" => patch.contact_email = Some(value),
                "description" => patch.description = Some(value),
                _ => unreachable!("key is in the allow-list"),
            }
        }

        let institution = self.store.update_by_id(caller_id, patch).await?;
        Ok(institution.into_profile())
    }

    /// Rotate the institution's passkey, retrying on uniqueness collisions.
    pub async fn regenerate_passkey(&self, institution_id: Uuid) -> ApiResult<String> {
        for attempt in 1..=MAX_PASSKEY_ATTEMPTS {
            let patch = InstitutionPatch {
                passkey: Some(generate_passkey()),
                ..Default::default()
            };

            match self.store.update_by_id(institution_id, patch).await {
                Ok(institution) => {
                    tracing::info!(%institution_id, "passkey regenerated");
                    return Ok(institution.passkey);
                }
                Err(StoreError::Conflict(UniqueField::Passkey)) => {
                    tracing::warn!(%institution_id, attempt, "passkey collision, retrying");
                    continue;
                }
                Err(err) => return Err(err.into()),
            }
        }

        Err(ApiError::Internal(
            "Failed to generate a unique passkey".to_string(),
        ))
    }
}
