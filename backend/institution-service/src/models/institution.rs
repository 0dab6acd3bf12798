use chrono::{DateTime, Utc};
/// Institution model
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// An outstanding hosting fee owed by an institution. Append-only from this
/// service's perspective; payment settlement happens elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PendingPayment {
    pub amount: f64,
    pub due_date: Option<DateTime<Utc>>,
    pub is_paid: bool,
    pub description: String,
}

impl Default for PendingPayment {
    fn default() -> Self {
        Self {
            amount: 0.0,
            due_date: None,
            is_paid: false,
            description: "Journal hosting fee".to_string(),
        }
    }
}

/// Durable institution record as held by the credential store.
///
/// Deliberately not `Serialize`: `password_hash` must never appear in any
/// output representation, so everything that leaves the service goes through
/// [`InstitutionProfile`] instead.
#[derive(Debug, Clone)]
pub struct Institution {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub accreditation_number: String,
    pub passkey: String,
    pub bio: String,
    pub logo: String,
    pub website: String,
    pub contact_email: String,
    pub description: String,
    pub pending_payments: Vec<PendingPayment>,
    /// References to journals created elsewhere. Never cascaded.
    pub journals: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Institution {
    /// Client-facing view of the record, minus the password hash.
    pub fn into_profile(self) -> InstitutionProfile {
        InstitutionProfile {
            id: self.id,
            name: self.name,
            email: self.email,
            accreditation_number: self.accreditation_number,
            passkey: self.passkey,
            bio: self.bio,
            logo: self.logo,
            website: self.website,
            contact_email: self.contact_email,
            description: self.description,
            pending_payments: self.pending_payments,
            journals: self.journals,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Serializable institution view returned to clients.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InstitutionProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub accreditation_number: String,
    pub passkey: String,
    pub bio: String,
    pub logo: String,
    pub website: String,
    pub contact_email: String,
    pub description: String,
    pub pending_payments: Vec<PendingPayment>,
    pub journals: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields the store needs to create a record. Ids, timestamps, and the empty
/// payment/journal collections are assigned by the store itself.
#[derive(Debug, Clone)]
pub struct NewInstitution {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub accreditation_number: String,
    pub passkey: String,
    pub bio: String,
    pub website: String,
    pub contact_email: String,
    pub description: String,
}

/// Partial update applied by `update_by_id`. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct InstitutionPatch {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub logo: Option<String>,
    pub website: Option<String>,
    pub contact_email: Option<String>,
    pub description: Option<String>,
    pub passkey: Option<String>,
}
