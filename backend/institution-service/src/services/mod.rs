pub mod identity;

pub use identity::{IdentityService, SignupInput, ALLOWED_PROFILE_FIELDS};
