/// Security module for the institution identity lifecycle
/// Provides password hashing, passkey generation, and session tokens

pub mod passkey;
pub mod password;
pub mod token;

pub use passkey::generate_passkey;
pub use password::{hash_password, verify_password};
pub use token::TokenIssuer;
