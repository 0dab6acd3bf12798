//! Passkey generation.
//!
//! The passkey is an 8-character secondary secret gating out-of-band flows
//! (journal submission, for one), so it is drawn from the OS CSPRNG rather
//! than a seeded generator. Uniqueness is not checked here — the store's
//! unique index on the passkey field is authoritative.

use rand::rngs::OsRng;
use rand::Rng;

pub const PASSKEY_LEN: usize = 8;

const PASSKEY_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generate a fresh 8-character passkey from `[A-Z0-9]`.
pub fn generate_passkey() -> String {
    let mut rng = OsRng;
    (0..PASSKEY_LEN)
        .map(|_| {
            let idx = rng.gen_range(0..PASSKEY_ALPHABET.len());
            PASSKEY_ALPHABET[idx] as char
        })
        .collect()
}
