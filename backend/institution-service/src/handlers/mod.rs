pub mod institutions;

pub use institutions::{get_profile, login, regenerate_passkey, signup, update_profile};
