// Institution Service Library

pub mod config;
pub mod db;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod openapi;
pub mod routes;
pub mod security;
pub mod services;
pub mod validators;

pub use error_types::{ApiError, ApiResult};

use std::sync::Arc;

use crate::db::InstitutionStore;
use crate::security::TokenIssuer;
use crate::services::IdentityService;
use crate::validators::PasswordPolicy;

#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<IdentityService>,
    pub tokens: TokenIssuer,
}

impl AppState {
    pub fn new(
        store: Arc<dyn InstitutionStore>,
        tokens: TokenIssuer,
        policy: PasswordPolicy,
    ) -> Self {
        Self {
            identity: Arc::new(IdentityService::new(store, tokens.clone(), policy)),
            tokens,
        }
    }
}
