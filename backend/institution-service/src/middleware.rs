//! Request authentication.
//!
//! Extracts and verifies the bearer token on protected routes, yielding the
//! institution id the token binds.

use actix_web::http::header;
use actix_web::{web, FromRequest, HttpRequest};
use error_types::ApiError;
use futures::future::{ready, Ready};
use uuid::Uuid;

use crate::AppState;

/// Institution id proven by a verified session token.
#[derive(Debug, Clone, Copy)]
pub struct InstitutionId(pub Uuid);

fn authenticate(req: &HttpRequest) -> Result<InstitutionId, ApiError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| ApiError::Internal("Application state missing".to_string()))?;

    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Authorization token required".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::Unauthorized("Authorization token required".to_string()))?;

    state.tokens.verify(token).map(InstitutionId)
}

impl FromRequest for InstitutionId {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        ready(authenticate(req))
    }
}
