/// Institution identity handlers
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use error_types::ApiError;

use crate::middleware::InstitutionId;
use crate::models::InstitutionProfile;
use crate::services::SignupInput;
use crate::AppState;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    // Required fields default to empty so that a missing key surfaces as the
    // service's "All required fields must be filled" error, not a
    // deserialization failure.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub accreditation_number: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub contact_email: String,
    #[serde(default)]
    pub description: String,
}

impl From<SignupRequest> for SignupInput {
    fn from(req: SignupRequest) -> Self {
        SignupInput {
            name: req.name,
            email: req.email,
            password: req.password,
            accreditation_number: req.accreditation_number,
            bio: req.bio,
            website: req.website,
            contact_email: req.contact_email,
            description: req.description,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Signup/login response: the profile plus a fresh session token.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub success: bool,
    pub data: InstitutionProfile,
    pub token: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: InstitutionProfile,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PasskeyData {
    pub passkey: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PasskeyResponse {
    pub success: bool,
    pub message: String,
    pub data: PasskeyData,
}

/// Error envelope (matches `ApiError`'s response body)
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub message: String,
}

/// Register a new institution
#[utoipa::path(
    post,
    path = "/api/v1/institutions/signup",
    tag = "Institutions",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Institution registered", body = AuthResponse),
        (status = 400, description = "Invalid input or conflict", body = ErrorResponse)
    )
)]
pub async fn signup(
    state: web::Data<AppState>,
    payload: web::Json<SignupRequest>,
) -> Result<HttpResponse, ApiError> {
    let out = state.identity.signup(payload.into_inner().into()).await?;

    Ok(HttpResponse::Created().json(AuthResponse {
        success: true,
        data: out.institution,
        token: out.token,
    }))
}

/// Authenticate an institution
#[utoipa::path(
    post,
    path = "/api/v1/institutions/login",
    tag = "Institutions",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Institution logged in", body = AuthResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
pub async fn login(
    state: web::Data<AppState>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    let out = state
        .identity
        .login(&payload.email, &payload.password)
        .await?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        success: true,
        data: out.institution,
        token: out.token,
    }))
}

/// Fetch the authenticated institution's profile
#[utoipa::path(
    get,
    path = "/api/v1/institutions/profile",
    tag = "Institutions",
    responses(
        (status = 200, description = "Profile", body = ProfileResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Institution not found", body = ErrorResponse)
    )
)]
pub async fn get_profile(
    state: web::Data<AppState>,
    caller: InstitutionId,
) -> Result<HttpResponse, ApiError> {
    let profile = state.identity.profile(caller.0).await?;

    Ok(HttpResponse::Ok().json(ProfileResponse {
        success: true,
        message: None,
        data: profile,
    }))
}

/// Update allow-listed profile fields
#[utoipa::path(
    patch,
    path = "/api/v1/institutions/profile",
    tag = "Institutions",
    responses(
        (status = 200, description = "Profile updated", body = ProfileResponse),
        (status = 400, description = "Disallowed field in payload", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    )
)]
pub async fn update_profile(
    state: web::Data<AppState>,
    caller: InstitutionId,
    payload: web::Json<Map<String, Value>>,
) -> Result<HttpResponse, ApiError> {
    let profile = state
        .identity
        .update_profile(caller.0, payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ProfileResponse {
        success: true,
        message: Some("Profile updated successfully".to_string()),
        data: profile,
    }))
}

/// Rotate the institution's passkey
#[utoipa::path(
    post,
    path = "/api/v1/institutions/passkey/regenerate",
    tag = "Institutions",
    responses(
        (status = 200, description = "Passkey regenerated", body = PasskeyResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Institution not found", body = ErrorResponse)
    )
)]
pub async fn regenerate_passkey(
    state: web::Data<AppState>,
    caller: InstitutionId,
) -> Result<HttpResponse, ApiError> {
    let passkey = state.identity.regenerate_passkey(caller.0).await?;

    Ok(HttpResponse::Ok().json(PasskeyResponse {
        success: true,
        message: "Passkey regenerated successfully".to_string(),
        data: PasskeyData { passkey },
    }))
}
