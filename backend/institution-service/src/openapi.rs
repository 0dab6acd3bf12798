/// OpenAPI documentation for the institution service
use utoipa::OpenApi;

use crate::handlers::institutions;
use crate::models::{InstitutionProfile, PendingPayment};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Folio Institution Service",
        description = "Institution identity and credential lifecycle: signup, login, profile updates, passkey rotation"
    ),
    paths(
        institutions::signup,
        institutions::login,
        institutions::get_profile,
        institutions::update_profile,
        institutions::regenerate_passkey,
    ),
    components(schemas(
        InstitutionProfile,
        PendingPayment,
        institutions::SignupRequest,
        institutions::LoginRequest,
        institutions::AuthResponse,
        institutions::ProfileResponse,
        institutions::PasskeyData,
        institutions::PasskeyResponse,
        institutions::ErrorResponse,
    )),
    tags((name = "Institutions", description = "Institution identity endpoints"))
)]
pub struct ApiDoc;
