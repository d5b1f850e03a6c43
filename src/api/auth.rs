use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use time::OffsetDateTime;
use uuid::Uuid;
use validator::Validate;

use crate::api::errors::ApiError;
use crate::api::json::ApiJson;
use crate::api::guards::{SessionContext, SignedInUser};
use crate::api::session;
use crate::core::redis::auth_rate_key;
use crate::core::state::AppState;
use crate::core::security;
use crate::core::time::{format_primitive, primitive_now_utc, to_primitive_utc};
use crate::db;
use crate::repositories;
use crate::schemas::auth::{SignInRequest, SignUpRequest, TokenResponse};
use crate::schemas::session::SessionResponse;
use crate::schemas::user::ProfileResponse;
use crate::services::stores::RoleStore;

const EMAIL_TAKEN: &str = "Email already registered. Please sign in.";
const BAD_CREDENTIALS: &str = "Incorrect email or password";

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
}

async fn check_rate_limit(
    state: &AppState,
    action: &str,
    email: &str,
    message: &'static str,
) -> Result<(), ApiError> {
    let limits = state.settings().auth();
    let allowed = state
        .redis()
        .rate_limit(&auth_rate_key(action, email), limits.rate_limit, limits.rate_window_seconds)
        .await
        .unwrap_or(true);
    if allowed {
        Ok(())
    } else {
        Err(ApiError::TooManyRequests(message))
    }
}

/// Registers a profile without a role; an administrator activates it later.
async fn signup(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<SignUpRequest>,
) -> Result<(StatusCode, Json<ProfileResponse>), ApiError> {
    let payload = payload.normalized();
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

    check_rate_limit(&state, "signup", &payload.email, "Too many signup attempts, try again later")
        .await?;

    let existing = repositories::profiles::find_by_email(state.db(), &payload.email)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to check existing profile"))?;
    if existing.is_some() {
        return Err(ApiError::Conflict(EMAIL_TAKEN.to_string()));
    }

    let hashed_password = security::hash_password(&payload.password)
        .map_err(|e| ApiError::internal(e, "Failed to hash password"))?;

    let profile = repositories::profiles::create(
        state.db(),
        repositories::profiles::CreateProfile {
            id: &Uuid::new_v4().to_string(),
            email: &payload.email,
            hashed_password,
            full_name: &payload.full_name,
            external_id: &payload.external_id,
            created_at: primitive_now_utc(),
        },
    )
    .await
    .map_err(|e| {
        if db::is_unique_violation(&e) {
            ApiError::Conflict(EMAIL_TAKEN.to_string())
        } else {
            ApiError::internal(e, "Failed to create profile")
        }
    })?;

    tracing::info!(action = "sign_up", user_id = %profile.id, "Profile registered");

    Ok((StatusCode::CREATED, Json(ProfileResponse::from_profile(profile, None))))
}

async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<SignInRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let payload = payload.normalized();
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

    check_rate_limit(&state, "login", &payload.email, "Too many login attempts, try again later")
        .await?;

    let profile = repositories::profiles::find_by_email(state.db(), &payload.email)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch profile"))?
        .ok_or(ApiError::Unauthorized(BAD_CREDENTIALS))?;

    let verified = security::verify_password(&payload.password, &profile.hashed_password)
        .map_err(|_| ApiError::Unauthorized(BAD_CREDENTIALS))?;
    if !verified {
        return Err(ApiError::Unauthorized(BAD_CREDENTIALS));
    }

    let role = state
        .db()
        .find_role(&profile.id)
        .await
        .map_err(|e| ApiError::unavailable(e, "Failed to resolve role"))?;

    let now = OffsetDateTime::now_utc();
    let expires_at = now + security::access_token_lifetime(state.settings());
    let session_id = Uuid::new_v4().to_string();
    repositories::auth_sessions::create(
        state.db(),
        &session_id,
        &profile.id,
        to_primitive_utc(now),
        to_primitive_utc(expires_at),
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to open session"))?;

    let token = security::create_access_token(&profile.id, &session_id, expires_at, state.settings())
        .map_err(|e| ApiError::internal(e, "Failed to create access token"))?;

    tracing::info!(action = "sign_in", user_id = %profile.id, session_id = %session_id, "Signed in");

    Ok(Json(TokenResponse {
        access_token: token,
        token_type: "bearer".to_string(),
        expires_at: format_primitive(to_primitive_utc(expires_at)),
        profile: ProfileResponse::from_profile(profile, role),
        role,
    }))
}

/// Ends the session: the auth session row is deleted, so the token no longer resolves.
/// Responds with the signed-out session so the client lands on sign-in.
async fn logout(
    State(state): State<AppState>,
    mut context: SessionContext,
) -> Result<Json<SessionResponse>, ApiError> {
    let identity =
        context.session.identity().cloned().ok_or(ApiError::Unauthorized("Sign in to continue"))?;

    repositories::auth_sessions::delete(state.db(), &identity.session_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to close session"))?;
    context.session.sign_out();

    tracing::info!(
        action = "sign_out",
        user_id = %identity.user_id,
        session_id = %identity.session_id,
        "Signed out"
    );

    Ok(Json(session::describe(&context.session)))
}

async fn me(user: SignedInUser) -> Json<ProfileResponse> {
    Json(ProfileResponse::from_profile(user.profile, user.role))
}
