use async_trait::async_trait;
use axum::extract::{FromRequestParts, State};
use axum::http::{header, request::Parts};

use crate::api::errors::ApiError;
use crate::core::{security, state::AppState, time::primitive_now_utc};
use crate::db::models::Profile;
use crate::db::types::Role;
use crate::repositories;
use crate::services::access_guard::{self, AccessDecision};
use crate::services::session::{Identity, RoleResolver, SessionState};

/// Session state of the current request, resolved as far as it goes. Never rejects for a
/// missing or stale token; that is what [`SessionState::SignedOut`] is for.
pub(crate) struct SessionContext {
    pub(crate) session: SessionState,
    pub(crate) profile: Option<Profile>,
}

/// Any signed-in identity, with or without a role.
pub(crate) struct SignedInUser {
    pub(crate) identity: Identity,
    pub(crate) profile: Profile,
    pub(crate) role: Option<Role>,
}

pub(crate) struct AdminSession(pub(crate) SignedInUser);
pub(crate) struct LecturerSession(pub(crate) SignedInUser);
pub(crate) struct StudentSession(pub(crate) SignedInUser);
/// Signed in with any of the three roles.
pub(crate) struct MemberSession(pub(crate) SignedInUser);

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Follows the bearer token to a live auth session and its profile. `None` for a missing,
/// malformed, expired or revoked token.
async fn load_identity(
    parts: &Parts,
    state: &AppState,
) -> Result<Option<(Identity, Profile)>, ApiError> {
    let Some(token) = bearer_token(parts) else {
        return Ok(None);
    };
    let Ok(claims) = security::verify_token(token, state.settings()) else {
        return Ok(None);
    };

    let auth_session = repositories::auth_sessions::find_active(
        state.db(),
        &claims.sid,
        &claims.sub,
        primitive_now_utc(),
    )
    .await
    .map_err(|e| ApiError::unavailable(e, "Failed to load session"))?;
    let Some(auth_session) = auth_session else {
        return Ok(None);
    };

    let profile = repositories::profiles::find_by_id(state.db(), &auth_session.user_id)
        .await
        .map_err(|e| ApiError::unavailable(e, "Failed to load profile"))?;

    Ok(profile.map(|profile| {
        (Identity { user_id: auth_session.user_id, session_id: auth_session.id }, profile)
    }))
}

#[async_trait]
impl FromRequestParts<AppState> for SessionContext {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let State(app_state) = State::<AppState>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to access application state"))?;

        let mut session = SessionState::Initializing;
        let (identity, profile) = load_identity(parts, &app_state).await?.unzip();
        session.establish(identity);

        RoleResolver::new(app_state.db())
            .resolve(&mut session)
            .await
            .map_err(|e| ApiError::unavailable(e, "Failed to resolve role"))?;

        Ok(SessionContext { session, profile })
    }
}

impl SessionContext {
    fn into_user(self) -> Option<SignedInUser> {
        let role = self.session.role();
        match (self.session, self.profile) {
            (SessionState::SignedIn { identity, .. }, Some(profile)) => {
                Some(SignedInUser { identity, profile, role })
            }
            _ => None,
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for SignedInUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        SessionContext::from_request_parts(parts, state)
            .await?
            .into_user()
            .ok_or(ApiError::Unauthorized("Sign in to continue"))
    }
}

async fn guarded(
    parts: &mut Parts,
    state: &AppState,
    admissible: &[Role],
) -> Result<SignedInUser, ApiError> {
    let context = SessionContext::from_request_parts(parts, state).await?;
    match access_guard::evaluate(&context.session, admissible) {
        AccessDecision::Granted(role) => context
            .into_user()
            .filter(|user| user.role == Some(role))
            .ok_or(ApiError::Unauthorized("Sign in to continue")),
        AccessDecision::Denied(redirect) => Err(ApiError::denied(redirect)),
        AccessDecision::Pending => {
            Err(ApiError::ServiceUnavailable("Session is still resolving".to_string()))
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AdminSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        guarded(parts, state, &[Role::Admin]).await.map(AdminSession)
    }
}

#[async_trait]
impl FromRequestParts<AppState> for LecturerSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        guarded(parts, state, &[Role::Dosen]).await.map(LecturerSession)
    }
}

#[async_trait]
impl FromRequestParts<AppState> for StudentSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        guarded(parts, state, &[Role::Mahasiswa]).await.map(StudentSession)
    }
}

#[async_trait]
impl FromRequestParts<AppState> for MemberSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        guarded(parts, state, &Role::ALL).await.map(MemberSession)
    }
}
