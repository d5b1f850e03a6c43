use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};

use crate::api::errors::ApiError;
use crate::api::json::ApiJson;
use crate::api::guards::AdminSession;
use crate::core::state::AppState;
use crate::repositories;
use crate::schemas::user::{ProfileResponse, RoleAssignRequest, RoleAssignmentResponse};
use crate::services::role_assignment;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/:user_id/role", put(assign_role))
}

async fn list_users(
    State(state): State<AppState>,
    _admin: AdminSession,
) -> Result<Json<Vec<ProfileResponse>>, ApiError> {
    let rows = repositories::profiles::list_with_roles(state.db())
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list users"))?;
    Ok(Json(rows.into_iter().map(ProfileResponse::from_listing).collect()))
}

async fn assign_role(
    Path(user_id): Path<String>,
    State(state): State<AppState>,
    AdminSession(admin): AdminSession,
    ApiJson(payload): ApiJson<RoleAssignRequest>,
) -> Result<Json<RoleAssignmentResponse>, ApiError> {
    let assignment =
        role_assignment::assign_role(state.db(), &admin.identity.user_id, &user_id, payload.role)
            .await?;
    Ok(Json(RoleAssignmentResponse::from(assignment)))
}
