use std::collections::BTreeMap;

use axum::{extract::State, routing::get, Json, Router};

use crate::api::errors::ApiError;
use crate::api::guards::{AdminSession, LecturerSession};
use crate::core::state::AppState;
use crate::db::types::Role;
use crate::repositories;
use crate::schemas::session::{AdminSummary, LecturerSummary};

pub(crate) fn admin_router() -> Router<AppState> {
    Router::new().route("/summary", get(admin_summary))
}

pub(crate) fn lecturer_router() -> Router<AppState> {
    Router::new().route("/summary", get(lecturer_summary))
}

async fn admin_summary(
    State(state): State<AppState>,
    _admin: AdminSession,
) -> Result<Json<AdminSummary>, ApiError> {
    let courses = repositories::courses::count(state.db())
        .await
        .map_err(|e| ApiError::internal(e, "Failed to count courses"))?;
    let users = repositories::profiles::count(state.db())
        .await
        .map_err(|e| ApiError::internal(e, "Failed to count users"))?;
    let by_role = repositories::roles::count_by_role(state.db())
        .await
        .map_err(|e| ApiError::internal(e, "Failed to count roles"))?;

    let mut users_by_role: BTreeMap<&'static str, i64> =
        Role::ALL.iter().map(|role| (role.as_str(), 0)).collect();
    for (role, count) in by_role {
        users_by_role.insert(role.as_str(), count);
    }
    let assigned: i64 = users_by_role.values().sum();

    Ok(Json(AdminSummary {
        courses,
        users,
        users_by_role,
        unactivated: (users - assigned).max(0),
    }))
}

async fn lecturer_summary(
    State(state): State<AppState>,
    LecturerSession(lecturer): LecturerSession,
) -> Result<Json<LecturerSummary>, ApiError> {
    let courses = repositories::courses::count(state.db())
        .await
        .map_err(|e| ApiError::internal(e, "Failed to count courses"))?;
    let students = repositories::profiles::count_by_role(state.db(), Role::Mahasiswa)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to count students"))?;
    let grades_recorded =
        repositories::grades::count_for_lecturer(state.db(), &lecturer.identity.user_id)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to count grades"))?;

    Ok(Json(LecturerSummary { courses, students, grades_recorded }))
}
