use axum::{extract::State, routing::get, Json, Router};

use crate::api::errors::ApiError;
use crate::api::guards::{LecturerSession, StudentSession};
use crate::core::state::AppState;
use crate::db::types::Role;
use crate::repositories;
use crate::schemas::grade::{StudentGradeResponse, TranscriptResponse};
use crate::schemas::user::ProfileResponse;
use crate::services::gpa::{self, CreditedGrade};

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/", get(list_students))
}

pub(crate) fn me_router() -> Router<AppState> {
    Router::new().route("/grades", get(my_transcript))
}

/// Profiles holding the mahasiswa role, for the lecturer's grading form.
async fn list_students(
    State(state): State<AppState>,
    _lecturer: LecturerSession,
) -> Result<Json<Vec<ProfileResponse>>, ApiError> {
    let rows = repositories::profiles::list_by_role(state.db(), Role::Mahasiswa)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list students"))?;
    Ok(Json(rows.into_iter().map(ProfileResponse::from_listing).collect()))
}

async fn my_transcript(
    State(state): State<AppState>,
    StudentSession(student): StudentSession,
) -> Result<Json<TranscriptResponse>, ApiError> {
    let rows = repositories::grades::list_for_student(state.db(), &student.identity.user_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load grades"))?;

    let credited: Vec<CreditedGrade> =
        rows.iter().map(|row| CreditedGrade { letter: row.letter, credits: row.credits }).collect();
    let summary = gpa::summarize(&credited);

    Ok(Json(TranscriptResponse {
        grades: rows.into_iter().map(StudentGradeResponse::from).collect(),
        gpa: summary.gpa,
        total_credits: summary.total_credits,
        graded_courses: summary.graded_courses,
    }))
}

#[cfg(test)]
mod tests;
