use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};

use crate::api::errors::ApiError;
use crate::api::json::ApiJson;
use crate::api::guards::LecturerSession;
use crate::core::state::AppState;
use crate::repositories;
use crate::schemas::grade::{GradeCreate, GradeResponse, GradeUpdate, LecturerGradeResponse};
use crate::services::grade_book::{self, SaveGrade, SaveMode};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_authored).post(create_grade))
        .route("/:grade_id", put(update_grade))
}

/// Grades recorded by the calling lecturer, with student and course details.
async fn list_authored(
    State(state): State<AppState>,
    LecturerSession(lecturer): LecturerSession,
) -> Result<Json<Vec<LecturerGradeResponse>>, ApiError> {
    let rows = repositories::grades::list_for_lecturer(state.db(), &lecturer.identity.user_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list grades"))?;
    Ok(Json(rows.into_iter().map(LecturerGradeResponse::from).collect()))
}

async fn create_grade(
    State(state): State<AppState>,
    LecturerSession(lecturer): LecturerSession,
    ApiJson(payload): ApiJson<GradeCreate>,
) -> Result<(StatusCode, Json<GradeResponse>), ApiError> {
    let grade = grade_book::save_grade(
        state.db(),
        SaveGrade {
            lecturer_id: lecturer.identity.user_id,
            score: payload.score,
            mode: SaveMode::Create { student_id: payload.student_id, course_id: payload.course_id },
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(GradeResponse::from(grade))))
}

async fn update_grade(
    Path(grade_id): Path<String>,
    State(state): State<AppState>,
    LecturerSession(lecturer): LecturerSession,
    ApiJson(payload): ApiJson<GradeUpdate>,
) -> Result<Json<GradeResponse>, ApiError> {
    let grade = grade_book::save_grade(
        state.db(),
        SaveGrade {
            lecturer_id: lecturer.identity.user_id,
            score: payload.score,
            mode: SaveMode::Edit { grade_id },
        },
    )
    .await?;
    Ok(Json(GradeResponse::from(grade)))
}
