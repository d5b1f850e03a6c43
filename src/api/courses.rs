use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::api::errors::ApiError;
use crate::api::json::ApiJson;
use crate::api::guards::{AdminSession, MemberSession};
use crate::core::{state::AppState, time::primitive_now_utc};
use crate::db;
use crate::repositories;
use crate::schemas::course::{CourseCreate, CourseResponse, CourseUpdate, DeleteCourseQuery};

const CODE_TAKEN: &str = "A course with this code already exists";

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_courses).post(create_course))
        .route("/:course_id", patch(update_course).delete(delete_course))
}

fn map_write_error(err: sqlx::Error, context: &str) -> ApiError {
    if db::is_unique_violation(&err) {
        ApiError::Conflict(CODE_TAKEN.to_string())
    } else {
        ApiError::internal(err, context)
    }
}

async fn list_courses(
    State(state): State<AppState>,
    MemberSession(viewer): MemberSession,
) -> Result<Json<Vec<CourseResponse>>, ApiError> {
    let courses = repositories::courses::list(state.db())
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list courses"))?;
    tracing::debug!(user_id = %viewer.identity.user_id, count = courses.len(), "Listed courses");
    Ok(Json(courses.into_iter().map(CourseResponse::from).collect()))
}

async fn create_course(
    State(state): State<AppState>,
    AdminSession(admin): AdminSession,
    ApiJson(payload): ApiJson<CourseCreate>,
) -> Result<(StatusCode, Json<CourseResponse>), ApiError> {
    let payload = payload.normalized();
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let course = repositories::courses::create(
        state.db(),
        repositories::courses::CreateCourse {
            id: &Uuid::new_v4().to_string(),
            code: &payload.code,
            name: &payload.name,
            credits: payload.credits,
            semester: payload.semester,
            created_at: primitive_now_utc(),
        },
    )
    .await
    .map_err(|e| map_write_error(e, "Failed to create course"))?;

    tracing::info!(
        action = "course_create",
        actor_id = %admin.identity.user_id,
        course_id = %course.id,
        code = %course.code,
        "Course created"
    );

    Ok((StatusCode::CREATED, Json(CourseResponse::from(course))))
}

async fn update_course(
    Path(course_id): Path<String>,
    State(state): State<AppState>,
    AdminSession(admin): AdminSession,
    ApiJson(payload): ApiJson<CourseUpdate>,
) -> Result<Json<CourseResponse>, ApiError> {
    let payload = payload.normalized();
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let course = repositories::courses::update(
        state.db(),
        &course_id,
        repositories::courses::UpdateCourse {
            code: payload.code,
            name: payload.name,
            credits: payload.credits,
            semester: payload.semester,
            updated_at: primitive_now_utc(),
        },
    )
    .await
    .map_err(|e| map_write_error(e, "Failed to update course"))?
    .ok_or_else(|| ApiError::NotFound("Course not found".to_string()))?;

    tracing::info!(
        action = "course_update",
        actor_id = %admin.identity.user_id,
        course_id = %course.id,
        "Course updated"
    );

    Ok(Json(CourseResponse::from(course)))
}

/// Hard delete. Requires `?confirm=true` so a stray request cannot drop a course.
async fn delete_course(
    Path(course_id): Path<String>,
    Query(query): Query<DeleteCourseQuery>,
    State(state): State<AppState>,
    AdminSession(admin): AdminSession,
) -> Result<StatusCode, ApiError> {
    if !query.confirm {
        return Err(ApiError::BadRequest(
            "Deleting a course must be confirmed with confirm=true".to_string(),
        ));
    }

    let deleted = repositories::courses::delete(state.db(), &course_id).await.map_err(|e| {
        if db::is_foreign_key_violation(&e) {
            ApiError::Conflict("Course still has recorded grades".to_string())
        } else {
            ApiError::internal(e, "Failed to delete course")
        }
    })?;
    if !deleted {
        return Err(ApiError::NotFound("Course not found".to_string()));
    }

    tracing::info!(
        action = "course_delete",
        actor_id = %admin.identity.user_id,
        course_id = %course_id,
        "Course deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}
