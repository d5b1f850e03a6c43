use uuid::Uuid;

use crate::core::{metrics, time::primitive_now_utc};
use crate::db::models::Grade;
use crate::db::types::Role;
use crate::services::errors::PortalError;
use crate::services::grade_policy::letter_of;
use crate::services::stores::{GradeStore, NewGrade};

pub(crate) const MIN_SCORE: f64 = 0.0;
pub(crate) const MAX_SCORE: f64 = 100.0;

#[derive(Debug, Clone)]
pub(crate) enum SaveMode {
    Create { student_id: Option<String>, course_id: Option<String> },
    /// Rewrites score and letter of an existing record; nothing else about it changes.
    Edit { grade_id: String },
}

impl SaveMode {
    fn as_str(&self) -> &'static str {
        match self {
            SaveMode::Create { .. } => "create",
            SaveMode::Edit { .. } => "edit",
        }
    }

    fn audit_action(&self) -> &'static str {
        match self {
            SaveMode::Create { .. } => "grade_create",
            SaveMode::Edit { .. } => "grade_update",
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct SaveGrade {
    pub(crate) lecturer_id: String,
    pub(crate) score: f64,
    pub(crate) mode: SaveMode,
}

pub(crate) fn validate_score(score: f64) -> Result<f64, PortalError> {
    if (MIN_SCORE..=MAX_SCORE).contains(&score) {
        Ok(score)
    } else {
        Err(PortalError::validation("Score must be between 0 and 100"))
    }
}

pub(crate) async fn save_grade<S: GradeStore + ?Sized>(
    store: &S,
    request: SaveGrade,
) -> Result<Grade, PortalError> {
    let score = validate_score(request.score)?;
    let letter = letter_of(score);
    let mode = request.mode.as_str();
    let action = request.mode.audit_action();
    let now = primitive_now_utc();

    let grade = match request.mode {
        SaveMode::Edit { grade_id } => store
            .update_grade_score(&grade_id, &request.lecturer_id, score, letter, now)
            .await
            .map_err(PortalError::transient("Failed to save grade"))?
            .ok_or_else(|| PortalError::NotFound("Grade not found".to_string()))?,
        SaveMode::Create { student_id, course_id } => {
            let student_id = student_id.filter(|value| !value.trim().is_empty());
            let course_id = course_id.filter(|value| !value.trim().is_empty());
            let (Some(student_id), Some(course_id)) = (student_id, course_id) else {
                return Err(PortalError::validation("Select a student and a course"));
            };

            let student_role = store
                .find_role(&student_id)
                .await
                .map_err(PortalError::transient("Failed to save grade"))?;
            if student_role != Some(Role::Mahasiswa) {
                return Err(PortalError::validation("Selected user is not a student"));
            }

            store
                .find_course(&course_id)
                .await
                .map_err(PortalError::transient("Failed to save grade"))?
                .ok_or_else(|| PortalError::NotFound("Course not found".to_string()))?;

            store
                .insert_grade(NewGrade {
                    id: Uuid::new_v4().to_string(),
                    student_id,
                    course_id,
                    lecturer_id: request.lecturer_id.clone(),
                    score,
                    letter,
                    created_at: now,
                })
                .await
                .map_err(PortalError::transient("Failed to save grade"))?
                .ok_or_else(|| {
                    PortalError::Conflict(
                        "A grade for this student and course already exists. Edit it instead."
                            .to_string(),
                    )
                })?
        }
    };

    metrics::record_grade_saved(mode);
    tracing::info!(
        action,
        grade_id = %grade.id,
        lecturer_id = %grade.lecturer_id,
        student_id = %grade.student_id,
        course_id = %grade.course_id,
        letter = grade.letter.as_str(),
        "Grade saved"
    );

    Ok(grade)
}
