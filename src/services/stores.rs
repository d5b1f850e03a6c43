use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;
use time::PrimitiveDateTime;

use crate::db::models::{Course, Grade, RoleAssignment};
use crate::db::types::{GradeLetter, Role};
use crate::repositories;

#[derive(Debug, Error)]
pub(crate) enum StoreError {
    #[error(transparent)]
    Database(sqlx::Error),
    /// The store could not be reached at all.
    #[error("{0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                Self::Unavailable(format!("database unavailable: {err}"))
            }
            other => Self::Database(other),
        }
    }
}

/// Fully-formed grade record ready for a create-mode insert.
#[derive(Debug, Clone)]
pub(crate) struct NewGrade {
    pub(crate) id: String,
    pub(crate) student_id: String,
    pub(crate) course_id: String,
    pub(crate) lecturer_id: String,
    pub(crate) score: f64,
    pub(crate) letter: GradeLetter,
    pub(crate) created_at: PrimitiveDateTime,
}

#[async_trait]
pub(crate) trait RoleStore: Send + Sync {
    async fn find_role(&self, user_id: &str) -> Result<Option<Role>, StoreError>;

    async fn profile_exists(&self, user_id: &str) -> Result<bool, StoreError>;

    /// Sets the single role binding of `user_id`. The flag is `true` when a new row was created.
    async fn upsert_role(
        &self,
        user_id: &str,
        role: Role,
        at: PrimitiveDateTime,
    ) -> Result<(RoleAssignment, bool), StoreError>;
}

#[async_trait]
pub(crate) trait CourseStore: Send + Sync {
    async fn find_course(&self, course_id: &str) -> Result<Option<Course>, StoreError>;
}

#[async_trait]
pub(crate) trait GradeStore: RoleStore + CourseStore {
    /// `None` when a record for the same (student, course) pair already exists.
    async fn insert_grade(&self, grade: NewGrade) -> Result<Option<Grade>, StoreError>;

    /// `None` when no record with `grade_id` was authored by `lecturer_id`.
    async fn update_grade_score(
        &self,
        grade_id: &str,
        lecturer_id: &str,
        score: f64,
        letter: GradeLetter,
        at: PrimitiveDateTime,
    ) -> Result<Option<Grade>, StoreError>;
}

#[async_trait]
impl RoleStore for PgPool {
    async fn find_role(&self, user_id: &str) -> Result<Option<Role>, StoreError> {
        let assignment = repositories::roles::find_for_user(self, user_id).await?;
        Ok(assignment.map(|assignment| assignment.role))
    }

    async fn profile_exists(&self, user_id: &str) -> Result<bool, StoreError> {
        Ok(repositories::profiles::exists(self, user_id).await?)
    }

    async fn upsert_role(
        &self,
        user_id: &str,
        role: Role,
        at: PrimitiveDateTime,
    ) -> Result<(RoleAssignment, bool), StoreError> {
        Ok(repositories::roles::upsert(self, user_id, role, at).await?)
    }
}

#[async_trait]
impl CourseStore for PgPool {
    async fn find_course(&self, course_id: &str) -> Result<Option<Course>, StoreError> {
        Ok(repositories::courses::find_by_id(self, course_id).await?)
    }
}

#[async_trait]
impl GradeStore for PgPool {
    async fn insert_grade(&self, grade: NewGrade) -> Result<Option<Grade>, StoreError> {
        let inserted = repositories::grades::insert(
            self,
            repositories::grades::InsertGrade {
                id: &grade.id,
                student_id: &grade.student_id,
                course_id: &grade.course_id,
                lecturer_id: &grade.lecturer_id,
                score: grade.score,
                letter: grade.letter,
                created_at: grade.created_at,
            },
        )
        .await?;
        Ok(inserted)
    }

    async fn update_grade_score(
        &self,
        grade_id: &str,
        lecturer_id: &str,
        score: f64,
        letter: GradeLetter,
        at: PrimitiveDateTime,
    ) -> Result<Option<Grade>, StoreError> {
        Ok(repositories::grades::update_score(self, grade_id, lecturer_id, score, letter, at).await?)
    }
}
