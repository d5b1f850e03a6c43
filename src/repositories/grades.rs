use sqlx::PgPool;

use crate::db::models::Grade;
use crate::db::types::GradeLetter;

const COLUMNS: &str =
    "id, student_id, course_id, lecturer_id, score, letter, created_at, updated_at";

pub(crate) struct InsertGrade<'a> {
    pub(crate) id: &'a str,
    pub(crate) student_id: &'a str,
    pub(crate) course_id: &'a str,
    pub(crate) lecturer_id: &'a str,
    pub(crate) score: f64,
    pub(crate) letter: GradeLetter,
    pub(crate) created_at: time::PrimitiveDateTime,
}

/// Grade row as the authoring lecturer sees it.
#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct LecturerGradeRow {
    pub(crate) id: String,
    pub(crate) student_id: String,
    pub(crate) student_name: String,
    pub(crate) student_external_id: String,
    pub(crate) course_id: String,
    pub(crate) course_code: String,
    pub(crate) course_name: String,
    pub(crate) credits: i32,
    pub(crate) score: f64,
    pub(crate) letter: GradeLetter,
    pub(crate) updated_at: time::PrimitiveDateTime,
}

/// Grade row as the owning student sees it.
#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct StudentGradeRow {
    pub(crate) id: String,
    pub(crate) course_id: String,
    pub(crate) course_code: String,
    pub(crate) course_name: String,
    pub(crate) credits: i32,
    pub(crate) semester: i32,
    pub(crate) lecturer_name: String,
    pub(crate) score: f64,
    pub(crate) letter: GradeLetter,
    pub(crate) created_at: time::PrimitiveDateTime,
}

/// Conditional insert on the `(student_id, course_id)` key. `None` means a record for that
/// pair already exists and nothing was written.
pub(crate) async fn insert(
    pool: &PgPool,
    params: InsertGrade<'_>,
) -> Result<Option<Grade>, sqlx::Error> {
    sqlx::query_as::<_, Grade>(&format!(
        "INSERT INTO nilai (
            id, student_id, course_id, lecturer_id, score, letter, created_at, updated_at
         ) VALUES ($1,$2,$3,$4,$5,$6,$7,$7)
         ON CONFLICT ON CONSTRAINT nilai_student_course_key DO NOTHING
         RETURNING {COLUMNS}",
    ))
    .bind(params.id)
    .bind(params.student_id)
    .bind(params.course_id)
    .bind(params.lecturer_id)
    .bind(params.score)
    .bind(params.letter)
    .bind(params.created_at)
    .fetch_optional(pool)
    .await
}

/// Rewrites score and letter only; the record's student, course and lecturer are never part
/// of the SET list. Scoped to the authoring lecturer.
pub(crate) async fn update_score(
    pool: &PgPool,
    id: &str,
    lecturer_id: &str,
    score: f64,
    letter: GradeLetter,
    updated_at: time::PrimitiveDateTime,
) -> Result<Option<Grade>, sqlx::Error> {
    sqlx::query_as::<_, Grade>(&format!(
        "UPDATE nilai SET score = $1, letter = $2, updated_at = $3
         WHERE id = $4 AND lecturer_id = $5
         RETURNING {COLUMNS}",
    ))
    .bind(score)
    .bind(letter)
    .bind(updated_at)
    .bind(id)
    .bind(lecturer_id)
    .fetch_optional(pool)
    .await
}

pub(crate) async fn list_for_lecturer(
    pool: &PgPool,
    lecturer_id: &str,
) -> Result<Vec<LecturerGradeRow>, sqlx::Error> {
    sqlx::query_as::<_, LecturerGradeRow>(
        "SELECT n.id,
                n.student_id,
                s.full_name AS student_name,
                s.external_id AS student_external_id,
                n.course_id,
                mk.code AS course_code,
                mk.name AS course_name,
                mk.credits,
                n.score,
                n.letter,
                n.updated_at
         FROM nilai n
         JOIN profiles s ON s.id = n.student_id
         JOIN mata_kuliah mk ON mk.id = n.course_id
         WHERE n.lecturer_id = $1
         ORDER BY mk.semester, mk.code, s.full_name",
    )
    .bind(lecturer_id)
    .fetch_all(pool)
    .await
}

pub(crate) async fn list_for_student(
    pool: &PgPool,
    student_id: &str,
) -> Result<Vec<StudentGradeRow>, sqlx::Error> {
    sqlx::query_as::<_, StudentGradeRow>(
        "SELECT n.id,
                n.course_id,
                mk.code AS course_code,
                mk.name AS course_name,
                mk.credits,
                mk.semester,
                l.full_name AS lecturer_name,
                n.score,
                n.letter,
                n.created_at
         FROM nilai n
         JOIN mata_kuliah mk ON mk.id = n.course_id
         JOIN profiles l ON l.id = n.lecturer_id
         WHERE n.student_id = $1
         ORDER BY n.created_at DESC",
    )
    .bind(student_id)
    .fetch_all(pool)
    .await
}

pub(crate) async fn count_for_lecturer(pool: &PgPool, lecturer_id: &str) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM nilai WHERE lecturer_id = $1")
        .bind(lecturer_id)
        .fetch_one(pool)
        .await
}
