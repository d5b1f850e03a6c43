use sqlx::PgPool;

use crate::db::models::Course;

const COLUMNS: &str = "id, code, name, credits, semester, created_at, updated_at";

pub(crate) struct CreateCourse<'a> {
    pub(crate) id: &'a str,
    pub(crate) code: &'a str,
    pub(crate) name: &'a str,
    pub(crate) credits: i32,
    pub(crate) semester: i32,
    pub(crate) created_at: time::PrimitiveDateTime,
}

pub(crate) struct UpdateCourse {
    pub(crate) code: Option<String>,
    pub(crate) name: Option<String>,
    pub(crate) credits: Option<i32>,
    pub(crate) semester: Option<i32>,
    pub(crate) updated_at: time::PrimitiveDateTime,
}

pub(crate) async fn create(pool: &PgPool, params: CreateCourse<'_>) -> Result<Course, sqlx::Error> {
    sqlx::query_as::<_, Course>(&format!(
        "INSERT INTO mata_kuliah (id, code, name, credits, semester, created_at, updated_at)
         VALUES ($1,$2,$3,$4,$5,$6,$6)
         RETURNING {COLUMNS}",
    ))
    .bind(params.id)
    .bind(params.code)
    .bind(params.name)
    .bind(params.credits)
    .bind(params.semester)
    .bind(params.created_at)
    .fetch_one(pool)
    .await
}

pub(crate) async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(&format!("SELECT {COLUMNS} FROM mata_kuliah WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Catalog order: by semester, then code.
pub(crate) async fn list(pool: &PgPool) -> Result<Vec<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(&format!(
        "SELECT {COLUMNS} FROM mata_kuliah ORDER BY semester ASC, code ASC"
    ))
    .fetch_all(pool)
    .await
}

pub(crate) async fn update(
    pool: &PgPool,
    id: &str,
    params: UpdateCourse,
) -> Result<Option<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(&format!(
        "UPDATE mata_kuliah SET
            code = COALESCE($1, code),
            name = COALESCE($2, name),
            credits = COALESCE($3, credits),
            semester = COALESCE($4, semester),
            updated_at = $5
         WHERE id = $6
         RETURNING {COLUMNS}",
    ))
    .bind(params.code)
    .bind(params.name)
    .bind(params.credits)
    .bind(params.semester)
    .bind(params.updated_at)
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub(crate) async fn delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM mata_kuliah WHERE id = $1").bind(id).execute(pool).await?;
    Ok(result.rows_affected() > 0)
}

pub(crate) async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM mata_kuliah").fetch_one(pool).await
}
