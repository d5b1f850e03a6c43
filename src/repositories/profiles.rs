use sqlx::PgPool;

use crate::db::models::Profile;
use crate::db::types::Role;

const COLUMNS: &str =
    "id, email, hashed_password, full_name, external_id, created_at, updated_at";

/// Profile joined with its role binding, if any.
#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct ProfileWithRole {
    pub(crate) id: String,
    pub(crate) email: String,
    pub(crate) full_name: String,
    pub(crate) external_id: String,
    pub(crate) role: Option<Role>,
    pub(crate) created_at: time::PrimitiveDateTime,
}

pub(crate) struct CreateProfile<'a> {
    pub(crate) id: &'a str,
    pub(crate) email: &'a str,
    pub(crate) hashed_password: String,
    pub(crate) full_name: &'a str,
    pub(crate) external_id: &'a str,
    pub(crate) created_at: time::PrimitiveDateTime,
}

pub(crate) async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Profile>, sqlx::Error> {
    sqlx::query_as::<_, Profile>(&format!("SELECT {COLUMNS} FROM profiles WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub(crate) async fn find_by_email(
    pool: &PgPool,
    email: &str,
) -> Result<Option<Profile>, sqlx::Error> {
    sqlx::query_as::<_, Profile>(&format!(
        "SELECT {COLUMNS} FROM profiles WHERE lower(email) = lower($1)"
    ))
    .bind(email)
    .fetch_optional(pool)
    .await
}

pub(crate) async fn exists(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM profiles WHERE id = $1)")
        .bind(id)
        .fetch_one(pool)
        .await
}

pub(crate) async fn create(
    pool: &PgPool,
    params: CreateProfile<'_>,
) -> Result<Profile, sqlx::Error> {
    sqlx::query_as::<_, Profile>(&format!(
        "INSERT INTO profiles (
            id, email, hashed_password, full_name, external_id, created_at, updated_at
         ) VALUES ($1,$2,$3,$4,$5,$6,$6)
         RETURNING {COLUMNS}",
    ))
    .bind(params.id)
    .bind(params.email)
    .bind(params.hashed_password)
    .bind(params.full_name)
    .bind(params.external_id)
    .bind(params.created_at)
    .fetch_one(pool)
    .await
}

pub(crate) async fn update_password(
    pool: &PgPool,
    id: &str,
    hashed_password: &str,
    updated_at: time::PrimitiveDateTime,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE profiles SET hashed_password = $1, updated_at = $2 WHERE id = $3")
        .bind(hashed_password)
        .bind(updated_at)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

pub(crate) async fn list_with_roles(pool: &PgPool) -> Result<Vec<ProfileWithRole>, sqlx::Error> {
    sqlx::query_as::<_, ProfileWithRole>(
        "SELECT p.id, p.email, p.full_name, p.external_id, ur.role, p.created_at
         FROM profiles p
         LEFT JOIN user_roles ur ON ur.user_id = p.id
         ORDER BY p.full_name, p.id",
    )
    .fetch_all(pool)
    .await
}

pub(crate) async fn list_by_role(
    pool: &PgPool,
    role: Role,
) -> Result<Vec<ProfileWithRole>, sqlx::Error> {
    sqlx::query_as::<_, ProfileWithRole>(
        "SELECT p.id, p.email, p.full_name, p.external_id, ur.role, p.created_at
         FROM profiles p
         JOIN user_roles ur ON ur.user_id = p.id
         WHERE ur.role = $1
         ORDER BY p.full_name, p.id",
    )
    .bind(role)
    .fetch_all(pool)
    .await
}

pub(crate) async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM profiles").fetch_one(pool).await
}

pub(crate) async fn count_by_role(pool: &PgPool, role: Role) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM profiles p JOIN user_roles ur ON ur.user_id = p.id WHERE ur.role = $1",
    )
    .bind(role)
    .fetch_one(pool)
    .await
}
