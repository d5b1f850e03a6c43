use sqlx::PgPool;

use crate::db::models::AuthSession;

pub(crate) async fn create(
    pool: &PgPool,
    id: &str,
    user_id: &str,
    created_at: time::PrimitiveDateTime,
    expires_at: time::PrimitiveDateTime,
) -> Result<AuthSession, sqlx::Error> {
    sqlx::query_as::<_, AuthSession>(
        "INSERT INTO auth_sessions (id, user_id, created_at, expires_at)
         VALUES ($1, $2, $3, $4)
         RETURNING id, user_id, created_at, expires_at",
    )
    .bind(id)
    .bind(user_id)
    .bind(created_at)
    .bind(expires_at)
    .fetch_one(pool)
    .await
}

pub(crate) async fn find_active(
    pool: &PgPool,
    id: &str,
    user_id: &str,
    now: time::PrimitiveDateTime,
) -> Result<Option<AuthSession>, sqlx::Error> {
    sqlx::query_as::<_, AuthSession>(
        "SELECT id, user_id, created_at, expires_at
         FROM auth_sessions
         WHERE id = $1 AND user_id = $2 AND expires_at > $3",
    )
    .bind(id)
    .bind(user_id)
    .bind(now)
    .fetch_optional(pool)
    .await
}

pub(crate) async fn delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM auth_sessions WHERE id = $1").bind(id).execute(pool).await?;
    Ok(result.rows_affected() > 0)
}

pub(crate) async fn delete_expired(
    pool: &PgPool,
    now: time::PrimitiveDateTime,
) -> Result<u64, sqlx::Error> {
    let result =
        sqlx::query("DELETE FROM auth_sessions WHERE expires_at <= $1").bind(now).execute(pool).await?;
    Ok(result.rows_affected())
}
