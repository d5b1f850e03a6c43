use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::RoleAssignment;
use crate::db::types::Role;

const COLUMNS: &str = "id, user_id, role, created_at, updated_at";

pub(crate) async fn find_for_user(
    pool: &PgPool,
    user_id: &str,
) -> Result<Option<RoleAssignment>, sqlx::Error> {
    sqlx::query_as::<_, RoleAssignment>(&format!(
        "SELECT {COLUMNS} FROM user_roles WHERE user_id = $1"
    ))
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/// Single-statement upsert keyed on `user_id`; an existing binding is rewritten in place.
/// The flag is true when the row was inserted rather than updated.
pub(crate) async fn upsert(
    pool: &PgPool,
    user_id: &str,
    role: Role,
    now: time::PrimitiveDateTime,
) -> Result<(RoleAssignment, bool), sqlx::Error> {
    #[derive(sqlx::FromRow)]
    struct Upserted {
        #[sqlx(flatten)]
        assignment: RoleAssignment,
        inserted: bool,
    }

    let row = sqlx::query_as::<_, Upserted>(&format!(
        "INSERT INTO user_roles (id, user_id, role, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $4)
         ON CONFLICT (user_id)
         DO UPDATE SET role = EXCLUDED.role, updated_at = EXCLUDED.updated_at
         RETURNING {COLUMNS}, (xmax = 0) AS inserted",
    ))
    .bind(Uuid::new_v4().to_string())
    .bind(user_id)
    .bind(role)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok((row.assignment, row.inserted))
}

pub(crate) async fn count_by_role(pool: &PgPool) -> Result<Vec<(Role, i64)>, sqlx::Error> {
    sqlx::query_as::<_, (Role, i64)>(
        "SELECT role, COUNT(*) FROM user_roles GROUP BY role ORDER BY role",
    )
    .fetch_all(pool)
    .await
}
