use crate::core::{metrics, time::primitive_now_utc};
use crate::db::models::RoleAssignment;
use crate::db::types::Role;
use crate::services::errors::PortalError;
use crate::services::stores::RoleStore;

/// Binds `role` to `user_id`, replacing any existing binding. Repeating the call leaves exactly
/// one row for the user.
pub(crate) async fn assign_role<S: RoleStore + ?Sized>(
    store: &S,
    actor_id: &str,
    user_id: &str,
    role: Option<Role>,
) -> Result<RoleAssignment, PortalError> {
    let user_id = user_id.trim();
    let Some(role) = role.filter(|_| !user_id.is_empty()) else {
        return Err(PortalError::validation("Select a user and a role"));
    };

    let exists = store
        .profile_exists(user_id)
        .await
        .map_err(PortalError::transient("Failed to assign role"))?;
    if !exists {
        return Err(PortalError::NotFound("User not found".to_string()));
    }

    let (assignment, created) = store
        .upsert_role(user_id, role, primitive_now_utc())
        .await
        .map_err(PortalError::transient("Failed to assign role"))?;

    metrics::record_role_assignment(created);
    tracing::info!(
        action = "role_assign",
        actor_id = %actor_id,
        user_id = %user_id,
        role = role.as_str(),
        created,
        "Role assigned"
    );

    Ok(assignment)
}
