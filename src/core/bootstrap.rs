use uuid::Uuid;

use crate::core::security;
use crate::core::state::AppState;
use crate::core::time::primitive_now_utc;
use crate::db::types::Role;
use crate::repositories;
use crate::services::role_assignment;

const BOOTSTRAP_ACTOR: &str = "bootstrap";

/// Makes sure the configured administrator can sign in and holds the admin role.
pub(crate) async fn ensure_first_admin(state: &AppState) -> anyhow::Result<()> {
    let admin = state.settings().admin();
    if admin.first_admin_password.is_empty() {
        tracing::warn!("FIRST_ADMIN_PASSWORD not configured; skipping administrator bootstrap");
        return Ok(());
    }

    let email = admin.first_admin_email.trim().to_ascii_lowercase();
    let now = primitive_now_utc();

    let profile = match repositories::profiles::find_by_email(state.db(), &email).await? {
        Some(profile) => {
            let verified =
                security::verify_password(&admin.first_admin_password, &profile.hashed_password)
                    .unwrap_or(false);
            if !verified {
                let hashed = security::hash_password(&admin.first_admin_password)?;
                repositories::profiles::update_password(state.db(), &profile.id, &hashed, now)
                    .await?;
                tracing::info!(email = %email, "Updated administrator password");
            }
            profile
        }
        None => {
            let hashed_password = security::hash_password(&admin.first_admin_password)?;
            let profile = repositories::profiles::create(
                state.db(),
                repositories::profiles::CreateProfile {
                    id: &Uuid::new_v4().to_string(),
                    email: &email,
                    hashed_password,
                    full_name: &admin.first_admin_name,
                    external_id: "ADMIN",
                    created_at: now,
                },
            )
            .await?;
            tracing::info!(email = %email, "Created administrator profile");
            profile
        }
    };

    role_assignment::assign_role(state.db(), BOOTSTRAP_ACTOR, &profile.id, Some(Role::Admin))
        .await?;

    Ok(())
}

pub(crate) async fn prune_expired_sessions(state: &AppState) -> anyhow::Result<()> {
    let pruned =
        repositories::auth_sessions::delete_expired(state.db(), primitive_now_utc()).await?;
    if pruned > 0 {
        tracing::info!(pruned, "Removed expired auth sessions");
    }
    Ok(())
}
