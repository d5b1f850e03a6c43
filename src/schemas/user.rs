use serde::{Deserialize, Serialize};

use crate::core::time::format_primitive;
use crate::db::models::{Profile, RoleAssignment};
use crate::db::types::Role;
use crate::repositories::profiles::ProfileWithRole;

#[derive(Debug, Serialize)]
pub(crate) struct ProfileResponse {
    pub(crate) id: String,
    pub(crate) email: String,
    pub(crate) full_name: String,
    pub(crate) external_id: String,
    pub(crate) role: Option<Role>,
    pub(crate) created_at: String,
}

impl ProfileResponse {
    pub(crate) fn from_profile(profile: Profile, role: Option<Role>) -> Self {
        Self {
            id: profile.id,
            email: profile.email,
            full_name: profile.full_name,
            external_id: profile.external_id,
            role,
            created_at: format_primitive(profile.created_at),
        }
    }

    pub(crate) fn from_listing(row: ProfileWithRole) -> Self {
        Self {
            id: row.id,
            email: row.email,
            full_name: row.full_name,
            external_id: row.external_id,
            role: row.role,
            created_at: format_primitive(row.created_at),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RoleAssignRequest {
    #[serde(default)]
    pub(crate) role: Option<Role>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RoleAssignmentResponse {
    pub(crate) user_id: String,
    pub(crate) role: Role,
    pub(crate) updated_at: String,
}

impl From<RoleAssignment> for RoleAssignmentResponse {
    fn from(assignment: RoleAssignment) -> Self {
        Self {
            user_id: assignment.user_id,
            role: assignment.role,
            updated_at: format_primitive(assignment.updated_at),
        }
    }
}
