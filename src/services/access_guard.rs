use serde::Serialize;

use crate::db::types::Role;
use crate::services::session::{RoleState, SessionState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum Redirect {
    SignIn,
    Home,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AccessDecision {
    /// Identity or role still loading; show a neutral indicator and do not redirect.
    Pending,
    Denied(Redirect),
    Granted(Role),
}

/// Gates a protected view on the session and the set of roles admitted to it.
pub(crate) fn evaluate(session: &SessionState, admissible: &[Role]) -> AccessDecision {
    match session {
        SessionState::Initializing => AccessDecision::Pending,
        SessionState::SignedOut => AccessDecision::Denied(Redirect::SignIn),
        SessionState::SignedIn { role, .. } => match role {
            RoleState::Loading => AccessDecision::Pending,
            RoleState::Resolved(None) => AccessDecision::Denied(Redirect::Home),
            RoleState::Resolved(Some(role)) if admissible.contains(role) => {
                AccessDecision::Granted(*role)
            }
            RoleState::Resolved(Some(_)) => AccessDecision::Denied(Redirect::Home),
        },
    }
}

/// Where the home route sends a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Landing {
    Pending,
    SignIn,
    /// Signed in without a role: show "account not yet activated" and offer sign-out only.
    Unactivated,
    Dashboard(Role),
}

impl Landing {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Landing::Pending => "pending",
            Landing::SignIn => "sign_in",
            Landing::Unactivated => "unactivated",
            Landing::Dashboard(role) => role.as_str(),
        }
    }

    pub(crate) fn path(self) -> Option<&'static str> {
        match self {
            Landing::Dashboard(role) => Some(dashboard_path(role)),
            Landing::SignIn => Some("/auth"),
            Landing::Pending | Landing::Unactivated => None,
        }
    }
}

pub(crate) fn landing(session: &SessionState) -> Landing {
    match session {
        SessionState::Initializing => Landing::Pending,
        SessionState::SignedOut => Landing::SignIn,
        SessionState::SignedIn { role: RoleState::Loading, .. } => Landing::Pending,
        SessionState::SignedIn { role: RoleState::Resolved(None), .. } => Landing::Unactivated,
        SessionState::SignedIn { role: RoleState::Resolved(Some(role)), .. } => {
            Landing::Dashboard(*role)
        }
    }
}

pub(crate) fn dashboard_path(role: Role) -> &'static str {
    match role {
        Role::Admin => "/admin",
        Role::Dosen => "/dosen",
        Role::Mahasiswa => "/mahasiswa",
    }
}
