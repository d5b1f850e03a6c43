use crate::db::types::Role;
use crate::services::stores::{RoleStore, StoreError};

/// Authenticated subject of one active auth session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Identity {
    pub(crate) user_id: String,
    pub(crate) session_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RoleState {
    Loading,
    /// `None` is the "not yet activated" state, not a failure.
    Resolved(Option<Role>),
}

/// Per-request session context. Built from the bearer token, filled in by [`RoleResolver`],
/// consumed by the access guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SessionState {
    /// Identity lookup has not finished yet.
    Initializing,
    SignedOut,
    SignedIn { identity: Identity, role: RoleState },
}

impl SessionState {
    pub(crate) fn signed_in(identity: Identity) -> Self {
        Self::SignedIn { identity, role: RoleState::Loading }
    }

    /// Settles an `Initializing` session once the identity lookup is done. Settled sessions
    /// are left as they are.
    pub(crate) fn establish(&mut self, identity: Option<Identity>) {
        if *self != Self::Initializing {
            return;
        }
        *self = match identity {
            Some(identity) => Self::signed_in(identity),
            None => Self::SignedOut,
        };
    }

    pub(crate) fn identity(&self) -> Option<&Identity> {
        match self {
            Self::SignedIn { identity, .. } => Some(identity),
            Self::Initializing | Self::SignedOut => None,
        }
    }

    pub(crate) fn role(&self) -> Option<Role> {
        match self {
            Self::SignedIn { role: RoleState::Resolved(role), .. } => *role,
            _ => None,
        }
    }

    pub(crate) fn sign_out(&mut self) {
        *self = Self::SignedOut;
    }
}

pub(crate) struct RoleResolver<'a, S: RoleStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: RoleStore + ?Sized> RoleResolver<'a, S> {
    pub(crate) fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Fetches the single role binding of a signed-in identity whose role is still loading.
    /// Other states are left untouched. On a store failure the role stays `Loading`, so no
    /// access decision can be made from it.
    pub(crate) async fn resolve(&self, session: &mut SessionState) -> Result<(), StoreError> {
        let SessionState::SignedIn { identity, role } = session else {
            return Ok(());
        };
        if *role != RoleState::Loading {
            return Ok(());
        }

        let resolved = self.store.find_role(&identity.user_id).await?;
        tracing::debug!(
            user_id = %identity.user_id,
            role = resolved.map(Role::as_str).unwrap_or("none"),
            "Resolved session role"
        );
        *role = RoleState::Resolved(resolved);
        Ok(())
    }
}
