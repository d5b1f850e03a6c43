use axum::{routing::get, Json, Router};

use crate::api::guards::SessionContext;
use crate::core::state::AppState;
use crate::schemas::session::SessionResponse;
use crate::services::access_guard::{self, Landing};
use crate::services::session::SessionState;

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/", get(current_session))
}

/// Where the home route should send this session. Unactivated accounts get no dashboard,
/// only the sign-out offer.
pub(crate) fn describe(session: &SessionState) -> SessionResponse {
    let landing = access_guard::landing(session);
    let identity = session.identity();

    SessionResponse {
        signed_in: identity.is_some(),
        user_id: identity.map(|identity| identity.user_id.clone()),
        role: session.role(),
        landing: landing.as_str(),
        path: landing.path(),
        can_sign_out: matches!(landing, Landing::Unactivated | Landing::Dashboard(_)),
    }
}

async fn current_session(context: SessionContext) -> Json<SessionResponse> {
    Json(describe(&context.session))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::types::Role;
    use crate::services::session::{Identity, RoleState};

    fn signed_in(role: Option<Role>) -> SessionState {
        SessionState::SignedIn {
            identity: Identity { user_id: "u1".to_string(), session_id: "s1".to_string() },
            role: RoleState::Resolved(role),
        }
    }

    #[test]
    fn unactivated_account_only_offers_sign_out() {
        let response = describe(&signed_in(None));
        assert!(response.signed_in);
        assert_eq!(response.landing, "unactivated");
        assert_eq!(response.path, None);
        assert!(response.can_sign_out);
    }

    #[test]
    fn lecturer_lands_on_lecturer_dashboard() {
        let response = describe(&signed_in(Some(Role::Dosen)));
        assert_eq!(response.landing, "dosen");
        assert_eq!(response.path, Some("/dosen"));
        assert_eq!(response.user_id.as_deref(), Some("u1"));
    }
}
