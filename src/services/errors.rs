use thiserror::Error;

use crate::services::stores::StoreError;

/// Failures of the portal's mutations. Validation failures are raised before any store call;
/// transient ones carry the store's raw message for diagnostics.
#[derive(Debug, Error)]
pub(crate) enum PortalError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{context}: {source}")]
    Transient {
        context: &'static str,
        #[source]
        source: StoreError,
    },
}

impl PortalError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn transient(context: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| Self::Transient { context, source }
    }
}
