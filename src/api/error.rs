// ABOUTME: Error taxonomy for backend API calls
// Transport failures and backend rejections surface through the same
// notification channel but stay distinguishable for callers

use thiserror::Error;

/// Fallback shown when a request never completed.
pub const MSG_CONNECTION_ERROR: &str = "Error de conexión. Por favor intente nuevamente.";

/// Failure modes of a backend API call.
///
/// `Rejected` carries the backend's own message and is surfaced verbatim;
/// everything else gets a generic fallback from [`ApiError::user_message`].
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never completed (DNS, connect, timeout, TLS...).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with `success: false`.
    #[error("{message}")]
    Rejected {
        /// Backend-provided human-readable message.
        message: String,
    },

    /// The response body did not match the documented envelope.
    #[error("invalid response from backend")]
    InvalidResponse,

    /// A downloaded file could not be written.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// Build a rejection from a backend message, with a fallback when the
    /// envelope carried none.
    pub fn rejected(message: Option<String>) -> Self {
        Self::Rejected {
            message: message.unwrap_or_else(|| "Error en la solicitud".to_string()),
        }
    }

    /// Whether this is an application-level rejection (as opposed to a
    /// transport or decoding failure).
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }

    /// Message to show the user: the backend message verbatim for
    /// rejections, a generic fallback otherwise.
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected { message } => message.clone(),
            Self::Transport(_) | Self::InvalidResponse | Self::Io(_) => {
                MSG_CONNECTION_ERROR.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_message_is_verbatim() {
        let err = ApiError::rejected(Some("El usuario se encuentra registrado".to_string()));
        assert!(err.is_rejection());
        assert_eq!(err.user_message(), "El usuario se encuentra registrado");
    }

    #[test]
    fn test_missing_backend_message_gets_fallback() {
        let err = ApiError::rejected(None);
        assert_eq!(err.user_message(), "Error en la solicitud");
    }

    #[test]
    fn test_non_rejections_use_generic_message() {
        let err = ApiError::InvalidResponse;
        assert!(!err.is_rejection());
        assert_eq!(err.user_message(), MSG_CONNECTION_ERROR);
    }
}
