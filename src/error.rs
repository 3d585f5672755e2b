use thiserror::Error;

#[derive(Error, Debug)]
pub enum PanelError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid server URL '{url}': {reason}")]
    InvalidServerUrl { url: String, reason: String },

    /// The request never produced an HTTP response.
    #[error("backend unreachable: {reason}")]
    Unreachable { reason: String },

    /// Non-success HTTP status. `message` is the server's `detail` when it
    /// could be parsed, otherwise the per-action fallback.
    #[error("{message}")]
    Remote { message: String },

    #[error("malformed {endpoint} response: {reason}")]
    MalformedResponse { endpoint: String, reason: String },

    #[error("backend reports Anki offline")]
    Offline,

    /// The task running a remote call died before reporting back.
    #[error("internal error: {0}")]
    Internal(String),
}

impl PanelError {
    /// Returns a user-friendly suggestion for how to fix the error.
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            PanelError::Config(_) => {
                Some("Check config.toml, or print the effective settings with `ankivert config show`.")
            }
            PanelError::InvalidServerUrl { .. } => {
                Some("Use an absolute URL such as http://127.0.0.1:8000")
            }
            PanelError::Unreachable { .. } => {
                Some("Check that the sync service is running and --server points at it.")
            }
            PanelError::Remote { .. } => Some("Check the vault path and the service log."),
            PanelError::MalformedResponse { .. } => {
                Some("The service answered with an unexpected body; check that its version matches.")
            }
            PanelError::Offline => Some("Start Anki with the AnkiConnect add-on enabled."),
            _ => None,
        }
    }
}

impl From<toml::ser::Error> for PanelError {
    fn from(err: toml::ser::Error) -> Self {
        PanelError::Config(format!("TOML serialization error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_error_displays_message_verbatim() {
        let err = PanelError::Remote {
            message: "vault not found".to_string(),
        };
        assert_eq!(err.to_string(), "vault not found");
        assert!(err.suggestion().is_some());
    }

    #[test]
    fn unreachable_display_and_suggestion() {
        let err = PanelError::Unreachable {
            reason: "connection refused".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.starts_with("backend unreachable"));
        assert!(msg.contains("connection refused"));
        assert_eq!(
            err.suggestion(),
            Some("Check that the sync service is running and --server points at it.")
        );
    }

    #[test]
    fn malformed_response_names_endpoint() {
        let err = PanelError::MalformedResponse {
            endpoint: "scan".to_string(),
            reason: "missing field `cards`".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("malformed scan response"));
        assert!(msg.contains("cards"));
    }

    #[test]
    fn io_error_no_suggestion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file gone");
        let err: PanelError = io_err.into();
        assert!(err.suggestion().is_none());
    }

    #[test]
    fn config_error_display() {
        let err = PanelError::Config("bad toml".to_string());
        let msg = format!("{}", err);
        assert!(msg.contains("Configuration error"));
        assert!(msg.contains("bad toml"));
        assert!(err.suggestion().is_some());
    }
}
