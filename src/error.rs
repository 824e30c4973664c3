//! Client-side error taxonomy.
//!
//! Transport, malformed and rejected responses are all handled the same way by
//! the controllers (logged, UI left as it was); the variants exist so callers
//! and tests can tell them apart.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The request never produced a response body.
    #[error("transport failure: {0}")]
    Transport(String),
    /// The body was not JSON, or lacked a field the client needs.
    #[error("malformed response: {0}")]
    Malformed(String),
    /// The server answered with an `error` field.
    #[error("server rejected the request: {0}")]
    Rejected(String),
    /// An attack is already awaiting its response.
    #[error("an attack is already in flight")]
    Busy,
    /// The battle has a winner; no further attacks are accepted.
    #[error("the battle is over")]
    GameOver,
    #[error("missing page element `{0}`")]
    MissingElement(String),
    #[error("invalid client configuration: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Malformed(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_errors_become_malformed() {
        let err: ClientError = serde_json::from_str::<serde_json::Value>("{oops")
            .unwrap_err()
            .into();
        assert!(matches!(err, ClientError::Malformed(_)));
    }

    #[test]
    fn messages_name_the_cause() {
        let err = ClientError::Rejected("No es tu turno".to_string());
        assert_eq!(err.to_string(), "server rejected the request: No es tu turno");
        assert_eq!(
            ClientError::MissingElement("char1_id".into()).to_string(),
            "missing page element `char1_id`"
        );
    }
}
