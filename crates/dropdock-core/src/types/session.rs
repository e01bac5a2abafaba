use serde::{Deserialize, Serialize};

/// Session state reported by `/auth`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    /// Whether the session is authenticated
    #[serde(default)]
    pub valid: bool,

    /// Session ID to send on later requests
    #[serde(default)]
    pub sid: Option<String>,

    /// Seconds until the session expires
    #[serde(default)]
    pub validity: Option<i64>,

    /// Explanation when authentication failed
    #[serde(default)]
    pub message: Option<String>,
}

/// Response of `GET /auth` and `POST /auth`
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    /// Session state
    pub session: Session,
}

/// Body of `POST /auth`
#[derive(Serialize)]
pub struct AuthRequest<'a> {
    /// Web interface or application password
    pub password: &'a str,
}
