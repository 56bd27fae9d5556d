use serde::{Deserialize, Serialize};

use crate::auth::login::LoginVerdict;

/// Request body for a login attempt. Absent or `null` fields count as empty.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Response returned for every login attempt.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    #[serde(flatten)]
    pub verdict: LoginVerdict,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<&'static str>,
}
