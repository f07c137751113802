//! Wire DTOs for the auth and overview endpoints.
//!
//! DESIGN
//! ======
//! Only `has_finished_onboarding` is required on the overview payload; the
//! guard depends on it and on `is_admin`, which older backends omit and
//! which then reads as `false`. Display fields default so a partial payload
//! still yields a usable profile.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Current user summary returned by `GET /api/me/overview`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserOverview {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub nickname: Option<String>,
    /// Therapist persona assigned to the user.
    #[serde(default)]
    pub therapist_id: String,
    pub has_finished_onboarding: bool,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub total_sessions: i64,
    /// ISO-8601 start time of the most recent session.
    #[serde(default)]
    pub last_session_time: Option<String>,
    #[serde(default)]
    pub next_plan: Option<String>,
}

/// Credentials body for login and registration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Credentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Public user record embedded in token responses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub therapist_id: String,
}

/// Response of `POST /api/auth/login` and `POST /api/auth/register`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub user: AuthUser,
}

fn default_token_type() -> String {
    "bearer".to_owned()
}
