use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Participant,
    Admin,
}

/// The active session user. Overwritten wholesale on every login or
/// registration; `is_logged_in` never makes it into the registrant list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub email: String,
    pub password: String,
    pub nickname: String,
    pub role: Role,
    #[serde(with = "time::serde::rfc3339")]
    pub joined_at: OffsetDateTime,
    pub is_logged_in: bool,
}

impl User {
    pub fn record(&self) -> RegistrantRecord {
        RegistrantRecord {
            email: self.email.clone(),
            password: self.password.clone(),
            nickname: self.nickname.clone(),
            role: self.role,
            joined_at: self.joined_at,
        }
    }
}

/// One entry of the durable registrant list, keyed by `email`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrantRecord {
    pub email: String,
    pub password: String,
    pub nickname: String,
    pub role: Role,
    #[serde(with = "time::serde::rfc3339")]
    pub joined_at: OffsetDateTime,
}

/// Partial user supplied by a login or registration attempt.
///
/// Merge precedence against the stored registrant list entry:
/// - `role`: patch, then existing, then [`Role::Participant`]
/// - `password`, `nickname`: patch if present (an empty string counts as
///   present), then existing, then `""`
/// - `joined_at`: existing always wins, then patch, then now
/// - `is_logged_in`: true unless the patch explicitly says `false`
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub email: String,
    pub password: Option<String>,
    pub nickname: Option<String>,
    pub role: Option<Role>,
    pub joined_at: Option<OffsetDateTime>,
    pub is_logged_in: Option<bool>,
}
