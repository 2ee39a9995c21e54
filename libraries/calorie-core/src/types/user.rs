/// User domain types
use crate::types::{DailyLog, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User account with an embedded food log
///
/// The password hash is never serialized into responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier
    pub id: UserId,

    /// Globally unique username
    pub username: String,

    /// bcrypt hash of the account password
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Contact email
    pub email: String,

    /// Account creation timestamp
    pub created_at: DateTime<Utc>,

    /// Dated food log, one `DailyLog` per distinct date key
    pub food_log: Vec<DailyLog>,
}

impl User {
    /// Create a new user account with an empty food log
    pub fn new(new_user: NewUser) -> Self {
        Self {
            id: UserId::generate(),
            username: new_user.username,
            password_hash: new_user.password_hash,
            email: new_user.email,
            created_at: Utc::now(),
            food_log: Vec::new(),
        }
    }

    /// Create a user with specific fields (for database loading)
    pub fn with_id(
        id: UserId,
        username: impl Into<String>,
        password_hash: impl Into<String>,
        email: impl Into<String>,
        created_at: DateTime<Utc>,
        food_log: Vec<DailyLog>,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            password_hash: password_hash.into(),
            email: email.into(),
            created_at,
            food_log,
        }
    }
}

/// Fields required to create a user account
///
/// The password must already be hashed; the store never sees plaintext.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Globally unique username
    pub username: String,

    /// bcrypt hash of the account password
    pub password_hash: String,

    /// Contact email
    pub email: String,
}

/// Updatable account fields
///
/// Absent fields are left unchanged. The username and password are fixed
/// after creation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUser {
    /// New contact email
    pub email: Option<String>,
}
