use super::text_enum::text_enum;
use rusqlite::Row;
use serde::{Deserialize, Serialize};

text_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
    pub enum Role {
        Admin => "Admin",
        #[default]
        Staff => "Staff",
    }
}

/// A login account. `password_hash` is whatever digest the caller computed;
/// the store only compares and overwrites it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub user_id: Option<i64>,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub full_name: Option<String>,
    pub role: Role,
}

impl User {
    pub fn new(username: &str, email: &str, password_hash: &str, full_name: Option<&str>, role: Role) -> Self {
        Self {
            user_id: None,
            username: username.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            full_name: full_name.map(str::to_string),
            role,
        }
    }

    /// Full name when set, username otherwise.
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().filter(|name| !name.is_empty()).unwrap_or(&self.username)
    }

    pub(crate) fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            user_id: row.get("user_id")?,
            username: row.get("username")?,
            email: row.get("email")?,
            password_hash: row.get("password_hash")?,
            full_name: row.get("full_name")?,
            role: row.get("role")?,
        })
    }
}
