use crate::libs::error::StoreResult;
use crate::libs::messages::Message;
use crate::libs::outcome::{unique_violation, WriteOutcome};
use crate::libs::user::User;
use rusqlite::{params, Connection, OptionalExtension};

const INSERT_USER: &str = "INSERT INTO users (username, email, password_hash, full_name, role) VALUES (?1, ?2, ?3, ?4, ?5)";
const SELECT_BY_CREDENTIALS: &str = "
    SELECT user_id, username, email, password_hash, full_name, role
    FROM users
    WHERE (username = ?1 OR email = ?1) AND password_hash = ?2
    ORDER BY user_id
    LIMIT 1
";
const SELECT_BY_EMAIL: &str = "SELECT user_id, username, email, password_hash, full_name, role FROM users WHERE email = ?1";
const UPDATE_PASSWORD: &str = "UPDATE users SET password_hash = ?2 WHERE email = ?1";

/// Account storage and the credential check. Digests are opaque here; the
/// caller decides how passwords are hashed.
pub struct Users<'a> {
    conn: &'a Connection,
}

impl<'a> Users<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn add_user(&self, user: &User) -> WriteOutcome {
        let result = self.conn.execute(
            INSERT_USER,
            params![user.username, user.email, user.password_hash, user.full_name, user.role],
        );
        match result {
            Ok(affected) => {
                tracing::debug!(username = %user.username, role = %user.role, "user registered");
                WriteOutcome::ok(Message::UserRegistered, affected)
            }
            Err(e) if unique_violation(&e).is_some() => WriteOutcome::failed(Message::UserAlreadyExists),
            Err(e) => WriteOutcome::failed(Message::UserError(e.to_string())),
        }
    }

    /// The user whose username or email is `identifier` and whose stored
    /// digest equals `password_hash`.
    pub fn authenticate(&self, identifier: &str, password_hash: &str) -> StoreResult<Option<User>> {
        let user = self
            .conn
            .query_row(SELECT_BY_CREDENTIALS, params![identifier, password_hash], User::from_row)
            .optional()?;
        tracing::debug!(identifier, matched = user.is_some(), "authentication attempt");
        Ok(user)
    }

    pub fn get_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(self.conn.query_row(SELECT_BY_EMAIL, params![email], User::from_row).optional()?)
    }

    /// Replaces the digest of the account registered under `email`; an
    /// unknown email changes nothing and still succeeds.
    pub fn update_password(&self, email: &str, password_hash: &str) -> WriteOutcome {
        match self.conn.execute(UPDATE_PASSWORD, params![email, password_hash]) {
            Ok(affected) => WriteOutcome::ok(Message::PasswordUpdated, affected),
            Err(e) => WriteOutcome::failed(Message::PasswordUpdateFailed(e.to_string())),
        }
    }
}
