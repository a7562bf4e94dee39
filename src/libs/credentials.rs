//! Password digests and the registration/reset input rules.
//!
//! The store never sees a plain password: callers hash with [`digest`] and
//! hand the hex string to the user repository.

use super::messages::Message;
use sha2::{Digest, Sha256};

pub const MIN_PASSWORD_LEN: usize = 6;

/// Lowercase hex SHA-256 of `password`.
pub fn digest(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Rejects blank login input before it reaches the store.
pub fn check_login(identifier: &str, password: &str) -> Result<(), Message> {
    if identifier.trim().is_empty() || password.is_empty() {
        return Err(Message::AllFieldsRequired);
    }
    Ok(())
}

pub fn check_registration(username: &str, email: &str, password: &str, confirm: &str) -> Result<(), Message> {
    if username.trim().is_empty() || email.trim().is_empty() || password.is_empty() || confirm.is_empty() {
        return Err(Message::AllFieldsRequired);
    }
    if password != confirm {
        return Err(Message::PasswordsDoNotMatch);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(Message::PasswordTooShort(MIN_PASSWORD_LEN));
    }
    Ok(())
}

/// Reset only requires matching, non-empty input.
pub fn check_reset(email: &str, password: &str, confirm: &str) -> Result<(), Message> {
    if email.trim().is_empty() || password.is_empty() || confirm.is_empty() {
        return Err(Message::AllFieldsRequired);
    }
    if password != confirm {
        return Err(Message::PasswordsDoNotMatch);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_hex_sha256() {
        assert_eq!(digest("secret"), "2bb80d537b1da3e38bd30361aa855686bde0eacd7162fef6a25fe97bf527a25b");
        assert_eq!(digest("secret").len(), 64);
    }

    #[test]
    fn registration_rules() {
        assert_eq!(check_registration("", "a@b.c", "secret", "secret"), Err(Message::AllFieldsRequired));
        assert_eq!(check_registration("ann", "a@b.c", "secret", "secrets"), Err(Message::PasswordsDoNotMatch));
        assert_eq!(check_registration("ann", "a@b.c", "abc", "abc"), Err(Message::PasswordTooShort(6)));
        assert_eq!(check_registration("ann", "a@b.c", "secret", "secret"), Ok(()));
    }

    #[test]
    fn reset_has_no_length_rule() {
        assert_eq!(check_reset("a@b.c", "abc", "abc"), Ok(()));
        assert_eq!(check_reset("a@b.c", "abc", "abd"), Err(Message::PasswordsDoNotMatch));
        assert_eq!(check_login(" ", "x"), Err(Message::AllFieldsRequired));
    }
}
