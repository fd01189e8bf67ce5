//! Argon2id password hashing for stored accounts.
//!
//! Hashes are kept in PHC string format so the salt and parameters travel with
//! the hash. Documents written by older tooling may still hold plaintext
//! passwords; [`seal_passwords`] replaces those before anything is persisted.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Argon2, ARGON2ID_IDENT};
use dashboard_types::{DashboardError, Document};

/// Hash a plaintext password using Argon2id with a random salt.
pub fn hash_password(password: &str) -> Result<String, DashboardError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(DashboardError::storage)?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC hash.
///
/// A stored value that is not a PHC string never verifies.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Only Argon2id PHC strings count as hashes. Any other value, PHC-shaped or
/// not, is treated as plaintext.
pub fn is_password_hash(stored: &str) -> bool {
    PasswordHash::new(stored).is_ok_and(|parsed| parsed.algorithm == ARGON2ID_IDENT)
}

/// Hashes every password in the document that is still plaintext.
///
/// Returns `true` when at least one account was rewritten.
pub fn seal_passwords(document: &mut Document) -> Result<bool, DashboardError> {
    let mut sealed = false;
    for user in document.users.iter_mut() {
        if !is_password_hash(&user.password) {
            tracing::debug!("Hashing plaintext password for user {}", user.id);
            user.password = hash_password(&user.password)?;
            sealed = true;
        }
    }
    Ok(sealed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_types::{Role, StoredUser, UserData, UserStatus};

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("correct-horse").expect("hashing should succeed");
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("correct-horse", &hash));
        assert!(!verify_password("wrong-horse", &hash));
    }

    #[test]
    fn test_plaintext_never_verifies() {
        assert!(!verify_password("admin", "admin"));
        assert!(!is_password_hash("admin"));
    }

    #[test]
    fn test_seal_passwords_only_touches_plaintext() {
        let hashed = hash_password("pw1").unwrap();
        let user = |id: &str, password: &str| StoredUser {
            id: id.to_string(),
            email: id.to_lowercase(),
            password: password.to_string(),
            full_name: id.to_string(),
            line_id: id.to_string(),
            role: Role::User,
            status: UserStatus::Approved,
            data: UserData::default(),
        };
        let mut document = Document::seeded(user("A", "plain"));
        document.users.push(user("B", &hashed));

        assert!(seal_passwords(&mut document).unwrap());
        assert!(verify_password("plain", &document.users[0].password));
        assert_eq!(document.users[1].password, hashed);

        assert!(!seal_passwords(&mut document).unwrap());
    }

    #[test]
    fn test_phc_shaped_plaintext_is_sealed() {
        assert!(!is_password_hash("$pw$secret"));
        assert!(is_password_hash(&hash_password("pw").unwrap()));

        let mut document = Document::seeded(StoredUser {
            id: "USR_001".to_string(),
            email: "carol".to_string(),
            password: "$pw$secret".to_string(),
            full_name: "Carol".to_string(),
            line_id: "carol".to_string(),
            role: Role::Admin,
            status: UserStatus::Approved,
            data: UserData::default(),
        });

        assert!(seal_passwords(&mut document).unwrap());
        assert!(document.users[0].password.starts_with("$argon2id$"));
        assert!(verify_password("$pw$secret", &document.users[0].password));
    }
}
