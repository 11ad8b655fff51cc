// ============================
// authd-backend-lib/src/auth/password.rs
// ============================
//! Password hashing and verification.
//!
//! The rest of the crate treats hashing as an opaque one-way capability:
//! a stored hash is an opaque PHC string, and verification is the only
//! operation that ever sees a plaintext again.
use scrypt::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Scrypt,
};

/// Hash a password using scrypt with a fresh random salt.
pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Scrypt.hash_password(plain.as_bytes(), &salt)?.to_string();
    Ok(hash)
}

/// Verify a password against a stored hash.
///
/// An unparseable hash verifies as false rather than erroring; a corrupt
/// stored hash must deny, not crash.
pub fn verify_password(hash: &str, plain: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };
    Scrypt.verify_password(plain.as_bytes(), &parsed_hash).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("secret").unwrap();
        assert!(verify_password(&hash, "secret"));
        assert!(!verify_password(&hash, "wrong"));
    }

    #[test]
    fn test_hashes_are_salted() {
        let h1 = hash_password("secret").unwrap();
        let h2 = hash_password("secret").unwrap();
        assert_ne!(h1, h2);
    }

    #[test]
    fn test_garbage_hash_denies() {
        assert!(!verify_password("not-a-phc-string", "secret"));
        assert!(!verify_password("", "secret"));
    }
}
