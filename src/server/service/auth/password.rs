//! bcrypt password hashing.

use crate::server::error::AppError;

pub fn hash(password: &str, cost: u32) -> Result<String, AppError> {
    Ok(bcrypt::hash(password, cost)?)
}

/// Malformed stored hashes count as a mismatch.
pub fn verify(password: &str, password_hash: &str) -> bool {
    bcrypt::verify(password, password_hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verifies_matching_password() {
        let hashed = hash("correct horse", 4).unwrap();
        assert!(verify("correct horse", &hashed));
        assert!(!verify("battery staple", &hashed));
    }

    #[test]
    fn malformed_hash_does_not_match() {
        assert!(!verify("anything", "not-a-bcrypt-hash"));
    }
}
