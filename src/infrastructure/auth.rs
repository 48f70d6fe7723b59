use crate::domain::ports::CredentialVerifier;

/// Checks the single configured admin credential against a bcrypt hash.
///
/// Both values come from `AppConfig`, so rotating the password is a redeploy,
/// not a code change.
pub struct BcryptVerifier {
    username: String,
    password_hash: String,
}

impl BcryptVerifier {
    pub fn new(username: String, password_hash: String) -> Self {
        Self {
            username,
            password_hash,
        }
    }
}

impl CredentialVerifier for BcryptVerifier {
    fn verify(&self, username: &str, password: &str) -> bool {
        username == self.username && bcrypt::verify(password, &self.password_hash).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verifier() -> BcryptVerifier {
        // Minimum cost keeps the test fast; production hashes use a real cost.
        let hash = bcrypt::hash("admin123", 4).expect("hash failed");
        BcryptVerifier::new("admin".to_string(), hash)
    }

    #[test]
    fn accepts_the_configured_credential() {
        assert!(verifier().verify("admin", "admin123"));
    }

    #[test]
    fn rejects_wrong_password() {
        assert!(!verifier().verify("admin", "admin124"));
    }

    #[test]
    fn rejects_unknown_username() {
        assert!(!verifier().verify("root", "admin123"));
    }

    #[test]
    fn rejects_a_malformed_stored_hash() {
        let verifier = BcryptVerifier::new("admin".to_string(), "not-a-hash".to_string());
        assert!(!verifier.verify("admin", "admin123"));
    }
}
