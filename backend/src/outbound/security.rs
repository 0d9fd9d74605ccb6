//! Argon2id credential hashing.
//!
//! Hashes are stored as PHC strings, so salt and cost parameters travel with
//! the hash and verification reads them back from it.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};

use crate::domain::CredentialHash;
use crate::domain::ports::{CredentialHasher, CredentialHasherError};

/// [`CredentialHasher`] backed by the `argon2` crate.
#[derive(Clone, Default)]
pub struct Argon2CredentialHasher {
    argon: Argon2<'static>,
}

impl Argon2CredentialHasher {
    /// Argon2id with the crate's recommended parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Argon2id with minimal memory and time cost.
    ///
    /// Only for tests and local demos; the resulting hashes are cheap to brute force.
    ///
    /// # Errors
    ///
    /// Fails if the crate rejects the parameter set.
    pub fn low_cost() -> Result<Self, CredentialHasherError> {
        let params = Params::new(Params::MIN_M_COST, 1, 1, None)
            .map_err(|err| CredentialHasherError::hash(err.to_string()))?;
        Ok(Self {
            argon: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }
}

impl CredentialHasher for Argon2CredentialHasher {
    fn hash(&self, password: &str) -> Result<CredentialHash, CredentialHasherError> {
        let salt = SaltString::generate(&mut OsRng);
        let phc = self
            .argon
            .hash_password(password.as_bytes(), &salt)
            .map_err(|err| CredentialHasherError::hash(err.to_string()))?;
        Ok(CredentialHash::new(phc.to_string()))
    }

    fn verify(&self, password: &str, hash: &CredentialHash) -> Result<bool, CredentialHasherError> {
        let parsed = PasswordHash::new(hash.as_str())
            .map_err(|err| CredentialHasherError::malformed(err.to_string()))?;
        match self.argon.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(PasswordHashError::Password) => Ok(false),
            Err(err) => Err(CredentialHasherError::hash(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn hasher() -> Argon2CredentialHasher {
        Argon2CredentialHasher::low_cost().expect("valid params")
    }

    #[rstest]
    fn hash_is_an_argon2id_phc_string(hasher: Argon2CredentialHasher) {
        let hash = hasher.hash("correct horse").expect("hash");

        assert!(hash.as_str().starts_with("$argon2id$"));
        assert!(!hash.as_str().contains("correct horse"));
    }

    #[rstest]
    #[case("correct horse", true)]
    #[case("correct hors", false)]
    #[case("", false)]
    fn verify_matches_only_the_original(
        hasher: Argon2CredentialHasher,
        #[case] attempt: &str,
        #[case] expected: bool,
    ) {
        let hash = hasher.hash("correct horse").expect("hash");

        assert_eq!(hasher.verify(attempt, &hash).expect("verify"), expected);
    }

    #[rstest]
    fn salts_differ_between_hashes(hasher: Argon2CredentialHasher) {
        let first = hasher.hash("same").expect("hash");
        let second = hasher.hash("same").expect("hash");

        assert_ne!(first, second);
    }

    #[rstest]
    fn malformed_hash_is_reported(hasher: Argon2CredentialHasher) {
        let err = hasher
            .verify("pw", &CredentialHash::new("not-a-phc-string"))
            .expect_err("malformed");

        assert!(matches!(err, CredentialHasherError::Malformed { .. }));
    }
}
