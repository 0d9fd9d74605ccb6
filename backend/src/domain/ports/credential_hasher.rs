//! Port for hashing and verifying account passwords.

use crate::domain::CredentialHash;

use super::define_port_error;

define_port_error! {
    /// Errors raised by credential hashers.
    pub enum CredentialHasherError {
        /// Hashing failed.
        Hash { message: String } => "password hashing failed: {message}",
        /// The stored hash could not be parsed.
        Malformed { message: String } => "stored credential is malformed: {message}",
    }
}

/// One-way password hashing.
///
/// Implementations are CPU-bound and synchronous; callers on an async
/// executor should keep the work short or move it off the reactor.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialHasher: Send + Sync {
    /// Produce a salted hash of `password`.
    fn hash(&self, password: &str) -> Result<CredentialHash, CredentialHasherError>;

    /// Check `password` against a stored hash. A mismatch is `Ok(false)`.
    fn verify(&self, password: &str, hash: &CredentialHash)
    -> Result<bool, CredentialHasherError>;
}
