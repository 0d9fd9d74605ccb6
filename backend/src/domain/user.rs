//! Player identity and ledger model.
//!
//! A [`PlayerAccount`] is the ledger row: coin balance and high score live
//! next to the profile fields. Only the economy service moves coins; the high
//! score is only ever raised.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::Score;

/// Validation errors raised by the player value types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserValidationError {
    /// Identifier was blank.
    #[error("user id must not be empty")]
    EmptyId,
    /// Identifier was not a UUID.
    #[error("user id must be a valid UUID")]
    InvalidId,
    /// Display name was blank.
    #[error("display name must not be empty")]
    EmptyDisplayName,
    /// Display name exceeded the length limit.
    #[error("display name must be at most {max} characters")]
    DisplayNameTooLong { max: usize },
    /// Display name contained disallowed characters.
    #[error("display name may only contain letters, numbers, spaces, or _ . + -")]
    DisplayNameInvalidCharacters,
    /// Email address was not of the form `local@domain`.
    #[error("email address is invalid")]
    InvalidEmail,
    /// Password was shorter than the minimum length.
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
}

/// Stable player identifier stored as a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid, String);

impl UserId {
    /// Validate and construct a [`UserId`] from a UUID string.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Wrap an already-parsed UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid, uuid.to_string())
    }

    fn from_owned(id: String) -> Result<Self, UserValidationError> {
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::InvalidId);
        }
        let parsed = Uuid::parse_str(&id).map_err(|_| UserValidationError::InvalidId)?;
        Ok(Self(parsed, id))
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.1
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Maximum display name length in characters.
pub const DISPLAY_NAME_MAX: usize = 32;

const FALLBACK_DISPLAY_NAME: &str = "player";

fn is_display_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '+' | '-' | ' ')
}

/// Public player name; doubles as the leaderboard member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);

impl DisplayName {
    /// Validate and construct a [`DisplayName`].
    pub fn new(display_name: impl Into<String>) -> Result<Self, UserValidationError> {
        let display_name = display_name.into();
        if display_name.trim().is_empty() {
            return Err(UserValidationError::EmptyDisplayName);
        }
        if display_name.chars().count() > DISPLAY_NAME_MAX {
            return Err(UserValidationError::DisplayNameTooLong {
                max: DISPLAY_NAME_MAX,
            });
        }
        if !display_name.chars().all(is_display_name_char) {
            return Err(UserValidationError::DisplayNameInvalidCharacters);
        }
        Ok(Self(display_name))
    }

    /// Derive the initial name from the local part of an email address.
    ///
    /// Disallowed characters are dropped and the result is truncated to
    /// [`DISPLAY_NAME_MAX`]; an empty result falls back to `player`.
    pub fn from_email(email: &EmailAddress) -> Self {
        let name: String = email
            .local_part()
            .chars()
            .filter(|c| is_display_name_char(*c) && *c != ' ')
            .take(DISPLAY_NAME_MAX)
            .collect();
        if name.is_empty() {
            Self(FALLBACK_DISPLAY_NAME.to_owned())
        } else {
            Self(name)
        }
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<DisplayName> for String {
    fn from(value: DisplayName) -> Self {
        value.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

const EMAIL_MAX: usize = 254;

/// Lower-cased email address used as the login name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate the `local@domain` shape and normalise to lower case.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.len() > EMAIL_MAX || trimmed.chars().any(char::is_whitespace) {
            return Err(UserValidationError::InvalidEmail);
        }
        match trimmed.split_once('@') {
            Some((local, domain))
                if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
            {
                Ok(Self(trimmed.to_lowercase()))
            }
            _ => Err(UserValidationError::InvalidEmail),
        }
    }

    /// Part before the `@`.
    pub fn local_part(&self) -> &str {
        self.0.split_once('@').map_or(self.0.as_str(), |(local, _)| local)
    }

    /// Borrow the address.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Minimum accepted password length at registration.
pub const PASSWORD_MIN: usize = 8;

/// Email and password pair supplied at registration or login.
#[derive(Clone)]
pub struct Credentials {
    email: EmailAddress,
    password: String,
}

impl Credentials {
    /// Build credentials for login; any non-empty password is accepted.
    pub fn for_login(email: &str, password: &str) -> Result<Self, UserValidationError> {
        if password.is_empty() {
            return Err(UserValidationError::PasswordTooShort { min: 1 });
        }
        Ok(Self {
            email: EmailAddress::new(email)?,
            password: password.to_owned(),
        })
    }

    /// Build credentials for registration, enforcing [`PASSWORD_MIN`].
    pub fn for_registration(email: &str, password: &str) -> Result<Self, UserValidationError> {
        if password.chars().count() < PASSWORD_MIN {
            return Err(UserValidationError::PasswordTooShort { min: PASSWORD_MIN });
        }
        Ok(Self {
            email: EmailAddress::new(email)?,
            password: password.to_owned(),
        })
    }

    /// The login email.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// The raw password; never persisted.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Stored password credential in PHC string format.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialHash(String);

impl CredentialHash {
    /// Wrap a PHC string produced by a password hasher.
    pub fn new(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    /// Borrow the PHC string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for CredentialHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CredentialHash(<redacted>)")
    }
}

/// Authenticated caller, resolved by the inbound adapter from the session and
/// passed explicitly to every use-case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerIdentity(UserId);

impl PlayerIdentity {
    /// Wrap an authenticated user id.
    pub fn new(user_id: UserId) -> Self {
        Self(user_id)
    }

    /// The authenticated user id.
    pub fn user_id(&self) -> &UserId {
        &self.0
    }
}

/// Raised when a debit would take the balance below zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("insufficient coins: balance {balance}, required {required}")]
pub struct InsufficientCoins {
    /// Balance at the time of the debit.
    pub balance: u64,
    /// Amount the debit needed.
    pub required: u64,
}

/// Player ledger row.
///
/// ## Invariants
/// - `coins` never goes negative; debits are checked.
/// - `high_score` only increases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerAccount {
    id: UserId,
    display_name: DisplayName,
    email: EmailAddress,
    credential: CredentialHash,
    coins: u64,
    high_score: u32,
}

impl PlayerAccount {
    /// A freshly registered player: zero coins, zero high score.
    pub fn new(
        id: UserId,
        display_name: DisplayName,
        email: EmailAddress,
        credential: CredentialHash,
    ) -> Self {
        Self {
            id,
            display_name,
            email,
            credential,
            coins: 0,
            high_score: 0,
        }
    }

    /// Restore ledger figures when rehydrating from storage.
    #[must_use]
    pub fn with_ledger(mut self, coins: u64, high_score: u32) -> Self {
        self.coins = coins;
        self.high_score = high_score;
        self
    }

    /// Player identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Public name.
    pub fn display_name(&self) -> &DisplayName {
        &self.display_name
    }

    /// Login email.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Stored password credential.
    pub fn credential(&self) -> &CredentialHash {
        &self.credential
    }

    /// Current coin balance.
    pub fn coins(&self) -> u64 {
        self.coins
    }

    /// Best score recorded so far.
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Replace the public name.
    pub fn rename(&mut self, display_name: DisplayName) {
        self.display_name = display_name;
    }

    /// Raise the high score if `score` beats it. Returns whether it changed.
    pub fn record_score(&mut self, score: Score) -> bool {
        if score.value() > self.high_score {
            self.high_score = score.value();
            true
        } else {
            false
        }
    }

    /// Add coins, saturating at `u64::MAX`.
    pub fn credit(&mut self, amount: u64) {
        self.coins = self.coins.saturating_add(amount);
    }

    /// Remove coins, refusing to go below zero.
    pub fn debit(&mut self, amount: u64) -> Result<(), InsufficientCoins> {
        match self.coins.checked_sub(amount) {
            Some(remaining) => {
                self.coins = remaining;
                Ok(())
            }
            None => Err(InsufficientCoins {
                balance: self.coins,
                required: amount,
            }),
        }
    }

    /// Read-only projection handed to inbound adapters.
    pub fn profile(&self) -> PlayerProfile {
        PlayerProfile {
            id: self.id.clone(),
            display_name: self.display_name.clone(),
            email: self.email.as_str().to_owned(),
            coins: self.coins,
            high_score: self.high_score,
        }
    }
}

/// Profile view of a [`PlayerAccount`] without the credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerProfile {
    /// Player identifier.
    pub id: UserId,
    /// Public name.
    pub display_name: DisplayName,
    /// Login email.
    pub email: String,
    /// Coin balance.
    pub coins: u64,
    /// Best score.
    pub high_score: u32,
}
