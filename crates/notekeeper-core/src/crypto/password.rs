//! Password policy and hashing.
//!
//! Enforces minimum strength requirements for account passwords and
//! produces salted Argon2id verifiers in PHC string format.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{NotesError, Result};

/// Minimum password length in characters.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Symbols that satisfy the special-character rule.
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Message reported when a password satisfies every rule.
pub const STRONG_PASSWORD_MESSAGE: &str = "Strong password.";

/// A password strength rule, named by the first one a password fails.
///
/// Rules are checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PasswordRule {
    #[error("Password must be at least 8 characters long.")]
    TooShort,

    #[error("Password must include at least one uppercase letter.")]
    MissingUppercase,

    #[error("Password must include at least one lowercase letter.")]
    MissingLowercase,

    #[error("Password must include at least one digit.")]
    MissingDigit,

    #[error("Password must include at least one special character (!@#$ etc.)")]
    MissingSpecial,
}

/// Validate a password against the strength policy.
///
/// # Requirements
///
/// - At least 8 characters long
/// - At least one uppercase letter (A-Z)
/// - At least one lowercase letter (a-z)
/// - At least one digit (0-9)
/// - At least one of `!@#$%^&*(),.?":{}|<>`
///
/// # Returns
///
/// Returns `Ok(())` if valid, or the first [`PasswordRule`] that failed.
///
/// # Examples
///
/// ```
/// use notekeeper_core::crypto::{validate_password_strength, PasswordRule};
///
/// assert!(validate_password_strength("Abc123!@").is_ok());
/// assert_eq!(validate_password_strength("short"), Err(PasswordRule::TooShort));
/// ```
pub fn validate_password_strength(password: &str) -> std::result::Result<(), PasswordRule> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(PasswordRule::TooShort);
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(PasswordRule::MissingUppercase);
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(PasswordRule::MissingLowercase);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(PasswordRule::MissingDigit);
    }
    if !password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)) {
        return Err(PasswordRule::MissingSpecial);
    }
    Ok(())
}

/// Strength verdict as an `(ok, reason)` pair for display.
pub fn password_strength_report(password: &str) -> (bool, String) {
    match validate_password_strength(password) {
        Ok(()) => (true, STRONG_PASSWORD_MESSAGE.to_string()),
        Err(rule) => (false, rule.to_string()),
    }
}

/// Argon2id cost parameters for new password verifiers.
///
/// Existing verifiers carry their own parameters, so changing the cost
/// only affects passwords hashed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashCost {
    /// Memory cost in KiB
    pub memory_kib: u32,
    /// Number of passes
    pub iterations: u32,
    /// Degree of parallelism
    pub parallelism: u32,
}

impl Default for HashCost {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

impl HashCost {
    fn hasher(&self) -> Result<Argon2<'static>> {
        let params = Params::new(self.memory_kib, self.iterations, self.parallelism, None)
            .map_err(|e| NotesError::Crypto(format!("Invalid Argon2 parameters: {}", e)))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

/// Hash a password with a fresh random salt.
///
/// Returns the PHC string (algorithm, parameters, salt and hash).
pub fn hash_password(password: &str, cost: &HashCost) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = cost
        .hasher()?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| NotesError::Crypto(format!("Password hashing failed: {}", e)))?;
    Ok(hash.to_string())
}

/// Salt for [`burn_hash_work`].
const FIXED_SALT: [u8; 16] = *b"notekeeper-dummy";

/// Run exactly one Argon2id hash at `cost` and discard the result.
///
/// Costs the same as checking a password against a verifier made at `cost`.
pub fn burn_hash_work(password: &str, cost: &HashCost) -> Result<()> {
    let salt = SaltString::encode_b64(&FIXED_SALT)
        .map_err(|e| NotesError::Crypto(format!("Invalid salt: {}", e)))?;
    cost.hasher()?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| NotesError::Crypto(format!("Password hashing failed: {}", e)))?;
    Ok(())
}

/// Check a password against a stored PHC verifier.
///
/// The comparison is constant-time. A mismatch is `Ok(false)`; only an
/// unparseable verifier is an error.
pub fn verify_password(password: &str, verifier: &str) -> Result<bool> {
    let parsed = PasswordHash::new(verifier)
        .map_err(|e| NotesError::Crypto(format!("Invalid password verifier: {}", e)))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(NotesError::Crypto(format!(
            "Password verification failed: {}",
            e
        ))),
    }
}
