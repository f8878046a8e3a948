//! Cryptographic operations for Notekeeper.
//!
//! This module provides note encryption and password handling using
//! well-audited libraries:
//! - **AES-256-GCM**: Authenticated encryption of note bodies
//! - **Argon2id**: Memory-hard password hashing
//!
//! ## Security Model
//!
//! - One random 256-bit key, kept in a key file next to the database
//! - A fresh random nonce for every encryption
//! - Passwords stored only as salted Argon2id verifiers
//! - Key material zeroized from memory on drop
//!
//! ## Threat Model
//!
//! We defend against:
//! - Theft of the database file without the key file
//! - Offline brute-force attacks on stored password verifiers
//! - Silent corruption or tampering of stored note bodies
//!
//! We do NOT defend against:
//! - Theft of the key file together with the database
//! - Compromised OS / keylogger

pub mod key;
pub mod password;

pub use key::{KeyManager, KEY_LENGTH};
pub use password::{
    burn_hash_work, hash_password, password_strength_report, validate_password_strength, verify_password,
    HashCost, PasswordRule, STRONG_PASSWORD_MESSAGE,
};
