//! Note body encryption key management.
//!
//! A single random AES-256 key encrypts every note body. It is generated the
//! first time it is needed, written to a key file outside the database, and
//! read back unchanged on every later start. There is no key rotation: if
//! the key file is lost, existing note bodies cannot be recovered.
//!
//! ## Token format
//!
//! `encrypt` returns URL-safe base64 (no padding) of:
//!
//! ```text
//! version (1 byte) || nonce (12 bytes) || ciphertext || GCM tag (16 bytes)
//! ```
//!
//! so `decrypt` needs nothing besides the key.

use std::fs;
use std::io;
use std::path::Path;

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use tracing::debug;
use zeroize::Zeroizing;

use crate::error::{NotesError, Result};

/// Length of the symmetric key in bytes (256 bits for AES-256).
pub const KEY_LENGTH: usize = 32;

/// Size of the AES-GCM nonce in bytes (96 bits).
const NONCE_SIZE: usize = 12;

/// Size of the AES-GCM authentication tag in bytes.
const TAG_SIZE: usize = 16;

/// Leading byte of every token produced by this module.
const TOKEN_VERSION: u8 = 1;

/// Owner of the process-wide note encryption key.
///
/// Construct it once at startup with [`KeyManager::obtain`] and hand a
/// reference to the note store.
pub struct KeyManager {
    /// The raw key bytes (zeroized on drop)
    key: Zeroizing<[u8; KEY_LENGTH]>,
}

impl KeyManager {
    /// Load the key stored at `path`, generating and persisting a new one if
    /// the file does not exist yet.
    ///
    /// Repeated and concurrent calls against the same path all end up with
    /// the same key: an existing file is never replaced.
    ///
    /// # Errors
    ///
    /// Returns `NotesError::KeyFile` if the file cannot be read or does not
    /// hold exactly [`KEY_LENGTH`] bytes, and `NotesError::Io` if a new key
    /// cannot be written.
    pub fn obtain(path: &Path) -> Result<Self> {
        if let Some(manager) = Self::load(path)? {
            debug!(path = %path.display(), "loaded existing encryption key");
            return Ok(manager);
        }

        let key = Self::generate_key()?;
        if crate::fs::write_new(path, &key[..])? {
            debug!(path = %path.display(), "generated new encryption key");
            return Ok(Self { key });
        }

        // Another process published its key between our read and write.
        debug!(path = %path.display(), "key file created concurrently; using it");
        Self::load(path)?.ok_or_else(|| {
            NotesError::KeyFile(format!("Key file disappeared: {}", path.display()))
        })
    }

    /// Create a key manager from raw key bytes without touching disk.
    pub fn from_bytes(bytes: [u8; KEY_LENGTH]) -> Self {
        Self {
            key: Zeroizing::new(bytes),
        }
    }

    /// Create a key manager holding a fresh random key that is not persisted.
    pub fn generate() -> Result<Self> {
        Ok(Self {
            key: Self::generate_key()?,
        })
    }

    /// Encrypt `plaintext` into a self-contained text token.
    pub fn encrypt(&self, plaintext: &str) -> Result<String> {
        let cipher = self.cipher()?;

        let mut nonce_bytes = [0u8; NONCE_SIZE];
        getrandom::getrandom(&mut nonce_bytes)
            .map_err(|e| NotesError::Crypto(format!("Failed to generate nonce: {}", e)))?;

        let ciphertext = cipher
            .encrypt(Nonce::from_slice(&nonce_bytes), plaintext.as_bytes())
            .map_err(|e| NotesError::Crypto(format!("Encryption failed: {}", e)))?;

        let mut token = Vec::with_capacity(1 + NONCE_SIZE + ciphertext.len());
        token.push(TOKEN_VERSION);
        token.extend_from_slice(&nonce_bytes);
        token.extend_from_slice(&ciphertext);

        Ok(URL_SAFE_NO_PAD.encode(token))
    }

    /// Decrypt a token produced by [`KeyManager::encrypt`].
    ///
    /// # Errors
    ///
    /// Returns `NotesError::Decryption` if the token is malformed, was
    /// produced under a different key, fails authentication, or does not
    /// decrypt to UTF-8 text.
    pub fn decrypt(&self, token: &str) -> Result<String> {
        let raw = URL_SAFE_NO_PAD
            .decode(token.trim())
            .map_err(|e| NotesError::Decryption(format!("Invalid token encoding: {}", e)))?;

        if raw.len() < 1 + NONCE_SIZE + TAG_SIZE {
            return Err(NotesError::Decryption("Token too short".to_string()));
        }
        if raw[0] != TOKEN_VERSION {
            return Err(NotesError::Decryption(format!(
                "Unsupported token version: {}",
                raw[0]
            )));
        }

        let (nonce_bytes, ciphertext) = raw[1..].split_at(NONCE_SIZE);
        let plaintext = self
            .cipher()?
            .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
            .map_err(|_| {
                NotesError::Decryption("Invalid key or corrupted data".to_string())
            })?;

        String::from_utf8(plaintext)
            .map_err(|e| NotesError::Decryption(format!("Invalid UTF-8 in plaintext: {}", e)))
    }

    fn cipher(&self) -> Result<Aes256Gcm> {
        Aes256Gcm::new_from_slice(&self.key[..])
            .map_err(|e| NotesError::Crypto(format!("Failed to create cipher: {}", e)))
    }

    fn generate_key() -> Result<Zeroizing<[u8; KEY_LENGTH]>> {
        let mut key = Zeroizing::new([0u8; KEY_LENGTH]);
        getrandom::getrandom(&mut key[..])
            .map_err(|e| NotesError::Crypto(format!("Failed to generate key bytes: {}", e)))?;
        Ok(key)
    }

    fn load(path: &Path) -> Result<Option<Self>> {
        let bytes = match fs::read(path) {
            Ok(bytes) => Zeroizing::new(bytes),
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(NotesError::KeyFile(format!(
                    "Failed to read key file {}: {}",
                    path.display(),
                    err
                )))
            }
        };

        if bytes.len() != KEY_LENGTH {
            return Err(NotesError::KeyFile(format!(
                "Key file {} must hold exactly {} bytes (found {})",
                path.display(),
                KEY_LENGTH,
                bytes.len()
            )));
        }

        let mut key = Zeroizing::new([0u8; KEY_LENGTH]);
        key.copy_from_slice(&bytes);
        Ok(Some(Self { key }))
    }
}

impl std::fmt::Debug for KeyManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyManager")
            .field("key", &"[REDACTED]")
            .finish()
    }
}
