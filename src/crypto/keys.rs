use std::path::Path;

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::Zeroize;

use super::encryption::EncryptedData;
use super::CryptoError;

pub const PBKDF2_ITERATIONS: u32 = 600_000;
pub const KEY_LENGTH: usize = 32; // AES-256
pub const SALT_LENGTH: usize = 32;

/// Store encryption key — zeroed on drop
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct StoreKey {
    pub(super) key_bytes: [u8; KEY_LENGTH],
}

impl StoreKey {
    /// Derive from passphrase + salt using PBKDF2-SHA256
    pub fn derive(passphrase: &str, salt: &[u8; SALT_LENGTH]) -> Self {
        let mut key_bytes = [0u8; KEY_LENGTH];
        pbkdf2_hmac::<Sha256>(
            passphrase.as_bytes(),
            salt,
            PBKDF2_ITERATIONS,
            &mut key_bytes,
        );
        Self { key_bytes }
    }

    /// Generate a fresh random key
    pub fn generate() -> Self {
        use rand::RngCore;
        let mut key_bytes = [0u8; KEY_LENGTH];
        rand::thread_rng().fill_bytes(&mut key_bytes);
        Self { key_bytes }
    }

    /// Load the key from a file, creating a fresh one on first run
    pub fn load_or_create(key_path: &Path) -> Result<Self, CryptoError> {
        if key_path.exists() {
            let bytes = std::fs::read(key_path)?;
            let key_bytes: [u8; KEY_LENGTH] = bytes
                .as_slice()
                .try_into()
                .map_err(|_| CryptoError::MalformedKeyFile(key_path.display().to_string()))?;
            return Ok(Self { key_bytes });
        }

        let key = Self::generate();
        std::fs::write(key_path, key.key_bytes)?;
        Ok(key)
    }

    /// Access the raw key bytes (internal use only)
    pub(crate) fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key_bytes
    }

    /// Encrypt data using AES-256-GCM
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<EncryptedData, CryptoError> {
        EncryptedData::encrypt(&self.key_bytes, plaintext)
    }

    /// Decrypt data using AES-256-GCM
    pub fn decrypt(&self, encrypted: &EncryptedData) -> Result<Vec<u8>, CryptoError> {
        encrypted.decrypt(&self.key_bytes)
    }
}

/// Load the KDF salt from a file, creating a random one on first run
pub fn load_or_create_salt(salt_path: &Path) -> Result<[u8; SALT_LENGTH], CryptoError> {
    if salt_path.exists() {
        let bytes = std::fs::read(salt_path)?;
        return bytes
            .as_slice()
            .try_into()
            .map_err(|_| CryptoError::MalformedKeyFile(salt_path.display().to_string()));
    }

    use rand::RngCore;
    let mut salt = [0u8; SALT_LENGTH];
    rand::thread_rng().fill_bytes(&mut salt);
    std::fs::write(salt_path, salt)?;
    Ok(salt)
}
