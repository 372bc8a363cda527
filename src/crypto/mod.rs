pub mod encryption;
pub mod keys;

pub use encryption::EncryptedData;
pub use keys::StoreKey;

use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CryptoError {
    #[error("Encryption failed")]
    EncryptionFailed,

    #[error("Decryption failed (wrong key or tampered data)")]
    DecryptionFailed,

    #[error("Corrupted ciphertext payload")]
    CorruptedPayload,

    #[error("Key file is malformed: {0}")]
    MalformedKeyFile(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Open the store key for the given data directory.
///
/// Passphrase mode derives the key with PBKDF2 against a persisted salt;
/// otherwise a random key is loaded from (or created at) the key file.
pub fn open_store_key(
    data_dir: &Path,
    passphrase: Option<&str>,
) -> Result<StoreKey, CryptoError> {
    std::fs::create_dir_all(data_dir)?;
    match passphrase {
        Some(phrase) => {
            let salt = keys::load_or_create_salt(&data_dir.join(".store.salt"))?;
            Ok(StoreKey::derive(phrase, &salt))
        }
        None => StoreKey::load_or_create(&data_dir.join(".store.key")),
    }
}
