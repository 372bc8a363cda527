use std::net::SocketAddr;
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Vitalens";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Minimum stored reports before classifier training is allowed
pub const MIN_REPORTS_FOR_TRAINING: usize = 10;

/// Get the application data directory
/// ~/Vitalens/ on all platforms (user-visible, per design requirement)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join(APP_NAME)
}

/// Get the SQLite database path
pub fn db_path() -> PathBuf {
    app_data_dir().join("reports.db")
}

/// Store passphrase from the environment, if set.
/// When present the store key is derived from it instead of a key file.
pub fn store_passphrase() -> Option<String> {
    std::env::var("VITALENS_PASSPHRASE")
        .ok()
        .filter(|p| !p.is_empty())
}

/// OCR engine binary, overridable via environment
pub fn ocr_binary() -> String {
    std::env::var("VITALENS_TESSERACT").unwrap_or_else(|_| "tesseract".to_string())
}

/// Dashboard bind address (local-only by default)
pub fn bind_addr() -> SocketAddr {
    std::env::var("VITALENS_ADDR")
        .ok()
        .and_then(|a| a.parse().ok())
        .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 8787)))
}

pub fn default_log_filter() -> &'static str {
    "info,vitalens=debug"
}
