pub mod api;
pub mod chat;
pub mod config;
pub mod crypto;
pub mod db;
pub mod extract;
pub mod ingest;
pub mod interpreter;
pub mod models;
pub mod modeling;
pub mod synthetic;
pub mod trends;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

/// Initialize tracing from the environment, falling back to the default filter
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}

/// Open the encrypted store and serve the dashboard until shutdown.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let data_dir = config::app_data_dir();
    let key = crypto::open_store_key(&data_dir, config::store_passphrase().as_deref())?;
    let store = db::Store::open(&config::db_path(), key)?;
    tracing::info!(reports = store.report_count(None)?, "Store opened");

    let ocr = Arc::new(ingest::TesseractCli::new(config::ocr_binary()));
    let ctx = api::ApiContext::new(Arc::new(store), ocr);

    api::server::serve(ctx, config::bind_addr()).await?;
    Ok(())
}
