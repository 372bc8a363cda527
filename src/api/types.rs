use std::sync::Arc;

use crate::db::Store;
use crate::ingest::OcrEngine;

/// Shared state handed to every endpoint handler
#[derive(Clone)]
pub struct ApiContext {
    store: Arc<Store>,
    ocr: Arc<dyn OcrEngine>,
}

impl ApiContext {
    pub fn new(store: Arc<Store>, ocr: Arc<dyn OcrEngine>) -> Self {
        Self { store, ocr }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn ocr(&self) -> &dyn OcrEngine {
        self.ocr.as_ref()
    }
}
