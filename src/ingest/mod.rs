pub mod format;
pub mod ocr;
pub mod text;

pub use format::{detect_format, FileCategory, FormatDetection};
pub use ocr::{NullOcr, OcrEngine, TesseractCli};
pub use text::extract_text;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Unsupported file format")]
    UnsupportedFormat,

    #[error("Upload exceeds the size limit")]
    TooLarge,

    #[error("PDF text extraction failed: {0}")]
    PdfExtraction(String),

    #[error("OCR engine unavailable: {0}")]
    OcrUnavailable(String),

    #[error("OCR failed: {0}")]
    OcrFailed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
