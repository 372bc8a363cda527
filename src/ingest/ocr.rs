//! OCR adapter. The engine itself is external — this module only forwards
//! image bytes to it and collects the recognized text.

use std::io::Write;
use std::process::Command;

use super::IngestError;

/// Text recognition over image bytes. Implementations stay thin.
pub trait OcrEngine: Send + Sync {
    /// Recognize text in the given image. `mime_type` is the detected type,
    /// e.g. `image/png`.
    fn recognize(&self, bytes: &[u8], mime_type: &str) -> Result<String, IngestError>;
}

/// Engine that shells out to a locally installed `tesseract` binary.
pub struct TesseractCli {
    binary: String,
}

impl TesseractCli {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl OcrEngine for TesseractCli {
    fn recognize(&self, bytes: &[u8], mime_type: &str) -> Result<String, IngestError> {
        if !mime_type.starts_with("image/") {
            // Scanned PDFs need rasterization first, which this engine does not do
            return Err(IngestError::OcrUnavailable(format!(
                "{mime_type} is not directly readable by the tesseract engine"
            )));
        }

        let mut input = tempfile::NamedTempFile::new()?;
        input.write_all(bytes)?;
        input.flush()?;

        let output = Command::new(&self.binary)
            .arg(input.path())
            .arg("stdout")
            .output()
            .map_err(|e| {
                IngestError::OcrUnavailable(format!("cannot run {}: {e}", self.binary))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(IngestError::OcrFailed(stderr.trim().to_string()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Engine used when OCR is disabled; always reports unavailability.
pub struct NullOcr;

impl OcrEngine for NullOcr {
    fn recognize(&self, _bytes: &[u8], mime_type: &str) -> Result<String, IngestError> {
        Err(IngestError::OcrUnavailable(format!(
            "no OCR engine configured for {mime_type}"
        )))
    }
}
