use serde::{Deserialize, Serialize};

use super::IngestError;

/// Broad file categories we handle
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum FileCategory {
    DigitalPdf,
    ScannedPdf,
    Image,
    PlainText,
    Unsupported,
}

impl FileCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DigitalPdf => "digital_pdf",
            Self::ScannedPdf => "scanned_pdf",
            Self::Image => "image",
            Self::PlainText => "plain_text",
            Self::Unsupported => "unsupported",
        }
    }

    pub fn needs_ocr(&self) -> bool {
        matches!(self, Self::ScannedPdf | Self::Image)
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported)
    }
}

/// Result of format detection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatDetection {
    pub mime_type: String,
    pub category: FileCategory,
    pub is_digital_pdf: Option<bool>,
    pub file_size_bytes: u64,
}

const MAX_UPLOAD_SIZE: usize = 25 * 1024 * 1024; // 25MB

/// Detect upload format from magic bytes (NOT file extensions).
/// Magic bytes don't lie — extensions can be wrong.
pub fn detect_format(bytes: &[u8]) -> Result<FormatDetection, IngestError> {
    if bytes.len() > MAX_UPLOAD_SIZE {
        return Err(IngestError::TooLarge);
    }

    let header = &bytes[..bytes.len().min(8)];

    let (mime_type, category, is_digital_pdf) = match header {
        // PDF: starts with %PDF
        [0x25, 0x50, 0x44, 0x46, ..] => {
            let is_digital = pdf_has_text_layer(bytes);
            let category = if is_digital {
                FileCategory::DigitalPdf
            } else {
                FileCategory::ScannedPdf
            };
            ("application/pdf".to_string(), category, Some(is_digital))
        }
        // JPEG: starts with FF D8 FF
        [0xFF, 0xD8, 0xFF, ..] => ("image/jpeg".to_string(), FileCategory::Image, None),
        // PNG: starts with 89 50 4E 47
        [0x89, 0x50, 0x4E, 0x47, ..] => ("image/png".to_string(), FileCategory::Image, None),
        // TIFF: little-endian (49 49 2A 00) or big-endian (4D 4D 00 2A)
        [0x49, 0x49, 0x2A, 0x00, ..] | [0x4D, 0x4D, 0x00, 0x2A, ..] => {
            ("image/tiff".to_string(), FileCategory::Image, None)
        }
        _ => {
            if is_likely_text(bytes) {
                ("text/plain".to_string(), FileCategory::PlainText, None)
            } else {
                (
                    "application/octet-stream".to_string(),
                    FileCategory::Unsupported,
                    None,
                )
            }
        }
    };

    Ok(FormatDetection {
        mime_type,
        category,
        is_digital_pdf,
        file_size_bytes: bytes.len() as u64,
    })
}

/// Check if a PDF has an extractable text layer (digital vs scanned).
/// Heuristic: count text-related operators in the raw bytes.
fn pdf_has_text_layer(bytes: &[u8]) -> bool {
    // Inspect up to 256KB
    let slice = &bytes[..bytes.len().min(256 * 1024)];
    let content = String::from_utf8_lossy(slice);

    // BT/ET = begin/end text, Tj/TJ = show text, Tf = set font
    let text_markers = ["BT", "ET", " Tj", " TJ", " Tf"];
    let marker_count: usize = text_markers
        .iter()
        .map(|m| content.matches(m).count())
        .sum();

    marker_count >= 3
}

/// Check if an upload is likely plain text (valid UTF-8, mostly printable)
fn is_likely_text(bytes: &[u8]) -> bool {
    if bytes.is_empty() {
        return false;
    }

    let sample = &bytes[..bytes.len().min(4096)];
    let text = match std::str::from_utf8(sample) {
        Ok(t) => t,
        Err(_) => return false,
    };

    // At least 80% printable characters (or whitespace)
    let printable = text
        .chars()
        .filter(|c| !c.is_control() || c.is_whitespace())
        .count();
    let ratio = printable as f64 / text.chars().count().max(1) as f64;
    ratio > 0.80
}

/// Sanitize a client-supplied filename — strip path components, limit length
pub fn sanitize_filename(original: &str) -> String {
    let name = std::path::Path::new(original)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("report");

    let clean: String = name
        .chars()
        .filter(|c| !matches!(c, '/' | '\\' | '\0'))
        .take(255)
        .collect();

    if clean.is_empty() {
        "report".to_string()
    } else {
        clean
    }
}
