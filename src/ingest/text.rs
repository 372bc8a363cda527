use super::format::{FileCategory, FormatDetection};
use super::ocr::OcrEngine;
use super::IngestError;

/// Extract raw text from an upload, routing by detected format.
///
/// Plain text decodes directly, digital PDFs go through the text-layer
/// extractor, and images (plus scanned PDFs) are forwarded to the OCR engine.
pub fn extract_text(
    bytes: &[u8],
    detection: &FormatDetection,
    ocr: &dyn OcrEngine,
) -> Result<String, IngestError> {
    match detection.category {
        FileCategory::PlainText => Ok(String::from_utf8_lossy(bytes).into_owned()),
        FileCategory::DigitalPdf => pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| IngestError::PdfExtraction(e.to_string())),
        FileCategory::Image | FileCategory::ScannedPdf => {
            ocr.recognize(bytes, &detection.mime_type)
        }
        FileCategory::Unsupported => Err(IngestError::UnsupportedFormat),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::format::detect_format;
    use crate::ingest::ocr::NullOcr;

    #[test]
    fn plain_text_passes_through() {
        let bytes = b"Hemoglobin: 11.9\nWBC: 8.1\nAge: 52";
        let detection = detect_format(bytes).unwrap();
        let text = extract_text(bytes, &detection, &NullOcr).unwrap();
        assert!(text.contains("Hemoglobin: 11.9"));
    }

    #[test]
    fn image_without_engine_reports_unavailable() {
        let bytes = [0xFF, 0xD8, 0xFF, 0xE0, 0x00];
        let detection = detect_format(&bytes).unwrap();
        let result = extract_text(&bytes, &detection, &NullOcr);
        assert!(matches!(result, Err(IngestError::OcrUnavailable(_))));
    }

    #[test]
    fn unsupported_format_is_rejected() {
        let bytes = [0x4D, 0x5A, 0x90, 0x00];
        let detection = detect_format(&bytes).unwrap();
        let result = extract_text(&bytes, &detection, &NullOcr);
        assert!(matches!(result, Err(IngestError::UnsupportedFormat)));
    }

    #[test]
    fn malformed_digital_pdf_reports_extraction_error() {
        // Carries enough text markers to classify as digital, but is not a valid PDF
        let bytes = b"%PDF-1.4 BT /F1 12 Tf (hello) Tj ET truncated";
        let detection = detect_format(bytes).unwrap();
        let result = extract_text(bytes, &detection, &NullOcr);
        assert!(matches!(result, Err(IngestError::PdfExtraction(_))));
    }
}
