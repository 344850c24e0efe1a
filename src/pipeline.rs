//! End-to-end report analysis.
//!
//! raw image bytes -> preprocessing variants -> OCR fallback -> recognized
//! text -> {field extraction, interpretation} -> final message. Every value
//! is produced fresh per invocation; there is no cross-invocation state.

use anyhow::{anyhow, Context, Result};
use image::DynamicImage;
use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::config::PipelineConfig;
use crate::ocr::{ocr_report_image, RecognizedText, Recognizer};
use crate::report::{compose, degraded_summary, extract_fields, interpret, ExtractedFields};

/// The three outputs the UI layer renders: raw recognized text (for
/// transparency), extracted fields (for the debug dump), and the final
/// patient message.
#[derive(Debug, Clone)]
pub struct ReportAnalysis {
    pub recognized_text: RecognizedText,
    pub fields: ExtractedFields,
    pub message: String,
}

/// Analyzes an uploaded report image from its raw bytes.
///
/// Decode failure is fatal for the invocation and propagates as an error.
/// Insufficient OCR text is not: the degraded field set and summary are
/// substituted and the message is still composed. Any panic inside the
/// pipeline is contained and surfaced as a generic error so no partial
/// output escapes.
pub fn analyze_image_bytes<R: Recognizer>(
    recognizer: &R,
    bytes: &[u8],
    cfg: &PipelineConfig,
) -> Result<ReportAnalysis> {
    let raw = image::load_from_memory(bytes).context("could not decode the uploaded image")?;
    analyze_image(recognizer, &raw, cfg)
}

/// Analyzes an already-decoded report image.
pub fn analyze_image<R: Recognizer>(
    recognizer: &R,
    raw: &DynamicImage,
    cfg: &PipelineConfig,
) -> Result<ReportAnalysis> {
    catch_unwind(AssertUnwindSafe(|| {
        let recognized = ocr_report_image(recognizer, raw, cfg);

        let (fields, summary) = if recognized.is_acceptable(cfg) {
            (
                extract_fields(&recognized.text, cfg),
                interpret(&recognized.text, cfg),
            )
        } else {
            // Degraded path: OCR exhausted without enough text
            crate::log(&format!(
                "OCR result below threshold ({} chars), using degraded output",
                recognized.trimmed_len()
            ));
            (ExtractedFields::degraded(), degraded_summary())
        };

        let message = compose(&fields, &summary, cfg);

        ReportAnalysis {
            recognized_text: recognized,
            fields,
            message,
        }
    }))
    .map_err(|_| anyhow!("internal error while analyzing the report image"))
}

/// The pure tail of the pipeline: recognized text -> fields, summary,
/// message. Used by the debug path and anywhere OCR has already run.
pub fn analyze_text(text: &str, cfg: &PipelineConfig) -> (ExtractedFields, Vec<String>, String) {
    let (fields, summary) = if cfg.is_informative(text) {
        (extract_fields(text, cfg), interpret(text, cfg))
    } else {
        (ExtractedFields::degraded(), degraded_summary())
    };
    let message = compose(&fields, &summary, cfg);
    (fields, summary, message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ocr::LangHint;
    use image::GrayImage;

    fn cfg() -> PipelineConfig {
        PipelineConfig::default()
    }

    /// Recognizer returning the same canned text for every attempt.
    struct CannedRecognizer(String);

    impl Recognizer for CannedRecognizer {
        fn recognize(&self, _img: &GrayImage, _lang: LangHint) -> Result<String> {
            Ok(self.0.clone())
        }
    }

    fn blank_image() -> DynamicImage {
        DynamicImage::ImageLuma8(GrayImage::from_pixel(64, 64, image::Luma([255])))
    }

    #[test]
    fn test_decode_failure_is_fatal() {
        let recognizer = CannedRecognizer(String::new());
        let result = analyze_image_bytes(&recognizer, b"not an image", &cfg());
        assert!(result.is_err());
    }

    #[test]
    fn test_full_pipeline_scenario_a() {
        let text = "Name: Harish Age: 45 Years Mobile: 9876543210 Hemoglobin: 13.5 g/dL";
        let recognizer = CannedRecognizer(text.to_string());
        let analysis = analyze_image(&recognizer, &blank_image(), &cfg()).unwrap();

        assert_eq!(analysis.fields.name, "Harish");
        assert_eq!(analysis.fields.age, "45");
        assert_eq!(analysis.fields.phone, "9876543210");
        assert!(analysis.message.contains("👤 नाम: Harish"));
        assert!(analysis.message.contains("सामान्य"));
    }

    #[test]
    fn test_scenario_b_ocr_failure_takes_degraded_path() {
        let recognizer = CannedRecognizer(String::new());
        let analysis = analyze_image(&recognizer, &blank_image(), &cfg()).unwrap();

        assert_eq!(analysis.fields, ExtractedFields::degraded());
        assert!(analysis.recognized_text.text.is_empty());
        // Message is still well-formed
        assert!(analysis.message.contains("👤 नाम: Mr/Ms"));
        assert!(analysis.message.contains("🏥"));
    }

    #[test]
    fn test_analyze_text_below_threshold_is_degraded() {
        let (fields, summary, message) = analyze_text("Hb 12", &cfg());
        assert_eq!(fields, ExtractedFields::degraded());
        assert_eq!(summary, degraded_summary());
        assert!(message.contains("N/A"));
    }

    #[test]
    fn test_analyze_text_summary_bounds() {
        let text = "Name: Harish Age: 45 Years Mobile: 9876543210 Hemoglobin: 13.5 g/dL";
        let (_, summary, _) = analyze_text(text, &cfg());
        assert!(summary.len() == 5 || summary.len() == 6);
    }
}
