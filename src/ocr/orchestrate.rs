use crate::config::PipelineConfig;
use crate::log;

use super::engine::{LangHint, Recognizer};
use super::preprocess::PreprocessedVariant;

/// Text recognized from a report image, together with the language hint of
/// the attempt that produced it. Immutable once produced.
#[derive(Debug, Clone)]
pub struct RecognizedText {
    pub text: String,
    pub lang: LangHint,
}

impl RecognizedText {
    fn empty() -> Self {
        Self {
            text: String::new(),
            lang: LangHint::English,
        }
    }

    /// Trimmed character count, the quality heuristic for an attempt.
    pub fn trimmed_len(&self) -> usize {
        self.text.trim().chars().count()
    }

    /// Whether this result meets the configured acceptance threshold.
    pub fn is_acceptable(&self, cfg: &PipelineConfig) -> bool {
        cfg.is_informative(&self.text)
    }
}

/// Drives the OCR engine across preprocessing variants and language hints in
/// fallback order until a result meets the acceptance threshold.
///
/// For each variant (in priority order): try the Latin-script hint first, and
/// only if the result falls short of the threshold retry the same variant with
/// the combined Latin+Devanagari hint. Stops at the first acceptable result.
/// If every attempt falls short, returns the longest result obtained; empty
/// text if all attempts failed.
///
/// Per-attempt engine errors are logged and treated as empty results, never
/// aborting the loop. Worst case is exactly `variants.len() * 2` engine calls.
pub fn recognize_text<R: Recognizer>(
    recognizer: &R,
    variants: &[PreprocessedVariant],
    cfg: &PipelineConfig,
) -> RecognizedText {
    let mut best = RecognizedText::empty();

    for variant in variants {
        for lang in [LangHint::English, LangHint::EnglishHindi] {
            let text = match recognizer.recognize(&variant.image, lang) {
                Ok(text) => text,
                Err(e) => {
                    log(&format!(
                        "OCR attempt failed ({}, {}): {}",
                        variant.label,
                        lang.tesseract_arg(),
                        e
                    ));
                    String::new()
                }
            };

            let result = RecognizedText { text, lang };

            if result.is_acceptable(cfg) {
                log(&format!(
                    "OCR accepted: variant={} lang={} ({} chars)",
                    variant.label,
                    lang.tesseract_arg(),
                    result.trimmed_len()
                ));
                return result;
            }

            if result.trimmed_len() > best.trimmed_len() {
                best = result;
            }
        }
    }

    log(&format!(
        "OCR exhausted all variants; best result has {} chars",
        best.trimmed_len()
    ));
    best
}
