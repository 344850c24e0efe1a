pub mod engine;
pub mod orchestrate;
pub mod preprocess;
pub mod setup;

pub use engine::{LangHint, Recognizer, TesseractEngine};
pub use orchestrate::{recognize_text, RecognizedText};
pub use preprocess::{produce_variants, PreprocessedVariant};

use image::DynamicImage;

use crate::config::PipelineConfig;

/// High-level function: decoded report image -> recognized text.
///
/// Produces the preprocessing variants and drives the recognizer across them
/// in fallback order.
pub fn ocr_report_image<R: Recognizer>(
    recognizer: &R,
    raw: &DynamicImage,
    cfg: &PipelineConfig,
) -> RecognizedText {
    let variants = produce_variants(raw);
    recognize_text(recognizer, &variants, cfg)
}
