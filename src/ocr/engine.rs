use anyhow::{anyhow, Result};
use image::GrayImage;
use std::process::Command;
use tempfile::NamedTempFile;

use super::setup::ensure_tesseract;

/// Language hint for a recognition attempt.
///
/// `English` covers the Latin-script body of a report; `EnglishHindi` adds
/// Devanagari for labels like "नाम" that bilingual reports carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LangHint {
    English,
    EnglishHindi,
}

impl LangHint {
    /// Tesseract `-l` argument for this hint.
    pub fn tesseract_arg(&self) -> &'static str {
        match self {
            LangHint::English => "eng",
            LangHint::EnglishHindi => "eng+hin",
        }
    }
}

/// A black-box OCR backend: normalized image in, recognized text out.
///
/// Implementations must return an empty string (not an error) when no text is
/// found in a valid image.
pub trait Recognizer {
    fn recognize(&self, img: &GrayImage, lang: LangHint) -> Result<String>;
}

/// Tesseract-backed recognizer. Writes the image to a temporary PNG and runs
/// the tesseract binary with plain-text stdout output.
pub struct TesseractEngine {
    executable: std::path::PathBuf,
    tessdata: std::path::PathBuf,
}

impl TesseractEngine {
    /// Locates (and if needed downloads) the Tesseract install and trained
    /// data, then builds the recognizer.
    pub fn new() -> Result<Self> {
        let paths = ensure_tesseract()?;
        Ok(Self {
            executable: paths.executable,
            tessdata: paths.tessdata,
        })
    }
}

impl Recognizer for TesseractEngine {
    fn recognize(&self, img: &GrayImage, lang: LangHint) -> Result<String> {
        let temp_input = NamedTempFile::with_suffix(".png")?;
        img.save(temp_input.path())?;

        let output = Command::new(&self.executable)
            .arg(temp_input.path())
            .arg("stdout")
            .arg("--tessdata-dir")
            .arg(&self.tessdata)
            .arg("-l")
            .arg(lang.tesseract_arg())
            .arg("--psm")
            .arg("6") // Assume single uniform block of text
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!("Tesseract failed: {}", stderr));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}
