use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage};
use imageproc::contrast::{adaptive_threshold, equalize_histogram, otsu_level, threshold, ThresholdType};
use imageproc::filter::{gaussian_blur_f32, median_filter};

/// Fixed binary threshold for the third variant. Works for clean scans with
/// dark print on a light background.
const FIXED_THRESHOLD: u8 = 160;

/// Block radius for adaptive thresholding. Large enough to span a text line
/// at typical phone-photo resolutions.
const ADAPTIVE_BLOCK_RADIUS: u32 = 12;

/// A normalized single-channel image together with the label of the
/// enhancement strategy that produced it.
#[derive(Debug, Clone)]
pub struct PreprocessedVariant {
    pub label: &'static str,
    pub image: GrayImage,
}

/// Produces candidate normalized images from a decoded report photo, in fixed
/// priority order. Different source defects (uneven lighting, low contrast,
/// noise, scan artifacts) respond better to different strategies, so several
/// cheap variants are produced and tried in turn rather than attempting to
/// detect the defect type.
///
/// Always returns at least one variant. Deterministic for identical input.
pub fn produce_variants(raw: &DynamicImage) -> Vec<PreprocessedVariant> {
    let gray = raw.to_luma8();

    vec![
        PreprocessedVariant {
            label: "adaptive-equalized",
            image: adaptive_equalized(&gray),
        },
        PreprocessedVariant {
            label: "otsu-blur",
            image: otsu_blur(&gray),
        },
        PreprocessedVariant {
            label: "fixed-threshold",
            image: fixed_threshold(&gray),
        },
        PreprocessedVariant {
            label: "adaptive-fast",
            image: adaptive_fast(&gray),
        },
    ]
}

/// Variant 1: histogram equalization + adaptive thresholding + denoise + upscale.
/// Best for photos with uneven lighting (shadows across the page).
fn adaptive_equalized(gray: &GrayImage) -> GrayImage {
    let equalized = equalize_histogram(gray);
    let binary = adaptive_threshold(&equalized, ADAPTIVE_BLOCK_RADIUS);
    upscale(&denoise(&binary))
}

/// Variant 2: contrast boost + Gaussian blur + Otsu global threshold + denoise
/// + upscale. Best for low-contrast but evenly lit images.
fn otsu_blur(gray: &GrayImage) -> GrayImage {
    let boosted = imageops::contrast(gray, 20.0);
    let blurred = gaussian_blur_f32(&boosted, 1.0);
    let level = otsu_level(&blurred);
    let binary = threshold(&blurred, level, ThresholdType::Binary);
    upscale(&denoise(&binary))
}

/// Variant 3: fixed-value binary threshold + denoise + upscale.
/// Best for clean flatbed scans.
fn fixed_threshold(gray: &GrayImage) -> GrayImage {
    let binary = threshold(gray, FIXED_THRESHOLD, ThresholdType::Binary);
    upscale(&denoise(&binary))
}

/// Variant 4: adaptive thresholding without upscale. Last resort, cheapest.
fn adaptive_fast(gray: &GrayImage) -> GrayImage {
    adaptive_threshold(gray, ADAPTIVE_BLOCK_RADIUS)
}

/// Removes salt-and-pepper noise left over from thresholding.
fn denoise(img: &GrayImage) -> GrayImage {
    median_filter(img, 1, 1)
}

/// 2x bicubic upscale. Tesseract recognition improves noticeably when
/// character height in phone photos is doubled.
fn upscale(img: &GrayImage) -> GrayImage {
    let (w, h) = img.dimensions();
    imageops::resize(img, w * 2, h * 2, FilterType::CatmullRom)
}
