//! Reference blob extraction: turns a photo into glyph candidates.
//!
//! value channel -> contrast boost -> gaussian blur -> binary threshold -> contours.
//! Any other pipeline that yields bounding boxes can feed the detector instead,
//! see `PlateDetector::locate`.

use image::{ GrayImage, Luma, RgbImage };
use imageproc::contours::find_contours;
use imageproc::contrast::{ self, ThresholdType };
use imageproc::filter;
use imageproc::morphology::{ self, Mask };

use crate::config::PreprocessConfig;
use crate::glyph::GlyphCandidate;

/// Brightest channel of each pixel, the V of HSV.
pub fn value_channel(image: &RgbImage) -> GrayImage {
    let (width, height) = image.dimensions();
    GrayImage::from_fn(width, height, |x, y| {
        let [r, g, b] = image.get_pixel(x, y).0;
        Luma([r.max(g).max(b)])
    })
}

/// gray + tophat - blackhat with a 3x3 square element, saturating.
pub fn maximize_contrast(gray: &GrayImage) -> GrayImage {
    let square = Mask::square(1);
    let opened = morphology::grayscale_open(gray, &square);
    let closed = morphology::grayscale_close(gray, &square);
    let (width, height) = gray.dimensions();
    GrayImage::from_fn(width, height, |x, y| {
        let v = gray.get_pixel(x, y).0[0];
        let top_hat = v.saturating_sub(opened.get_pixel(x, y).0[0]);
        let black_hat = closed.get_pixel(x, y).0[0].saturating_sub(v);
        Luma([v.saturating_add(top_hat).saturating_sub(black_hat)])
    })
}

pub fn binarize(image: &RgbImage, config: &PreprocessConfig) -> GrayImage {
    let gray = maximize_contrast(&value_channel(image));
    let blurred = if config.blur_sigma > 0.0 {
        filter::gaussian_blur_f32(&gray, config.blur_sigma)
    } else {
        gray
    };
    // strictly above the level becomes 255
    contrast::threshold(&blurred, config.threshold, ThresholdType::Binary)
}

/// One candidate per contour of the foreground, outer borders and holes alike.
/// Contours without a usable bounding box are skipped.
pub fn find_candidates(binary: &GrayImage) -> Vec<GlyphCandidate> {
    let contours = find_contours::<u32>(binary);
    let total = contours.len();
    let candidates: Vec<GlyphCandidate> = contours
        .iter()
        .filter_map(|contour| match GlyphCandidate::from_outline(&contour.points) {
            Ok(glyph) => Some(glyph),
            Err(e) => {
                log::trace!("skip contour: {}", e);
                None
            }
        })
        .collect();
    log::debug!("{} contours, {} candidates", total, candidates.len());
    candidates
}

pub fn extract_candidates(image: &RgbImage, config: &PreprocessConfig) -> Vec<GlyphCandidate> {
    find_candidates(&binarize(image, config))
}
