use image::{ imageops, Rgb, RgbImage };
use imageproc::geometric_transformations::{ rotate, Interpolation };

use crate::compat;
use crate::config::PlateConfig;
use crate::error::PlateError;
use crate::glyph::{ GlyphCandidate, Point2 };

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlateSize {
    pub width: u32,
    pub height: u32,
}

/// Oriented rectangle believed to hold one plate, plus its de-skewed crop.
#[derive(Debug, Clone, PartialEq)]
pub struct PlateRegion {
    pub center: Point2,
    pub size: PlateSize,
    /// positive when the glyph row falls from left to right
    pub rotation_degrees: f64,
    /// `None` when the crop left the image
    pub cropped_image: Option<RgbImage>,
}

impl PlateRegion {

    pub fn has_crop(&self) -> bool {
        self.cropped_image.is_some()
    }

    /// Corners of the rotated rectangle, same order as OpenCV's boxPoints:
    /// bottom-left, top-left, top-right, bottom-right for an unrotated box.
    pub fn corners(&self) -> [Point2; 4] {
        let angle = self.rotation_degrees.to_radians();
        let b = angle.cos() * 0.5;
        let a = angle.sin() * 0.5;
        let (w, h) = (self.size.width as f64, self.size.height as f64);
        let Point2 { x: cx, y: cy } = self.center;

        let p0 = Point2 { x: cx - a * h - b * w, y: cy + b * h - a * w };
        let p1 = Point2 { x: cx + a * h - b * w, y: cy - b * h - a * w };
        let p2 = Point2 { x: 2.0 * cx - p0.x, y: 2.0 * cy - p0.y };
        let p3 = Point2 { x: 2.0 * cx - p1.x, y: 2.0 * cy - p1.y };
        [p0, p1, p2, p3]
    }
}

/// Turn one accepted cluster into a plate region.
///
/// Group size is not checked again here. Fails with `DegenerateCluster` when
/// the cluster is empty or its leftmost and rightmost glyph share a center.
/// A crop that leaves the image is not an error: the region comes back with
/// `cropped_image` set to `None`.
pub fn reconstruct(
    glyphs: &[&GlyphCandidate],
    image: &RgbImage,
    config: &PlateConfig,
) -> Result<PlateRegion, PlateError> {
    let mut sorted = glyphs.to_vec();
    sorted.sort_by(|a, b| a.center().x.total_cmp(&b.center().x));
    let (first, last) = match (sorted.first(), sorted.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return Err(PlateError::degenerate_cluster()),
    };

    let (fc, lc) = (first.center(), last.center());
    let center = Point2 {
        x: (fc.x + lc.x) / 2.0,
        y: (fc.y + lc.y) / 2.0,
    };

    let span = last.bounding_box().x as f64 + last.width() as f64 - first.bounding_box().x as f64;
    let width = (span * config.width_padding).round().max(0.0) as u32;
    let total_height: f64 = sorted.iter().map(|g| g.height() as f64).sum();
    let average_height = total_height / sorted.len() as f64;
    let height = (average_height * config.height_padding).round().max(0.0) as u32;

    let opposite = lc.y - fc.y;
    let hypotenuse = compat::distance(first, last);
    if hypotenuse == 0.0 {
        return Err(PlateError::degenerate_cluster());
    }
    let sine = (opposite / hypotenuse).max(-1.0).min(1.0);
    let rotation_degrees = sine.asin().to_degrees();

    let mut region = PlateRegion {
        center,
        size: PlateSize { width, height },
        rotation_degrees,
        cropped_image: None,
    };
    match crop_plate(image, &region) {
        Ok(crop) => region.cropped_image = Some(crop),
        Err(e) => log::warn!(
            "plate at ({:.1}, {:.1}) {}x{}: {}",
            center.x, center.y, width, height, e
        ),
    }
    Ok(region)
}

/// Rotate the source about the plate center to undo the skew, then cut the
/// axis aligned plate rectangle out of the rotated image.
pub fn crop_plate(image: &RgbImage, region: &PlateRegion) -> Result<RgbImage, PlateError> {
    let PlateSize { width, height } = region.size;
    let (img_width, img_height) = image.dimensions();
    let left = (region.center.x - (width as f64 - 1.0) / 2.0).round();
    let top = (region.center.y - (height as f64 - 1.0) / 2.0).round();
    if width == 0
        || height == 0
        || left < 0.0
        || top < 0.0
        || left + width as f64 > img_width as f64
        || top + height as f64 > img_height as f64
    {
        return Err(PlateError::out_of_bounds_crop());
    }
    let (left, top) = (left as u32, top as u32);

    if region.rotation_degrees == 0.0 {
        return Ok(imageops::crop_imm(image, left, top, width, height).to_image());
    }
    // imageproc turns clockwise for positive angles
    let rotated = rotate(
        image,
        (region.center.x as f32, region.center.y as f32),
        -(region.rotation_degrees.to_radians() as f32),
        Interpolation::Bilinear,
        Rgb([0, 0, 0]),
    );
    Ok(imageops::crop_imm(&rotated, left, top, width, height).to_image())
}
