use imageproc::point::Point;

use crate::error::PlateError;

/// Axis aligned box in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

/// One blob that may be a plate character.
///
/// Area, center and diagonal all come from the bounding box, not from the
/// blob pixels. Candidates have no value equality: two geometrically equal
/// candidates are still different glyphs, callers tell them apart by their
/// index in the candidate slice.
#[derive(Debug, Clone)]
pub struct GlyphCandidate {
    bounding_box: BoundingBox,
    area: u32,
    center: Point2,
    diagonal_size: f64,
    aspect_ratio: f64,
}

impl GlyphCandidate {

    /// Fails with `InvalidGlyph` unless width and height are both positive
    /// and their product fits the area.
    pub fn new(bounding_box: BoundingBox) -> Result<Self, PlateError> {
        let BoundingBox { x, y, width, height } = bounding_box;
        if width == 0 || height == 0 {
            return Err(PlateError::invalid_glyph(width, height));
        }
        let area = width
            .checked_mul(height)
            .ok_or_else(|| PlateError::invalid_glyph(width, height))?;
        let (w, h) = (width as f64, height as f64);
        let center = Point2 {
            x: x as f64 + w / 2.0,
            y: y as f64 + h / 2.0,
        };
        Ok(Self {
            bounding_box,
            area,
            center,
            diagonal_size: (w * w + h * h).sqrt(),
            aspect_ratio: w / h,
        })
    }

    pub fn from_rect(x: i32, y: i32, width: u32, height: u32) -> Result<Self, PlateError> {
        Self::new(BoundingBox { x, y, width, height })
    }

    /// Build from a blob outline. The box covers every outline pixel,
    /// so a single pixel outline gives a 1x1 box.
    pub fn from_outline(points: &[Point<u32>]) -> Result<Self, PlateError> {
        let first = match points.first() {
            Some(p) => p,
            None => return Err(PlateError::invalid_glyph(0, 0)),
        };
        let (min_x, min_y, max_x, max_y) = points.iter().fold(
            (first.x, first.y, first.x, first.y),
            |(min_x, min_y, max_x, max_y), p| {
                (min_x.min(p.x), min_y.min(p.y), max_x.max(p.x), max_y.max(p.y))
            },
        );
        Self::from_rect(min_x as i32, min_y as i32, max_x - min_x + 1, max_y - min_y + 1)
    }

    pub fn bounding_box(&self) -> &BoundingBox {
        &self.bounding_box
    }

    pub fn area(&self) -> u32 {
        self.area
    }

    pub fn center(&self) -> Point2 {
        self.center
    }

    pub fn diagonal_size(&self) -> f64 {
        self.diagonal_size
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    pub fn width(&self) -> u32 {
        self.bounding_box.width
    }

    pub fn height(&self) -> u32 {
        self.bounding_box.height
    }
}

#[cfg(test)]
mod test {

    use imageproc::point::Point;

    use std::error::Error;

    use super::GlyphCandidate;
    use crate::error::PlateErrorKind;

    #[test]
    fn derived_metrics() -> Result<(), Box<dyn Error>> {
        let glyph = GlyphCandidate::from_rect(100, 88, 15, 25)?;
        assert_eq!(glyph.area(), 375);
        assert_eq!(glyph.center().x, 107.5);
        assert_eq!(glyph.center().y, 100.5);
        assert!((glyph.diagonal_size() - 850f64.sqrt()).abs() < 1e-12);
        assert!((glyph.aspect_ratio() - 0.6).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn zero_height_is_rejected() {
        let err = GlyphCandidate::from_rect(10, 10, 20, 0).unwrap_err();
        match err.kind() {
            PlateErrorKind::InvalidGlyph { width: 20, height: 0 } => {},
            other => panic!("unexpected kind {:?}", other),
        }
    }

    #[test]
    fn oversized_box_is_rejected() {
        let err = GlyphCandidate::from_rect(0, 0, 70_000, 70_000).unwrap_err();
        match err.kind() {
            PlateErrorKind::InvalidGlyph { width: 70_000, height: 70_000 } => {},
            other => panic!("unexpected kind {:?}", other),
        }
        assert!(GlyphCandidate::from_rect(0, 0, 65_535, 65_535).is_ok());
    }

    #[test]
    fn outline_bounds() -> Result<(), Box<dyn Error>> {
        let outline = vec![Point::new(5u32, 7), Point::new(9, 7), Point::new(9, 12), Point::new(5, 12)];
        let glyph = GlyphCandidate::from_outline(&outline)?;
        let rect = glyph.bounding_box();
        assert_eq!((rect.x, rect.y, rect.width, rect.height), (5, 7, 5, 6));
        assert!(GlyphCandidate::from_outline(&[]).is_err());
        Ok(())
    }
}
