use crate::config::MatchConfig;
use crate::glyph::GlyphCandidate;

/// Euclidean distance between the two centers.
pub fn distance(a: &GlyphCandidate, b: &GlyphCandidate) -> f64 {
    let (ca, cb) = (a.center(), b.center());
    (ca.x - cb.x).hypot(ca.y - cb.y)
}

/// Angle of the line through both centers against the x axis, in degrees.
/// Vertically aligned centers give exactly 90.
pub fn angle_degrees(a: &GlyphCandidate, b: &GlyphCandidate) -> f64 {
    let (ca, cb) = (a.center(), b.center());
    let dx = (ca.x - cb.x).abs();
    let dy = (ca.y - cb.y).abs();
    if dx == 0.0 {
        return 90.0;
    }
    (dy / dx).atan().to_degrees()
}

/// Relative changes of `b` against the anchor `a`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairDelta {
    pub distance: f64,
    pub angle: f64,
    pub area_change: f64,
    pub width_change: f64,
    pub height_change: f64,
}

impl PairDelta {

    pub fn between(a: &GlyphCandidate, b: &GlyphCandidate) -> Self {
        Self {
            distance: distance(a, b),
            angle: angle_degrees(a, b),
            area_change: relative_change(a.area(), b.area()),
            width_change: relative_change(a.width(), b.width()),
            height_change: relative_change(a.height(), b.height()),
        }
    }
}

// anchor is never zero, GlyphCandidate::new rejects empty boxes
fn relative_change(anchor: u32, other: u32) -> f64 {
    (other as f64 - anchor as f64).abs() / anchor as f64
}

/// Whether `b` could be another character of the plate anchored at `a`.
///
/// All ratios are relative to `a`, so `is_match(a, b)` and `is_match(b, a)`
/// can disagree. Clustering relies on that: the anchor picks its matches.
pub fn is_match(a: &GlyphCandidate, b: &GlyphCandidate, config: &MatchConfig) -> bool {
    let delta = PairDelta::between(a, b);
    delta.distance < a.diagonal_size() * config.max_diag_multiple
        && delta.angle < config.max_angle
        && delta.area_change < config.max_area_change
        && delta.width_change < config.max_width_change
        && delta.height_change < config.max_height_change
}

#[cfg(test)]
mod test {

    use std::error::Error;

    use super::{angle_degrees, distance, is_match, PairDelta};
    use crate::config::MatchConfig;
    use crate::glyph::GlyphCandidate;

    #[test]
    fn vertical_pair_is_ninety_degrees() -> Result<(), Box<dyn Error>> {
        let a = GlyphCandidate::from_rect(100, 100, 16, 24)?;
        let b = GlyphCandidate::from_rect(100, 150, 16, 24)?;
        assert_eq!(angle_degrees(&a, &b), 90.0);
        assert_eq!(distance(&a, &b), 50.0);
        assert!(!is_match(&a, &b, &MatchConfig::default()));
        Ok(())
    }

    #[test]
    fn angle_is_symmetric() -> Result<(), Box<dyn Error>> {
        let a = GlyphCandidate::from_rect(10, 10, 16, 24)?;
        let b = GlyphCandidate::from_rect(40, 17, 18, 20)?;
        assert_eq!(angle_degrees(&a, &b), angle_degrees(&b, &a));
        assert!((angle_degrees(&a, &b) - (5.0f64 / 31.0).atan().to_degrees()).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn neighbours_on_a_row_match() -> Result<(), Box<dyn Error>> {
        let a = GlyphCandidate::from_rect(100, 88, 15, 25)?;
        let b = GlyphCandidate::from_rect(130, 88, 15, 25)?;
        assert!(is_match(&a, &b, &MatchConfig::default()));
        assert!(is_match(&b, &a, &MatchConfig::default()));
        Ok(())
    }

    #[test]
    fn match_is_not_symmetric() -> Result<(), Box<dyn Error>> {
        let config = MatchConfig::default();
        // area 400 vs 580: +45% seen from the small one, -31% from the big one
        let small = GlyphCandidate::from_rect(0, 0, 20, 20)?;
        let big = GlyphCandidate::from_rect(30, 0, 29, 20)?;
        let forward = PairDelta::between(&small, &big);
        let backward = PairDelta::between(&big, &small);
        assert!((forward.area_change - 0.45).abs() < 1e-12);
        assert!((backward.area_change - 180.0 / 580.0).abs() < 1e-12);
        assert_eq!(forward.angle, backward.angle);

        // height 20 vs 24: +20% from the small one is not < 0.2, -16.7% from the tall one is
        let short = GlyphCandidate::from_rect(0, 0, 20, 20)?;
        let tall = GlyphCandidate::from_rect(30, 0, 20, 24)?;
        assert!(!is_match(&short, &tall, &config));
        assert!(is_match(&tall, &short, &config));
        Ok(())
    }

    #[test]
    fn too_far_apart() -> Result<(), Box<dyn Error>> {
        let a = GlyphCandidate::from_rect(0, 0, 15, 25)?;
        // diagonal ~29.15, limit ~145.8
        let b = GlyphCandidate::from_rect(150, 0, 15, 25)?;
        assert!(!is_match(&a, &b, &MatchConfig::default()));
        Ok(())
    }
}
