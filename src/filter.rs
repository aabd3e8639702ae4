use rayon::prelude::*;

use crate::config::GlyphFilterConfig;
use crate::glyph::GlyphCandidate;

/// Whether one shape on its own looks like a plate character.
/// Does not compare against other shapes.
pub fn is_plausible_glyph(glyph: &GlyphCandidate, config: &GlyphFilterConfig) -> bool {
    let aspect = glyph.aspect_ratio();
    glyph.area() > config.min_area
        && glyph.width() > config.min_width
        && glyph.height() > config.min_height
        && config.min_aspect < aspect
        && aspect < config.max_aspect
}

/// Keep the plausible glyphs, in input order.
pub fn filter_candidates(candidates: Vec<GlyphCandidate>, config: &GlyphFilterConfig) -> Vec<GlyphCandidate> {
    let total = candidates.len();
    let kept: Vec<GlyphCandidate> = candidates
        .into_par_iter()
        .filter(|glyph| is_plausible_glyph(glyph, config))
        .collect();
    log::debug!("{} of {} candidates look like glyphs", kept.len(), total);
    kept
}

#[cfg(test)]
mod test {

    use std::error::Error;

    use super::{filter_candidates, is_plausible_glyph};
    use crate::config::GlyphFilterConfig;
    use crate::glyph::GlyphCandidate;

    #[test]
    fn accepts_typical_glyph() -> Result<(), Box<dyn Error>> {
        let config = GlyphFilterConfig::default();
        let glyph = GlyphCandidate::from_rect(0, 0, 16, 24)?;
        assert!(is_plausible_glyph(&glyph, &config));
        // same answer every time
        assert!(is_plausible_glyph(&glyph, &config));
        Ok(())
    }

    #[test]
    fn bounds_are_exclusive() -> Result<(), Box<dyn Error>> {
        let config = GlyphFilterConfig::default();
        // aspect ratio exactly 0.6
        assert!(!is_plausible_glyph(&GlyphCandidate::from_rect(0, 0, 15, 25)?, &config));
        // aspect ratio exactly 1.0
        assert!(!is_plausible_glyph(&GlyphCandidate::from_rect(0, 0, 20, 20)?, &config));
        // width 12
        assert!(!is_plausible_glyph(&GlyphCandidate::from_rect(0, 0, 12, 19)?, &config));
        // height 18
        assert!(!is_plausible_glyph(&GlyphCandidate::from_rect(0, 0, 17, 18)?, &config));
        // 13 x 19 = 247, too small
        assert!(!is_plausible_glyph(&GlyphCandidate::from_rect(0, 0, 13, 19)?, &config));
        Ok(())
    }

    #[test]
    fn tuned_thresholds() -> Result<(), Box<dyn Error>> {
        let config = GlyphFilterConfig { min_area: 50, min_width: 4, min_height: 6, ..Default::default() };
        let glyph = GlyphCandidate::from_rect(0, 0, 8, 12)?;
        assert!(is_plausible_glyph(&glyph, &config));
        assert!(!is_plausible_glyph(&glyph, &GlyphFilterConfig::default()));
        Ok(())
    }

    #[test]
    fn filter_keeps_order() -> Result<(), Box<dyn Error>> {
        let candidates = vec![
            GlyphCandidate::from_rect(0, 0, 16, 24)?,
            GlyphCandidate::from_rect(1, 0, 40, 10)?,
            GlyphCandidate::from_rect(2, 0, 17, 25)?,
            GlyphCandidate::from_rect(3, 0, 2, 2)?,
            GlyphCandidate::from_rect(4, 0, 18, 26)?,
        ];
        let kept = filter_candidates(candidates, &GlyphFilterConfig::default());
        let xs: Vec<i32> = kept.iter().map(|g| g.bounding_box().x).collect();
        assert_eq!(xs, vec![0, 2, 4]);
        Ok(())
    }
}
