//! Find license plate regions by grouping character shaped blobs into rows.
//!
//! Blobs come in as [`GlyphCandidate`]s, get filtered one by one, grouped into
//! disjoint clusters of compatible glyphs, and every cluster is turned into an
//! oriented [`PlateRegion`] with a de-skewed crop of the source image.

use image::{ DynamicImage, GenericImageView, RgbImage };
use rayon::prelude::*;

use crate::config::DetectorConfig;
use crate::error::PlateError;

pub mod cluster;
pub mod compat;
pub mod config;
pub mod error;
pub mod filter;
pub mod glyph;
pub mod preprocess;
pub mod region;
pub mod utils;

pub use cluster::GlyphCluster;
pub use glyph::{ BoundingBox, GlyphCandidate, Point2 };
pub use region::{ PlateRegion, PlateSize };

pub struct PlateDetector {
    config: DetectorConfig,
}

impl PlateDetector {

    pub fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Detect plates in one photo with the built-in blob extraction.
    ///
    /// Large photos are scaled down first (see `PreprocessConfig::max_width`),
    /// region geometry is in the coordinates of the scaled image.
    pub fn detect(&self, img: &DynamicImage) -> Result<Vec<PlateRegion>, PlateError> {
        let (width, height) = img.dimensions();
        if width == 0 || height == 0 {
            return Err(PlateError::empty_image());
        }
        let scene = match self.config.preprocess.max_width {
            Some(max_width) => utils::resize_to_max_width(img, max_width),
            None => img.clone(),
        };
        let scene = scene.to_rgb8();

        let candidates = preprocess::extract_candidates(&scene, &self.config.preprocess);
        self.locate(candidates, &scene)
    }

    /// Run filtering, clustering and reconstruction on candidates from any
    /// extraction pipeline. Their order decides which glyph anchors a cluster.
    pub fn locate(&self, candidates: Vec<GlyphCandidate>, scene: &RgbImage) -> Result<Vec<PlateRegion>, PlateError> {
        let (width, height) = scene.dimensions();
        if width == 0 || height == 0 {
            return Err(PlateError::empty_image());
        }
        let glyphs = filter::filter_candidates(candidates, &self.config.filter);
        let clusters = cluster::build_clusters(&glyphs, &self.config.matching, &self.config.cluster);
        let regions = self.reconstruct_all(&glyphs, &clusters, scene);
        log::info!("{} possible plates found", regions.len());
        Ok(regions)
    }

    /// One region per cluster, in cluster order. Degenerate clusters are dropped.
    pub fn reconstruct_all(&self, glyphs: &[GlyphCandidate], clusters: &[GlyphCluster], scene: &RgbImage) -> Vec<PlateRegion> {
        let plate = &self.config.plate;
        clusters
            .par_iter()
            .filter_map(|c| match region::reconstruct(&c.glyphs(glyphs), scene, plate) {
                Ok(region) => Some(region),
                Err(e) => {
                    log::warn!("drop cluster of {} glyphs: {}", c.len(), e);
                    None
                }
            })
            .collect()
    }
}

impl Default for PlateDetector {
    fn default() -> Self {
        Self::new(DetectorConfig::default())
    }
}
