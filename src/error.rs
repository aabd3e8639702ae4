use image::ImageError;
use serde_json::Error as JsonError;

use std::error::Error;
use std::fmt;
use std::io::Error as IOError;

#[derive(Debug)]
pub struct PlateError(PlateErrorKind);

#[derive(Debug)]
pub enum PlateErrorKind {
    IOError(IOError),
    ImageError(ImageError),
    ConfigError(JsonError),
    /// a raw shape whose bounding box has no area
    InvalidGlyph { width: u32, height: u32 },
    /// first and last glyph of a cluster share a center, or the cluster is empty
    DegenerateCluster,
    /// the plate rectangle leaves the rotated source image
    OutOfBoundsCrop,
    EmptyImage,
}

impl PlateError {

    pub fn kind(&self) -> &PlateErrorKind {
        &self.0
    }

    pub fn invalid_glyph(width: u32, height: u32) -> Self {
        Self(PlateErrorKind::InvalidGlyph { width, height })
    }

    pub fn degenerate_cluster() -> Self {
        Self(PlateErrorKind::DegenerateCluster)
    }

    pub fn out_of_bounds_crop() -> Self {
        Self(PlateErrorKind::OutOfBoundsCrop)
    }

    pub fn empty_image() -> Self {
        Self(PlateErrorKind::EmptyImage)
    }

    /// Errors that only affect one candidate or one cluster.
    /// Processing of the rest of the image goes on after these.
    pub fn is_recoverable(&self) -> bool {
        match self.kind() {
            PlateErrorKind::InvalidGlyph { .. }
            | PlateErrorKind::DegenerateCluster
            | PlateErrorKind::OutOfBoundsCrop => true,
            _ => false,
        }
    }
}

impl<T> From<T> for PlateError
where T: Into<PlateErrorKind>
{
    fn from(e: T) -> Self {
        Self(e.into())
    }
}

impl fmt::Display for PlateError {

    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            PlateErrorKind::IOError(e) => e.fmt(f),
            PlateErrorKind::ImageError(e) => e.fmt(f),
            PlateErrorKind::ConfigError(e) => write!(f, "invalid config: {}", e),
            PlateErrorKind::InvalidGlyph { width, height } => {
                write!(f, "invalid glyph: bounding box {}x{} has no area", width, height)
            },
            PlateErrorKind::DegenerateCluster => {
                write!(f, "degenerate cluster: cannot determine plate orientation")
            },
            PlateErrorKind::OutOfBoundsCrop => write!(f, "plate crop exceeds image bounds"),
            PlateErrorKind::EmptyImage => write!(f, "source image is empty"),
        }
    }
}

impl Error for PlateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self.kind() {
            PlateErrorKind::IOError(e) => Some(e),
            PlateErrorKind::ImageError(e) => Some(e),
            PlateErrorKind::ConfigError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<IOError> for PlateErrorKind {
    fn from(e: IOError) -> Self {
        Self::IOError(e)
    }
}

impl From<ImageError> for PlateErrorKind {
    fn from(e: ImageError) -> Self {
        Self::ImageError(e)
    }
}

impl From<JsonError> for PlateErrorKind {
    fn from(e: JsonError) -> Self {
        Self::ConfigError(e)
    }
}
