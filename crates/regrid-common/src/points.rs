//! Coordinate set record types.
//!
//! Each stage of the projection chain carries its own record type so shape
//! invariants are checked once at construction instead of at every use:
//! geographic coordinates, projection-plane coordinates, and continuous
//! raster positions. All sets are flat sample vectors; callers with 2-D
//! unstructured arrays flatten them row-major before entry.

use crate::error::{RegridError, RegridResult};

/// A set of geographic sample coordinates in degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoPoints {
    lon: Vec<f64>,
    lat: Vec<f64>,
}

impl GeoPoints {
    /// Create a new coordinate set.
    ///
    /// Fails with `ShapeMismatch` if the two arrays differ in length.
    pub fn new(lon: Vec<f64>, lat: Vec<f64>) -> RegridResult<Self> {
        if lon.len() != lat.len() {
            return Err(RegridError::shape_mismatch(lon.len(), lat.len()));
        }
        Ok(Self { lon, lat })
    }

    /// Longitudes in degrees east.
    pub fn lon(&self) -> &[f64] {
        &self.lon
    }

    /// Latitudes in degrees north.
    pub fn lat(&self) -> &[f64] {
        &self.lat
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.lon.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.lon.is_empty()
    }
}

/// A set of projection-plane coordinates in kilometers.
///
/// Derived deterministically from a [`GeoPoints`] set by the geostationary
/// forward transform. Samples beyond the visible disk carry NaN coordinates;
/// they are skipped by downstream consumers, not treated as errors.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanePoints {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl PlanePoints {
    /// Create a new plane coordinate set.
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> RegridResult<Self> {
        if x.len() != y.len() {
            return Err(RegridError::shape_mismatch(x.len(), y.len()));
        }
        Ok(Self { x, y })
    }

    /// X coordinates (kilometers, positive east of the sub-satellite point).
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Y coordinates (kilometers, positive north).
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Continuous (unrounded) raster positions, one per sample.
///
/// Row/column values are real-valued; rounding to integer cells happens in
/// the grouping builder. Unprojectable samples carry NaN positions.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterPoints {
    row: Vec<f64>,
    col: Vec<f64>,
}

impl RasterPoints {
    /// Create a new raster position set.
    pub fn new(row: Vec<f64>, col: Vec<f64>) -> RegridResult<Self> {
        if row.len() != col.len() {
            return Err(RegridError::shape_mismatch(row.len(), col.len()));
        }
        Ok(Self { row, col })
    }

    /// Row positions.
    pub fn row(&self) -> &[f64] {
        &self.row
    }

    /// Column positions.
    pub fn col(&self) -> &[f64] {
        &self.col
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.row.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.row.is_empty()
    }
}
