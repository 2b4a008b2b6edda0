//! Scan-grid geometry: the linear map between projection-plane kilometers
//! and discrete raster rows/columns.
//!
//! A sensor carries two raster regimes (the standard channels and the
//! high-resolution channel) with different scale and offset constants but
//! the same underlying projection. The caller selects one
//! [`ResolutionMode`] and must use it consistently for both directions of
//! a conversion.

use regrid_common::{GeoPoints, PlanePoints, RasterPoints, RegridResult, TargetRegion};
use serde::{Deserialize, Serialize};

use crate::geostationary::SatGeometry;

/// Raster regime selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionMode {
    /// Standard channel grid
    #[default]
    Low,
    /// High-resolution channel grid
    High,
}

/// Constants of one raster regime.
///
/// Columns grow east, rows grow south:
/// `col = x / resolution + col_offset`, `row = row_offset - y / resolution`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RasterSpec {
    /// Sampling distance at the sub-satellite point (km per cell)
    pub resolution_km: f64,
    /// Column of the sub-satellite point
    pub col_offset: f64,
    /// Row of the sub-satellite point
    pub row_offset: f64,
    /// Full-disk size (the disk raster is ndisk x ndisk)
    pub ndisk: usize,
}

impl RasterSpec {
    /// Convert plane kilometers to continuous raster position.
    #[inline]
    pub fn plane_to_raster_point(&self, x_km: f64, y_km: f64) -> (f64, f64) {
        let col = x_km / self.resolution_km + self.col_offset;
        let row = self.row_offset - y_km / self.resolution_km;
        (row, col)
    }

    /// Convert continuous raster position to plane kilometers.
    ///
    /// Exact algebraic inverse of [`Self::plane_to_raster_point`].
    #[inline]
    pub fn raster_to_plane_point(&self, row: f64, col: f64) -> (f64, f64) {
        let x = (col - self.col_offset) * self.resolution_km;
        let y = (self.row_offset - row) * self.resolution_km;
        (x, y)
    }
}

/// Full scan geometry of a geostationary sensor: the projection plus the
/// raster constants of both resolution regimes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScanGeometry {
    pub satellite: SatGeometry,
    pub low: RasterSpec,
    pub high: RasterSpec,
}

impl ScanGeometry {
    /// The Meteosat Second Generation SEVIRI scan geometry.
    ///
    /// 3712-cell standard disk at 3.000403 km sampling, 11136-cell
    /// high-resolution disk at 1.000134 km sampling.
    pub fn msg_seviri() -> Self {
        Self {
            satellite: SatGeometry::msg(),
            low: RasterSpec {
                resolution_km: 3.000403,
                col_offset: 1856.0,
                row_offset: 1856.0,
                ndisk: 3712,
            },
            high: RasterSpec {
                resolution_km: 1.000134,
                col_offset: 5566.0,
                row_offset: 5566.0,
                ndisk: 11136,
            },
        }
    }

    /// Raster constants for a resolution mode.
    pub fn spec(&self, mode: ResolutionMode) -> &RasterSpec {
        match mode {
            ResolutionMode::Low => &self.low,
            ResolutionMode::High => &self.high,
        }
    }

    /// Convert a plane coordinate set to continuous raster positions.
    /// Shape is preserved exactly; NaN plane coordinates stay NaN.
    pub fn plane_to_raster(
        &self,
        points: &PlanePoints,
        mode: ResolutionMode,
    ) -> RegridResult<RasterPoints> {
        let spec = self.spec(mode);
        let mut row = Vec::with_capacity(points.len());
        let mut col = Vec::with_capacity(points.len());

        for (&x, &y) in points.x().iter().zip(points.y()) {
            let (r, c) = spec.plane_to_raster_point(x, y);
            row.push(r);
            col.push(c);
        }

        RasterPoints::new(row, col)
    }

    /// Convert continuous raster positions to plane coordinates.
    pub fn raster_to_plane(
        &self,
        points: &RasterPoints,
        mode: ResolutionMode,
    ) -> RegridResult<PlanePoints> {
        let spec = self.spec(mode);
        let mut x = Vec::with_capacity(points.len());
        let mut y = Vec::with_capacity(points.len());

        for (&r, &c) in points.row().iter().zip(points.col()) {
            let (px, py) = spec.raster_to_plane_point(r, c);
            x.push(px);
            y.push(py);
        }

        PlanePoints::new(x, y)
    }

    /// Project geographic coordinates straight to continuous raster
    /// positions. Samples beyond the limb come back as NaN.
    pub fn geo_to_raster(
        &self,
        points: &GeoPoints,
        mode: ResolutionMode,
    ) -> RegridResult<RasterPoints> {
        let plane = self.satellite.geo_to_plane(points)?;
        self.plane_to_raster(&plane, mode)
    }

    /// Invert raster positions to geographic coordinates. Off-disk cells
    /// come back as NaN.
    pub fn raster_to_geo(
        &self,
        points: &RasterPoints,
        mode: ResolutionMode,
    ) -> RegridResult<GeoPoints> {
        let plane = self.raster_to_plane(points, mode)?;
        self.satellite.plane_to_geo(&plane)
    }

    /// Materialize the geographic coordinates of every cell of a target
    /// region, row-major, as used when georeferencing regridded output.
    pub fn region_geolocation(
        &self,
        region: &TargetRegion,
        mode: ResolutionMode,
    ) -> RegridResult<GeoPoints> {
        self.satellite.plane_to_geo(&self.region_plane(region, mode)?)
    }

    /// Materialize the plane coordinates of every cell of a target region,
    /// row-major.
    pub fn region_plane(
        &self,
        region: &TargetRegion,
        mode: ResolutionMode,
    ) -> RegridResult<PlanePoints> {
        let spec = self.spec(mode);
        let (row_min, row_max) = region.rows();
        let (col_min, col_max) = region.cols();

        let mut x = Vec::with_capacity(region.len());
        let mut y = Vec::with_capacity(region.len());
        for row in row_min..row_max {
            for col in col_min..col_max {
                let (px, py) = spec.raster_to_plane_point(row as f64, col as f64);
                x.push(px);
                y.push(py);
            }
        }

        PlanePoints::new(x, y)
    }
}
