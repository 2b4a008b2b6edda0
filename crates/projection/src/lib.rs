//! Geostationary scan-grid coordinate transformations.
//!
//! Implements the projection math from scratch without external
//! dependencies: geographic coordinates to projection-plane kilometers,
//! and plane kilometers to discrete raster rows/columns of a fixed
//! full-disk grid.

pub mod geostationary;
pub mod scan;

pub use geostationary::SatGeometry;
pub use scan::{RasterSpec, ResolutionMode, ScanGeometry};
