//! Regridding engine between unstructured sample vectors and
//! geostationary scan rasters.
//!
//! Converts fields sampled on an irregular mesh (one longitude/latitude
//! per sample) onto a rectangular cutout of a fixed-resolution sensor
//! disk, and back-fills the holes neither strategy alone can avoid:
//!
//! ```text
//! lon/lat + field
//!      │
//!      ├─► NnIndex::build ──────────┐   (once per geometry)
//!      │                            │
//!      ├─► BoxGrouping::build ──────┤   (once per geometry)
//!      │                            ▼
//!      └─► combine(field, index, grouping)
//!               │
//!               ├─► box average where a cell received samples
//!               ├─► nearest-neighbor fallback elsewhere
//!               └─► fill value as the last resort
//!                        │
//!                        ▼
//!               RasterField (values + validity)
//! ```
//!
//! The index and grouping depend only on the input geometry and target
//! region, never on field values, so their construction is amortized
//! across every field and timestep sharing one geometry. Both are
//! read-only once built and safe to share across threads.

pub mod grouping;
pub mod nn_index;
pub mod reproject;

pub use grouping::{BoxGrouping, CellRun};
pub use nn_index::NnIndex;
pub use reproject::{
    combine, mean_ignoring_invalid, reproject_box_average, reproject_box_average_with,
    reproject_nn, CombineOptions, Reducer,
};
