//! Area-weighted categorical statistics of unstructured fields.
//!
//! Independent of the regridding chain: given per-sample areas, a
//! categorical selector and bin edges, computes the area fraction of each
//! category and the area-weighted average of an arbitrary field within
//! each category, with explicit invalid marking for starved bins.

pub mod averaging;
pub mod bins;
pub mod categories;

pub use averaging::{area_fractions, area_weighted_averages, BinnedStatistic};
pub use bins::BinSpec;
