//! Canonical cloud-type category scheme.
//!
//! The satellite cloud-type product encodes 21 integer classes; analyses
//! report a ten-class subset (cloud classes proper, skipping the
//! processing and surface flags). Kept here so every consumer shares one
//! binning and one labeling.

use regrid_common::RegridResult;

use crate::bins::BinSpec;

/// Unit bins over the 21 cloud-type classes (edges 0..=21).
pub fn cloud_type_bins() -> RegridResult<BinSpec> {
    BinSpec::unit_bins(0, 21)
}

/// The cloud classes reported by stratified analyses, as bin indices into
/// [`cloud_type_bins`].
pub const REPORTED_CLASSES: [usize; 10] = [6, 8, 10, 12, 14, 15, 16, 17, 18, 19];

/// Display labels aligned with [`REPORTED_CLASSES`].
pub const CLASS_LABELS: [&str; 10] = [
    "very low",
    "low",
    "middle",
    "high opaque",
    "very high opaque",
    "semitransparent thin",
    "semitransparent moderately thick",
    "semitransparent thick",
    "semitransparent above",
    "fractional",
];

/// Label for a reported class, if it is one.
pub fn class_label(class: usize) -> Option<&'static str> {
    REPORTED_CLASSES
        .iter()
        .position(|&c| c == class)
        .map(|i| CLASS_LABELS[i])
}
