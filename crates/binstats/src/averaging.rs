//! Area-weighted bin-wise statistics of unstructured fields.
//!
//! Unstructured samples do not represent equal physical area, so plain
//! means are biased; every statistic here weights by the per-sample area.
//! Degenerate divisions (zero total area, a bin with no valid weighted
//! area) are converted to explicit invalid markers, never propagated as
//! raw NaN or infinity.

use regrid_common::{RegridError, RegridResult, ValidityMask};

use crate::bins::BinSpec;

/// A per-category statistic with explicit validity.
#[derive(Debug, Clone, PartialEq)]
pub struct BinnedStatistic {
    values: Vec<f64>,
    valid: ValidityMask,
}

impl BinnedStatistic {
    fn new(values: Vec<f64>, valid: ValidityMask) -> Self {
        debug_assert_eq!(values.len(), valid.len());
        Self { values, valid }
    }

    /// The raw per-bin values. Invalid bins hold NaN.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// The per-bin validity bitmap.
    pub fn validity(&self) -> &ValidityMask {
        &self.valid
    }

    /// Number of bins.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if there are zero bins.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get a bin value, or None if the bin is invalid.
    pub fn get(&self, bin: usize) -> Option<f64> {
        if bin < self.len() && self.valid.is_valid(bin) {
            Some(self.values[bin])
        } else {
            None
        }
    }
}

/// Area fraction of each category.
///
/// `fractions[i]` is the summed area of samples whose selector falls into
/// bin `i`, divided by the total area of the whole input. Fractions need
/// not sum to 1 if samples fall outside all bins. Samples with a
/// non-finite area are excluded entirely; a non-finite selector keeps its
/// sample out of every bin but still in the total.
///
/// Fails with `EmptyInput` for a zero-length sample set and
/// `ShapeMismatch` if the arrays disagree. A total area of zero marks
/// every bin invalid instead of dividing by zero.
pub fn area_fractions(
    area: &[f64],
    selector: &[f64],
    bins: &BinSpec,
) -> RegridResult<BinnedStatistic> {
    if area.is_empty() {
        return Err(RegridError::empty_input(
            "area fractions need at least one sample",
        ));
    }
    if selector.len() != area.len() {
        return Err(RegridError::shape_mismatch(area.len(), selector.len()));
    }

    let mut total = 0.0;
    let mut binned = vec![0.0; bins.nbins()];
    for (&a, &sel) in area.iter().zip(selector) {
        if !a.is_finite() {
            continue;
        }
        // the total covers the whole input; a non-finite selector only
        // keeps the sample out of every bin
        total += a;
        if let Some(bin) = bins.bin_of(sel) {
            binned[bin] += a;
        }
    }

    if total <= 0.0 {
        return Ok(BinnedStatistic::new(
            vec![f64::NAN; bins.nbins()],
            ValidityMask::new(bins.nbins()),
        ));
    }

    let values: Vec<f64> = binned.into_iter().map(|a| a / total).collect();
    let valid = ValidityMask::all_valid(values.len());
    Ok(BinnedStatistic::new(values, valid))
}

/// Area-weighted average of a field within each category.
///
/// For each bin the average is `sum(field * area) / sum(area)` over the
/// samples whose selector falls into the bin and whose weighted value is
/// finite; invalid samples are excluded from numerator and denominator
/// alike. A bin with zero valid contributing area is explicitly invalid.
pub fn area_weighted_averages(
    field: &[f64],
    area: &[f64],
    selector: &[f64],
    bins: &BinSpec,
) -> RegridResult<BinnedStatistic> {
    if area.is_empty() {
        return Err(RegridError::empty_input(
            "area-weighted averages need at least one sample",
        ));
    }
    if field.len() != area.len() {
        return Err(RegridError::shape_mismatch(area.len(), field.len()));
    }
    if selector.len() != area.len() {
        return Err(RegridError::shape_mismatch(area.len(), selector.len()));
    }

    let mut weighted = vec![0.0; bins.nbins()];
    let mut weights = vec![0.0; bins.nbins()];

    for i in 0..area.len() {
        let w = field[i] * area[i];
        if !w.is_finite() || !area[i].is_finite() {
            continue;
        }
        if let Some(bin) = bins.bin_of(selector[i]) {
            weighted[bin] += w;
            weights[bin] += area[i];
        }
    }

    let mut values = vec![f64::NAN; bins.nbins()];
    let mut valid = ValidityMask::new(bins.nbins());
    for bin in 0..bins.nbins() {
        if weights[bin] > 0.0 {
            values[bin] = weighted[bin] / weights[bin];
            valid.set_valid(bin);
        }
    }

    Ok(BinnedStatistic::new(values, valid))
}
