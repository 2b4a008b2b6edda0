//! Category bin specifications.

use regrid_common::{RegridError, RegridResult};

/// An ascending set of bin edges defining half-open categories.
///
/// Category `i` covers `[edges[i], edges[i+1])`: the lower edge is
/// included, the upper edge excluded, and a value equal to the last edge
/// falls into no bin at all. Validated at construction so a `BinSpec` in
/// hand always defines at least one category.
#[derive(Debug, Clone, PartialEq)]
pub struct BinSpec {
    edges: Vec<f64>,
}

impl BinSpec {
    /// Create a bin specification from edges.
    ///
    /// Fails with `InvalidBins` unless the edges are finite, strictly
    /// increasing and at least two.
    pub fn new(edges: Vec<f64>) -> RegridResult<Self> {
        if edges.len() < 2 {
            return Err(RegridError::invalid_bins(format!(
                "need at least 2 edges, got {}",
                edges.len()
            )));
        }
        if edges.iter().any(|e| !e.is_finite()) {
            return Err(RegridError::invalid_bins("edges must be finite"));
        }
        if edges.windows(2).any(|w| w[0] >= w[1]) {
            return Err(RegridError::invalid_bins(
                "edges must be strictly increasing",
            ));
        }
        Ok(Self { edges })
    }

    /// Unit-width bins covering `start..end` (integer categories).
    pub fn unit_bins(start: i64, end: i64) -> RegridResult<Self> {
        Self::new((start..=end).map(|e| e as f64).collect())
    }

    /// The bin edges.
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Number of categories.
    pub fn nbins(&self) -> usize {
        self.edges.len() - 1
    }

    /// The category a value falls into, if any.
    ///
    /// Half-open: `edges[i] <= value < edges[i+1]`. Non-finite values and
    /// values outside `[first, last)` belong to no bin.
    pub fn bin_of(&self, value: f64) -> Option<usize> {
        if !value.is_finite() {
            return None;
        }
        if value < self.edges[0] || value >= self.edges[self.edges.len() - 1] {
            return None;
        }
        // first edge strictly greater than the value, minus one
        let upper = self.edges.partition_point(|&e| e <= value);
        Some(upper - 1)
    }
}
