//! Rectangular cutouts of the sensor scan disk.

use serde::{Deserialize, Serialize};

use crate::error::{RegridError, RegridResult};

/// A half-open rectangular cutout of the full sensor disk.
///
/// Rows and columns are edge-based: the region covers raster cells with
/// `row_min <= row < row_max` and `col_min <= col < col_max`. Bounds are
/// validated against the disk size at construction, so a `TargetRegion`
/// in hand is always well-formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetRegion {
    row_min: usize,
    row_max: usize,
    col_min: usize,
    col_max: usize,
}

impl TargetRegion {
    /// Create a new target region.
    ///
    /// # Arguments
    /// * `rows` - `(row_min, row_max)`, half-open
    /// * `cols` - `(col_min, col_max)`, half-open
    /// * `ndisk` - full-disk size of the raster the region cuts out of
    ///
    /// Fails with `InvalidRegion` for non-increasing bounds or bounds
    /// beyond the disk.
    pub fn new(rows: (usize, usize), cols: (usize, usize), ndisk: usize) -> RegridResult<Self> {
        let (row_min, row_max) = rows;
        let (col_min, col_max) = cols;

        if row_min >= row_max || col_min >= col_max {
            return Err(RegridError::invalid_region(format!(
                "non-increasing bounds: rows {row_min}..{row_max}, cols {col_min}..{col_max}"
            )));
        }
        if row_max > ndisk || col_max > ndisk {
            return Err(RegridError::invalid_region(format!(
                "bounds rows {row_min}..{row_max}, cols {col_min}..{col_max} exceed disk size {ndisk}"
            )));
        }

        Ok(Self {
            row_min,
            row_max,
            col_min,
            col_max,
        })
    }

    /// The edge-based cutout used for North Atlantic analyses on the
    /// standard 3712-cell low-resolution disk.
    pub fn north_atlantic_cutout() -> Self {
        Self {
            row_min: 114,
            row_max: 1118,
            col_min: 271,
            col_max: 3047,
        }
    }

    /// Row bounds `(row_min, row_max)`, half-open.
    pub fn rows(&self) -> (usize, usize) {
        (self.row_min, self.row_max)
    }

    /// Column bounds `(col_min, col_max)`, half-open.
    pub fn cols(&self) -> (usize, usize) {
        (self.col_min, self.col_max)
    }

    /// Number of rows in the region.
    pub fn nrows(&self) -> usize {
        self.row_max - self.row_min
    }

    /// Number of columns in the region.
    pub fn ncols(&self) -> usize {
        self.col_max - self.col_min
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.nrows() * self.ncols()
    }

    /// Check if the region covers zero cells. Always false for a
    /// validated region; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check whether a full-disk cell lies inside the region.
    #[inline]
    pub fn contains(&self, row: i64, col: i64) -> bool {
        row >= self.row_min as i64
            && row < self.row_max as i64
            && col >= self.col_min as i64
            && col < self.col_max as i64
    }

    /// Region-local flattened index (row-major) of a full-disk cell.
    ///
    /// The cell must lie inside the region.
    #[inline]
    pub fn flat_index(&self, row: usize, col: usize) -> usize {
        debug_assert!(self.contains(row as i64, col as i64));
        (row - self.row_min) * self.ncols() + (col - self.col_min)
    }
}
