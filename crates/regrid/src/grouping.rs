//! Run-length grouping of samples by target raster cell.
//!
//! Buckets every input sample into the integer cell its continuous raster
//! position rounds to, as a sort permutation plus a run table. Built once
//! per input geometry and target region, then reused for any number of
//! grouped reductions against fields sharing that geometry: the sort
//! dominates construction, each later reduction is a linear pass.

use regrid_common::{RasterPoints, RegridResult, TargetRegion, ValidityMask};

/// One contiguous run of sorted samples falling into the same cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRun {
    /// Region-local flattened cell index
    pub cell: usize,
    /// First position of the run in the sorted sample order
    pub start: usize,
    /// Number of samples in the run
    pub count: usize,
}

/// Grouping parameters for box-average reprojection.
///
/// Depends only on the input geometry and the target region, never on
/// field values. Read-only once built; safe to share across concurrent
/// reprojection calls.
#[derive(Debug, Clone)]
pub struct BoxGrouping {
    /// Which samples round into the region at all
    regmask: ValidityMask,
    /// Original indices of in-region samples, sorted by target cell
    /// (stable: input order within a cell is preserved)
    sorted_samples: Vec<usize>,
    /// Run table over `sorted_samples`, ascending by cell
    runs: Vec<CellRun>,
    nrows: usize,
    ncols: usize,
    n_samples: usize,
}

impl BoxGrouping {
    /// Build the grouping for continuous raster positions and a region.
    ///
    /// Positions are rounded to the nearest cell (ties away from zero);
    /// samples whose rounded cell falls outside the region, or whose
    /// position is not finite (for instance unprojectable samples), are
    /// masked out. An empty sample set is not an error here: it yields a
    /// grouping where every cell is starved.
    pub fn build(points: &RasterPoints, region: &TargetRegion) -> RegridResult<Self> {
        let n_samples = points.len();
        let mut regmask = ValidityMask::new(n_samples);

        // (cell, sample) pairs for in-region samples, input order
        let mut keyed = Vec::new();
        for (i, (&row, &col)) in points.row().iter().zip(points.col()).enumerate() {
            if !row.is_finite() || !col.is_finite() {
                continue;
            }
            let r = row.round() as i64;
            let c = col.round() as i64;
            if region.contains(r, c) {
                regmask.set_valid(i);
                keyed.push((region.flat_index(r as usize, c as usize), i));
            }
        }

        // stable by construction: ties on the cell keep input order
        keyed.sort_by_key(|&(cell, _)| cell);

        let mut sorted_samples = Vec::with_capacity(keyed.len());
        let mut runs: Vec<CellRun> = Vec::new();
        for (pos, &(cell, sample)) in keyed.iter().enumerate() {
            sorted_samples.push(sample);
            match runs.last_mut() {
                Some(run) if run.cell == cell => run.count += 1,
                _ => runs.push(CellRun {
                    cell,
                    start: pos,
                    count: 1,
                }),
            }
        }

        debug_assert_eq!(
            runs.iter().map(|r| r.count).sum::<usize>(),
            regmask.count_valid()
        );

        Ok(Self {
            regmask,
            sorted_samples,
            runs,
            nrows: region.nrows(),
            ncols: region.ncols(),
            n_samples,
        })
    }

    /// Which samples round into the region.
    pub fn regmask(&self) -> &ValidityMask {
        &self.regmask
    }

    /// In-region sample indices ordered by target cell.
    pub fn sorted_samples(&self) -> &[usize] {
        &self.sorted_samples
    }

    /// The run table: one entry per occupied cell, ascending by cell.
    pub fn runs(&self) -> &[CellRun] {
        &self.runs
    }

    /// Number of distinct occupied cells.
    pub fn occupied_cells(&self) -> usize {
        self.runs.len()
    }

    /// Raster shape `(nrows, ncols)` the grouping covers.
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    /// Length of the sample vector the grouping was built against.
    pub fn n_samples(&self) -> usize {
        self.n_samples
    }
}
