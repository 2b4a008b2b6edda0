//! Field reprojection onto target-region rasters.
//!
//! Two interpolation strategies share one output grid: box averaging is
//! statistically faithful wherever sample density exceeds the target
//! resolution but leaves holes where the source is coarser; the
//! nearest-neighbor gather guarantees full coverage at the cost of local
//! smoothness. [`combine`] merges them per cell so a resolution mismatch in
//! either direction is handled without separate code paths.
//!
//! Fields are flat sample vectors aligned with the geometry an index or
//! grouping was built from; NaN marks an invalid sample value on input,
//! while output rasters carry an explicit validity bitmap.

use regrid_common::{RasterField, RegridError, RegridResult, ValidityMask};

use crate::grouping::BoxGrouping;
use crate::nn_index::NnIndex;

/// Reduction operator applied to the samples of one occupied cell.
///
/// Receives the cell's field values in sorted sample order and returns
/// None when no valid value remains, never panicking on all-invalid input.
pub type Reducer = fn(&[f64]) -> Option<f64>;

/// Mean of the finite values of a slice; None if there are none.
pub fn mean_ignoring_invalid(values: &[f64]) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for &v in values {
        if v.is_finite() {
            sum += v;
            count += 1;
        }
    }
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Nearest-neighbor reprojection: a pure gather through the index.
///
/// Cells whose gathered sample value is not finite are marked invalid.
/// Fails with `ShapeMismatch` if the field length disagrees with the
/// sample vector the index was built against.
pub fn reproject_nn(field: &[f64], index: &NnIndex) -> RegridResult<RasterField> {
    if field.len() != index.n_samples() {
        return Err(RegridError::shape_mismatch(index.n_samples(), field.len()));
    }

    let (nrows, ncols) = index.shape();
    let mut raster = RasterField::filled(nrows, ncols, 0.0);

    for (k, &sample) in index.indices().iter().enumerate() {
        let value = field[sample];
        if value.is_finite() {
            raster.set_flat(k, value);
        }
    }

    Ok(raster)
}

/// Box-average reprojection with the default mean reduction.
pub fn reproject_box_average(field: &[f64], grouping: &BoxGrouping) -> RegridResult<RasterField> {
    reproject_box_average_with(field, grouping, mean_ignoring_invalid)
}

/// Box-average reprojection with a caller-supplied reduction.
///
/// Every occupied cell is reduced over the field values of its samples;
/// cells that received no samples, and cells whose reduction returns None,
/// are marked invalid. A single warning is emitted per call when any run
/// reduced to nothing, so sparse fields do not flood the log.
pub fn reproject_box_average_with(
    field: &[f64],
    grouping: &BoxGrouping,
    reduce: Reducer,
) -> RegridResult<RasterField> {
    if field.len() != grouping.n_samples() {
        return Err(RegridError::shape_mismatch(
            grouping.n_samples(),
            field.len(),
        ));
    }

    let (nrows, ncols) = grouping.shape();
    let mut raster = RasterField::filled(nrows, ncols, 0.0);

    // gather once into sorted order, then reduce contiguous runs
    let sorted_values: Vec<f64> = grouping
        .sorted_samples()
        .iter()
        .map(|&i| field[i])
        .collect();

    let mut starved_runs = 0usize;
    for run in grouping.runs() {
        let slice = &sorted_values[run.start..run.start + run.count];
        match reduce(slice) {
            Some(value) => raster.set_flat(run.cell, value),
            None => starved_runs += 1,
        }
    }

    if starved_runs > 0 {
        tracing::warn!(
            starved_runs,
            occupied_cells = grouping.occupied_cells(),
            "box average: occupied cells with no valid sample value"
        );
    }

    Ok(raster)
}

/// Options for [`combine`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CombineOptions<'a> {
    /// Cells outside this mask are forced to the fill value before the
    /// per-cell merge.
    pub domain_mask: Option<&'a ValidityMask>,
    /// Value written into cells that end up with no data.
    pub fill_value: f64,
    /// Skip the box average entirely and use only the NN gather.
    pub only_nn: bool,
    /// Additionally mark every cell whose final value equals the fill
    /// value as invalid. Off by default: the fill value may coincide with
    /// legitimate data.
    pub mask_fill: bool,
}

/// Combined reprojection: box average where a cell received samples,
/// nearest-neighbor fallback elsewhere, fill value as the last resort.
///
/// The index and grouping must have been built for the same sample vector
/// and the same target region.
pub fn combine(
    field: &[f64],
    index: &NnIndex,
    grouping: &BoxGrouping,
    options: &CombineOptions,
) -> RegridResult<RasterField> {
    if index.shape() != grouping.shape() {
        return Err(RegridError::invalid_region(format!(
            "nearest-neighbor index covers {:?} but grouping covers {:?}",
            index.shape(),
            grouping.shape()
        )));
    }
    if index.n_samples() != grouping.n_samples() {
        return Err(RegridError::shape_mismatch(
            index.n_samples(),
            grouping.n_samples(),
        ));
    }
    if let Some(mask) = options.domain_mask {
        if mask.len() != index.len() {
            return Err(RegridError::shape_mismatch(index.len(), mask.len()));
        }
    }

    let mut nn = reproject_nn(field, index)?;
    let mut domain_masked = 0usize;
    if let Some(mask) = options.domain_mask {
        for k in 0..nn.len() {
            if !mask.is_valid(k) {
                nn.clear_flat(k, options.fill_value);
                domain_masked += 1;
            }
        }
    }

    let boxed = if options.only_nn {
        None
    } else {
        Some(reproject_box_average(field, grouping)?)
    };

    let (nrows, ncols) = index.shape();
    let mut out = RasterField::filled(nrows, ncols, options.fill_value);
    let mut box_cells = 0usize;
    let mut nn_cells = 0usize;

    for k in 0..out.len() {
        if let Some(value) = boxed.as_ref().and_then(|b| b.get_flat(k)) {
            out.set_flat(k, value);
            box_cells += 1;
        } else if let Some(value) = nn.get_flat(k) {
            out.set_flat(k, value);
            nn_cells += 1;
        }
        // otherwise the cell keeps the fill value and stays invalid
    }

    if options.mask_fill {
        for k in 0..out.len() {
            if out.get_flat(k) == Some(options.fill_value) {
                out.clear_flat(k, options.fill_value);
            }
        }
    }

    tracing::debug!(
        box_cells,
        nn_cells,
        domain_masked,
        filled = out.len() - box_cells - nn_cells,
        "combined reprojection coverage"
    );

    Ok(out)
}
