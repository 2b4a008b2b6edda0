//! Nearest-neighbor index between unstructured samples and a target region.
//!
//! The index is built once per input geometry and reused across every field
//! sharing that geometry: it depends only on the sample coordinates and the
//! target region, never on field values. Distances are Euclidean in
//! projection-plane kilometers, not geographic degrees.

use rayon::prelude::*;
use rstar::{PointDistance, RTree, RTreeObject, AABB};

use projection::{ResolutionMode, ScanGeometry};
use regrid_common::{GeoPoints, RegridError, RegridResult, TargetRegion};

/// One projected sample in the R-tree.
#[derive(Debug, Clone)]
struct PlaneSample {
    x: f64,
    y: f64,
    index: usize,
}

impl RTreeObject for PlaneSample {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.x, self.y])
    }
}

impl PointDistance for PlaneSample {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.x - point[0];
        let dy = self.y - point[1];
        dx * dx + dy * dy
    }
}

/// Per-cell nearest-neighbor assignment for a target region.
///
/// `indices[k]` is the position, in the original sample vector, of the
/// nearest sample to target cell `k` (region-local, row-major). Read-only
/// once built; safe to share across concurrent reprojection calls.
#[derive(Debug, Clone)]
pub struct NnIndex {
    indices: Vec<usize>,
    nrows: usize,
    ncols: usize,
    n_samples: usize,
}

impl NnIndex {
    /// Build the nearest-neighbor index for a target region.
    ///
    /// Every target cell is assigned its minimum-distance sample in
    /// projection-plane coordinates. Exactly equidistant samples are
    /// resolved to the lowest sample index, so the assignment is
    /// deterministic. Samples that do not project onto the visible disk
    /// are excluded from candidacy but keep their position in the sample
    /// vector.
    ///
    /// Fails with `EmptyInput` if the sample set is empty or no sample
    /// projects onto the disk.
    pub fn build(
        scan: &ScanGeometry,
        mode: ResolutionMode,
        region: &TargetRegion,
        samples: &GeoPoints,
    ) -> RegridResult<Self> {
        if samples.is_empty() {
            return Err(RegridError::empty_input(
                "nearest-neighbor index needs at least one sample",
            ));
        }

        let plane = scan.satellite.geo_to_plane(samples)?;
        let mut entries = Vec::with_capacity(samples.len());
        for (index, (&x, &y)) in plane.x().iter().zip(plane.y()).enumerate() {
            if x.is_finite() && y.is_finite() {
                entries.push(PlaneSample { x, y, index });
            }
        }

        if entries.is_empty() {
            return Err(RegridError::empty_input(
                "no sample projects onto the visible disk",
            ));
        }

        tracing::debug!(
            cells = region.len(),
            samples = samples.len(),
            projected = entries.len(),
            "building nearest-neighbor index"
        );

        let tree = RTree::bulk_load(entries);
        let cells = scan.region_plane(region, mode)?;

        let indices: Vec<usize> = cells
            .x()
            .par_iter()
            .zip(cells.y().par_iter())
            .map(|(&x, &y)| nearest_with_tie_break(&tree, x, y))
            .collect();

        Ok(Self {
            indices,
            nrows: region.nrows(),
            ncols: region.ncols(),
            n_samples: samples.len(),
        })
    }

    /// The per-cell sample indices, region-local row-major.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Raster shape `(nrows, ncols)` the index covers.
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    /// Number of target cells.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Check if the index covers zero cells.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Length of the sample vector the index was built against.
    pub fn n_samples(&self) -> usize {
        self.n_samples
    }
}

/// Exact nearest neighbor with the lowest-sample-index tie break.
///
/// The iterator yields candidates in non-decreasing distance order; every
/// candidate at exactly the minimum squared distance is considered.
fn nearest_with_tie_break(tree: &RTree<PlaneSample>, x: f64, y: f64) -> usize {
    let mut iter = tree.nearest_neighbor_iter_with_distance_2(&[x, y]);
    // the tree is never empty here: build() rejects empty sample sets
    let (first, best_d2) = iter.next().expect("non-empty tree");
    let mut best = first.index;

    for (candidate, d2) in iter {
        if d2 > best_d2 {
            break;
        }
        best = best.min(candidate.index);
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use projection::ScanGeometry;
    use regrid_common::RasterPoints;

    fn scan() -> ScanGeometry {
        ScanGeometry::msg_seviri()
    }

    /// Samples placed exactly on the raster cells of a small region.
    fn samples_on_cells(rows: &[f64], cols: &[f64]) -> GeoPoints {
        let cells = RasterPoints::new(rows.to_vec(), cols.to_vec()).unwrap();
        scan().raster_to_geo(&cells, ResolutionMode::Low).unwrap()
    }

    #[test]
    fn test_empty_input_rejected() {
        let region = TargetRegion::new((600, 603), (1800, 1803), 3712).unwrap();
        let samples = GeoPoints::new(vec![], vec![]).unwrap();

        let err = NnIndex::build(&scan(), ResolutionMode::Low, &region, &samples);
        assert!(matches!(err, Err(RegridError::EmptyInput(_))));
    }

    #[test]
    fn test_all_samples_off_disk_rejected() {
        let region = TargetRegion::new((600, 603), (1800, 1803), 3712).unwrap();
        let samples = GeoPoints::new(vec![180.0, -170.0], vec![0.0, 10.0]).unwrap();

        let err = NnIndex::build(&scan(), ResolutionMode::Low, &region, &samples);
        assert!(matches!(err, Err(RegridError::EmptyInput(_))));
    }

    #[test]
    fn test_coincident_sample_wins_its_cell() {
        let region = TargetRegion::new((600, 603), (1800, 1803), 3712).unwrap();
        // one sample per cell of the region, in row-major order
        let mut rows = Vec::new();
        let mut cols = Vec::new();
        for r in 600..603 {
            for c in 1800..1803 {
                rows.push(r as f64);
                cols.push(c as f64);
            }
        }
        let samples = samples_on_cells(&rows, &cols);

        let index = NnIndex::build(&scan(), ResolutionMode::Low, &region, &samples).unwrap();
        let expected: Vec<usize> = (0..9).collect();
        assert_eq!(index.indices(), expected.as_slice());
    }

    #[test]
    fn test_determinism() {
        let region = TargetRegion::new((610, 615), (1815, 1822), 3712).unwrap();
        let samples = samples_on_cells(&[609.7, 612.2, 614.9], &[1816.1, 1819.4, 1821.0]);

        let a = NnIndex::build(&scan(), ResolutionMode::Low, &region, &samples).unwrap();
        let b = NnIndex::build(&scan(), ResolutionMode::Low, &region, &samples).unwrap();
        assert_eq!(a.indices(), b.indices());
    }

    #[test]
    fn test_corner_samples_cover_center_cell() {
        // 4 samples at the corners of a 3x3 region: each corner cell keeps
        // its own sample and the center cell resolves to one of the four
        let region = TargetRegion::new((600, 603), (1800, 1803), 3712).unwrap();
        let samples = samples_on_cells(
            &[600.0, 600.0, 602.0, 602.0],
            &[1800.0, 1802.0, 1800.0, 1802.0],
        );

        let index = NnIndex::build(&scan(), ResolutionMode::Low, &region, &samples).unwrap();

        assert_eq!(index.indices()[0], 0);
        assert_eq!(index.indices()[2], 1);
        assert_eq!(index.indices()[6], 2);
        assert_eq!(index.indices()[8], 3);

        // center of the region is cell (601, 1801) -> flat 4
        assert!(index.indices()[4] < 4);
    }

    #[test]
    fn test_exact_tie_resolves_to_lowest_sample_index() {
        // hand-built tree with four samples exactly equidistant from the
        // query point; insertion order deliberately scrambled
        let tree = RTree::bulk_load(vec![
            PlaneSample { x: 2.0, y: 2.0, index: 3 },
            PlaneSample { x: 0.0, y: 2.0, index: 1 },
            PlaneSample { x: 2.0, y: 0.0, index: 2 },
            PlaneSample { x: 0.0, y: 0.0, index: 5 },
        ]);

        // all four at squared distance exactly 2.0
        assert_eq!(nearest_with_tie_break(&tree, 1.0, 1.0), 1);

        // a strictly closer sample beats a lower-index farther one
        let tree = RTree::bulk_load(vec![
            PlaneSample { x: 0.0, y: 0.0, index: 0 },
            PlaneSample { x: 1.25, y: 1.0, index: 7 },
        ]);
        assert_eq!(nearest_with_tie_break(&tree, 1.0, 1.0), 7);
    }

    #[test]
    fn test_matches_naive_search() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let region = TargetRegion::new((700, 708), (1900, 1910), 3712).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        let n = 60;
        let rows: Vec<f64> = (0..n).map(|_| rng.gen_range(695.0..712.0)).collect();
        let cols: Vec<f64> = (0..n).map(|_| rng.gen_range(1895.0..1915.0)).collect();
        let samples = samples_on_cells(&rows, &cols);

        let index = NnIndex::build(&scan(), ResolutionMode::Low, &region, &samples).unwrap();

        // naive reference: scan every sample for every cell
        let s = scan();
        let plane = s.satellite.geo_to_plane(&samples).unwrap();
        let cells = s.region_plane(&region, ResolutionMode::Low).unwrap();

        for k in 0..cells.len() {
            let (cx, cy) = (cells.x()[k], cells.y()[k]);
            let mut best = usize::MAX;
            let mut best_d2 = f64::INFINITY;
            for i in 0..plane.len() {
                let (sx, sy) = (plane.x()[i], plane.y()[i]);
                if !sx.is_finite() {
                    continue;
                }
                let d2 = (sx - cx).powi(2) + (sy - cy).powi(2);
                if d2 < best_d2 {
                    best_d2 = d2;
                    best = i;
                }
            }
            assert_eq!(
                index.indices()[k],
                best,
                "cell {} disagrees with the naive search",
                k
            );
        }
    }
}
