//! Round-trip tests through geographic space.
//!
//! Any raster position on the visible disk must survive
//! raster -> geo -> raster within a small fraction of a cell.

use projection::{ResolutionMode, ScanGeometry};
use regrid_common::{RasterPoints, TargetRegion};

#[test]
fn test_cutout_roundtrip_is_lossless() {
    let scan = ScanGeometry::msg_seviri();
    let region = TargetRegion::north_atlantic_cutout();
    let (row_min, row_max) = region.rows();
    let (col_min, col_max) = region.cols();

    // sample the cutout on a coarse lattice; its far corners reach past
    // the disk edge and legitimately fail to project
    let mut rows = Vec::new();
    let mut cols = Vec::new();
    for r in (row_min..row_max).step_by(200) {
        for c in (col_min..col_max).step_by(400) {
            rows.push(r as f64);
            cols.push(c as f64);
        }
    }

    let cells = RasterPoints::new(rows.clone(), cols.clone()).unwrap();
    let geo = scan.raster_to_geo(&cells, ResolutionMode::Low).unwrap();
    let back = scan.geo_to_raster(&geo, ResolutionMode::Low).unwrap();

    let mut on_disk = 0usize;
    for i in 0..cells.len() {
        if !geo.lon()[i].is_finite() {
            // off-disk lattice point: stays NaN through the chain
            assert!(back.row()[i].is_nan());
            continue;
        }
        on_disk += 1;
        assert!(
            (back.row()[i] - rows[i]).abs() < 1e-6,
            "row ({}, {}): {} came back as {}",
            rows[i],
            cols[i],
            rows[i],
            back.row()[i]
        );
        assert!(
            (back.col()[i] - cols[i]).abs() < 1e-6,
            "col ({}, {}): {} came back as {}",
            rows[i],
            cols[i],
            cols[i],
            back.col()[i]
        );
    }

    // most of the cutout sits on the disk
    assert!(on_disk * 2 > cells.len(), "only {} cells on disk", on_disk);
}

#[test]
fn test_fractional_positions_roundtrip() {
    let scan = ScanGeometry::msg_seviri();

    let cells = RasterPoints::new(
        vec![617.25, 900.5, 1100.75],
        vec![1004.125, 2000.5, 2775.25],
    )
    .unwrap();
    let geo = scan.raster_to_geo(&cells, ResolutionMode::Low).unwrap();
    let back = scan.geo_to_raster(&geo, ResolutionMode::Low).unwrap();

    for i in 0..cells.len() {
        assert!((back.row()[i] - cells.row()[i]).abs() < 1e-6);
        assert!((back.col()[i] - cells.col()[i]).abs() < 1e-6);
    }
}

#[test]
fn test_shape_preserved_through_the_chain() {
    let scan = ScanGeometry::msg_seviri();
    let region = TargetRegion::new((610, 613), (1815, 1819), 3712).unwrap();

    let geo = scan
        .region_geolocation(&region, ResolutionMode::Low)
        .unwrap();
    assert_eq!(geo.len(), region.len());

    let raster = scan.geo_to_raster(&geo, ResolutionMode::Low).unwrap();
    assert_eq!(raster.len(), region.len());
}

#[test]
fn test_off_disk_cells_become_nan_not_errors() {
    let scan = ScanGeometry::msg_seviri();

    // the disk corner (0, 0) points past the limb
    let cells = RasterPoints::new(vec![0.0, 1856.0], vec![0.0, 1856.0]).unwrap();
    let geo = scan.raster_to_geo(&cells, ResolutionMode::Low).unwrap();

    assert!(geo.lon()[0].is_nan());
    assert!(geo.lat()[0].is_nan());
    assert!(geo.lon()[1].is_finite());
}
