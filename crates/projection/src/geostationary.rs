//! Geostationary satellite projection.
//!
//! The satellite views Earth from a fixed position above the equator and
//! scans it along a north-south sweep axis (the Meteosat/Himawari
//! convention). Planar coordinates are scan angles scaled by the satellite
//! height, expressed in kilometers, so Euclidean distance in the plane
//! approximates the sensor's true sampling geometry near the sub-satellite
//! point and degrades gracefully toward the limb.
//!
//! Reference: CGMS LRIT/HRIT Global Specification, Section 4.4 (normalized
//! geostationary projection).

use regrid_common::{GeoPoints, PlanePoints, RegridResult};
use serde::{Deserialize, Serialize};

/// Geostationary projection parameters.
///
/// All lengths in kilometers, the sub-satellite longitude in degrees.
/// Immutable by design: construct one per sensor and pass it around
/// explicitly rather than reading ambient configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SatGeometry {
    /// Semi-major (equatorial) Earth radius (km)
    pub eq_radius_km: f64,
    /// Semi-minor (polar) Earth radius (km)
    pub pol_radius_km: f64,
    /// Distance from Earth center to the satellite (km)
    pub satellite_distance_km: f64,
    /// Longitude of the sub-satellite point (degrees east)
    pub sub_lon_deg: f64,
}

impl SatGeometry {
    /// Geometry of the Meteosat Second Generation spacecraft at 0°.
    pub fn msg() -> Self {
        Self {
            eq_radius_km: 6378.169,
            pol_radius_km: 6356.5838,
            satellite_distance_km: 42164.0,
            sub_lon_deg: 0.0,
        }
    }

    /// Satellite height above the sub-satellite surface point (km).
    ///
    /// Planar coordinates are scan angles multiplied by this height.
    #[inline]
    pub fn height_km(&self) -> f64 {
        self.satellite_distance_km - self.eq_radius_km
    }

    /// Convert one geographic coordinate to projection-plane kilometers.
    ///
    /// Returns None if the point is not visible from the satellite (beyond
    /// the limb). x grows east of the sub-satellite point, y grows north.
    pub fn geo_to_plane_point(&self, lon_deg: f64, lat_deg: f64) -> Option<(f64, f64)> {
        if !lon_deg.is_finite() || !lat_deg.is_finite() {
            return None;
        }

        let lat = lat_deg.to_radians();
        let dlon = (lon_deg - self.sub_lon_deg).to_radians();

        let req = self.eq_radius_km;
        let rpol = self.pol_radius_km;
        let dist = self.satellite_distance_km;

        // Geocentric latitude (accounting for Earth's oblateness)
        let phi_c = ((rpol / req).powi(2) * lat.tan()).atan();

        // Eccentricity squared and geocentric surface radius
        let e2 = 1.0 - (rpol / req).powi(2);
        let rc = rpol / (1.0 - e2 * phi_c.cos().powi(2)).sqrt();

        // Earth-fixed position of the surface point, x-axis through the
        // sub-satellite point
        let vx = rc * phi_c.cos() * dlon.cos();
        let vy = rc * phi_c.cos() * dlon.sin();
        let vz = rc * phi_c.sin();

        // Visibility: the line of sight must not pass through the ellipsoid
        let tmp = dist - vx;
        if tmp * vx - vy * vy - vz * vz * (req / rpol).powi(2) < 0.0 {
            return None;
        }

        // Scan angles, north-south sweep axis
        let scan_x = (vy / tmp).atan();
        let scan_y = (vz / vy.hypot(tmp)).atan();

        Some((self.height_km() * scan_x, self.height_km() * scan_y))
    }

    /// Convert one projection-plane coordinate back to geographic degrees.
    ///
    /// Exact algebraic inverse of [`Self::geo_to_plane_point`] on the
    /// visible disk; returns None for plane coordinates that miss Earth.
    pub fn plane_to_geo_point(&self, x_km: f64, y_km: f64) -> Option<(f64, f64)> {
        if !x_km.is_finite() || !y_km.is_finite() {
            return None;
        }

        let scan_x = x_km / self.height_km();
        let scan_y = y_km / self.height_km();

        let req = self.eq_radius_km;
        let rpol = self.pol_radius_km;
        let dist = self.satellite_distance_km;

        let cos_x = scan_x.cos();
        let sin_x = scan_x.sin();
        let cos_y = scan_y.cos();
        let sin_y = scan_y.sin();

        // Quadratic for the line-of-sight distance to the ellipsoid
        let a = cos_y.powi(2) + (req / rpol).powi(2) * sin_y.powi(2);
        let b = -2.0 * dist * cos_x * cos_y;
        let c = dist * dist - req * req;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None; // line of sight misses Earth
        }

        let rs = (-b - discriminant.sqrt()) / (2.0 * a);

        // Surface intersection, Earth-fixed frame
        let px = dist - rs * cos_y * cos_x;
        let py = rs * cos_y * sin_x;
        let pz = rs * sin_y;

        let lat = ((req / rpol).powi(2) * pz / px.hypot(py)).atan();
        let lon = self.sub_lon_deg.to_radians() + py.atan2(px);

        Some((lon.to_degrees(), lat.to_degrees()))
    }

    /// Forward-project a coordinate set.
    ///
    /// Shape is preserved exactly; samples beyond the limb come back with
    /// NaN coordinates rather than failing the whole call.
    pub fn geo_to_plane(&self, points: &GeoPoints) -> RegridResult<PlanePoints> {
        let mut x = Vec::with_capacity(points.len());
        let mut y = Vec::with_capacity(points.len());

        for (&lon, &lat) in points.lon().iter().zip(points.lat()) {
            match self.geo_to_plane_point(lon, lat) {
                Some((px, py)) => {
                    x.push(px);
                    y.push(py);
                }
                None => {
                    x.push(f64::NAN);
                    y.push(f64::NAN);
                }
            }
        }

        PlanePoints::new(x, y)
    }

    /// Inverse-project a plane coordinate set. Off-disk points come back
    /// as NaN.
    pub fn plane_to_geo(&self, points: &PlanePoints) -> RegridResult<GeoPoints> {
        let mut lon = Vec::with_capacity(points.len());
        let mut lat = Vec::with_capacity(points.len());

        for (&px, &py) in points.x().iter().zip(points.y()) {
            match self.plane_to_geo_point(px, py) {
                Some((plon, plat)) => {
                    lon.push(plon);
                    lat.push(plat);
                }
                None => {
                    lon.push(f64::NAN);
                    lat.push(f64::NAN);
                }
            }
        }

        GeoPoints::new(lon, lat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nadir_maps_to_origin() {
        let sat = SatGeometry::msg();
        let (x, y) = sat.geo_to_plane_point(0.0, 0.0).unwrap();
        assert!(x.abs() < 1e-9, "nadir x should be 0, got {}", x);
        assert!(y.abs() < 1e-9, "nadir y should be 0, got {}", y);

        let (lon, lat) = sat.plane_to_geo_point(0.0, 0.0).unwrap();
        assert!(lon.abs() < 1e-9);
        assert!(lat.abs() < 1e-9);
    }

    #[test]
    fn test_roundtrip_mid_disk() {
        let sat = SatGeometry::msg();

        for &(lon, lat) in &[(10.0, 45.0), (-30.0, 52.0), (25.0, -20.0), (0.5, 0.5)] {
            let (x, y) = sat.geo_to_plane_point(lon, lat).unwrap();
            let (lon2, lat2) = sat.plane_to_geo_point(x, y).unwrap();
            assert!(
                (lon - lon2).abs() < 1e-9,
                "lon roundtrip {} vs {}",
                lon,
                lon2
            );
            assert!(
                (lat - lat2).abs() < 1e-9,
                "lat roundtrip {} vs {}",
                lat,
                lat2
            );
        }
    }

    #[test]
    fn test_axes_orientation() {
        let sat = SatGeometry::msg();

        // east of the sub-satellite point: positive x
        let (x, _) = sat.geo_to_plane_point(10.0, 0.0).unwrap();
        assert!(x > 0.0);

        // north: positive y
        let (_, y) = sat.geo_to_plane_point(0.0, 10.0).unwrap();
        assert!(y > 0.0);
    }

    #[test]
    fn test_far_side_not_visible() {
        let sat = SatGeometry::msg();
        assert!(sat.geo_to_plane_point(180.0, 0.0).is_none());
        assert!(sat.geo_to_plane_point(-100.0, 0.0).is_none());
    }

    #[test]
    fn test_off_disk_plane_point() {
        let sat = SatGeometry::msg();
        // far beyond the disk edge (~5500 km at the equator)
        assert!(sat.plane_to_geo_point(9000.0, 0.0).is_none());
    }

    #[test]
    fn test_batch_preserves_shape_and_marks_invisible() {
        let sat = SatGeometry::msg();
        let points =
            GeoPoints::new(vec![0.0, 180.0, 10.0], vec![50.0, 0.0, -10.0]).unwrap();

        let plane = sat.geo_to_plane(&points).unwrap();
        assert_eq!(plane.len(), 3);
        assert!(plane.x()[0].is_finite());
        assert!(plane.x()[1].is_nan());
        assert!(plane.y()[1].is_nan());
        assert!(plane.x()[2].is_finite());
    }

    #[test]
    fn test_sub_lon_shift() {
        // with the satellite moved to 9.5°E, that longitude becomes nadir
        let sat = SatGeometry {
            sub_lon_deg: 9.5,
            ..SatGeometry::msg()
        };
        let (x, y) = sat.geo_to_plane_point(9.5, 0.0).unwrap();
        assert!(x.abs() < 1e-9);
        assert!(y.abs() < 1e-9);
    }
}
