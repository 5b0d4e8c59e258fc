#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Great-circle distance and proximity queries over camera records.
//!
//! Cameras whose published coordinates are blank or unparsable read back as
//! exactly `0.0` from the numeric views, so `0.0` doubles as the
//! missing-coordinate sentinel here: [`find_nearby`] and [`bounds`] skip
//! such records entirely instead of treating them as a point off the African
//! coast. [`find_in_bounds`] deliberately does NOT apply that exclusion —
//! it is a plain inclusive box filter, and callers that want only valid
//! coordinates filter separately.

use camera_map_camera_models::Camera;
use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometers for the Haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometers between two lat/lon points
/// (Haversine, spherical Earth).
#[must_use]
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// A camera paired with its distance from a query point.
///
/// Produced by [`find_nearby`]; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraWithDistance {
    /// The matched camera record.
    pub camera: Camera,
    /// Distance from the query point in kilometers.
    pub distance_km: f64,
}

impl std::fmt::Display for CameraWithDistance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (distance: {:.2}km)", self.camera, self.distance_km)
    }
}

/// Min/max latitude and longitude over a record set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeographicBounds {
    /// Southernmost latitude.
    pub min_latitude: f64,
    /// Northernmost latitude.
    pub max_latitude: f64,
    /// Westernmost longitude.
    pub min_longitude: f64,
    /// Easternmost longitude.
    pub max_longitude: f64,
}

impl GeographicBounds {
    /// Latitude of the box center.
    #[must_use]
    pub const fn center_latitude(&self) -> f64 {
        (self.min_latitude + self.max_latitude) / 2.0
    }

    /// Longitude of the box center.
    #[must_use]
    pub const fn center_longitude(&self) -> f64 {
        (self.min_longitude + self.max_longitude) / 2.0
    }
}

impl std::fmt::Display for GeographicBounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "lat: {:.6} ~ {:.6}, lon: {:.6} ~ {:.6}",
            self.min_latitude, self.max_latitude, self.min_longitude, self.max_longitude
        )
    }
}

/// Returns `true` when both published coordinates parse to nonzero values.
fn has_coordinates(camera: &Camera) -> bool {
    camera.latitude_value() != 0.0 && camera.longitude_value() != 0.0
}

/// Finds all cameras within `radius_km` of a target point, sorted by
/// ascending distance. Records without usable coordinates are skipped;
/// equal distances keep the original record order.
#[must_use]
pub fn find_nearby(
    cameras: &[Camera],
    target_lat: f64,
    target_lon: f64,
    radius_km: f64,
) -> Vec<CameraWithDistance> {
    let mut nearby: Vec<CameraWithDistance> = cameras
        .iter()
        .filter(|camera| has_coordinates(camera))
        .filter_map(|camera| {
            let distance = distance_km(
                target_lat,
                target_lon,
                camera.latitude_value(),
                camera.longitude_value(),
            );
            (distance <= radius_km).then(|| CameraWithDistance {
                camera: camera.clone(),
                distance_km: distance,
            })
        })
        .collect();

    // sort_by is stable, so ties preserve record order
    nearby.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    nearby
}

/// Inclusive bounding-box filter over the numeric coordinate views.
///
/// No missing-coordinate exclusion happens here: a record whose coordinates
/// read back as `0.0` passes whenever the box covers the origin.
#[must_use]
pub fn find_in_bounds(
    cameras: &[Camera],
    min_lat: f64,
    max_lat: f64,
    min_lon: f64,
    max_lon: f64,
) -> Vec<Camera> {
    cameras
        .iter()
        .filter(|camera| {
            let lat = camera.latitude_value();
            let lon = camera.longitude_value();
            lat >= min_lat && lat <= max_lat && lon >= min_lon && lon <= max_lon
        })
        .cloned()
        .collect()
}

/// Computes the geographic extent of all cameras with usable coordinates.
///
/// Returns the all-zero default bounds when no record has usable
/// coordinates.
#[must_use]
pub fn bounds(cameras: &[Camera]) -> GeographicBounds {
    let mut valid = cameras.iter().filter(|camera| has_coordinates(camera));

    let Some(first) = valid.next() else {
        return GeographicBounds::default();
    };

    let mut extent = GeographicBounds {
        min_latitude: first.latitude_value(),
        max_latitude: first.latitude_value(),
        min_longitude: first.longitude_value(),
        max_longitude: first.longitude_value(),
    };

    for camera in valid {
        let lat = camera.latitude_value();
        let lon = camera.longitude_value();
        extent.min_latitude = extent.min_latitude.min(lat);
        extent.max_latitude = extent.max_latitude.max(lat);
        extent.min_longitude = extent.min_longitude.min(lon);
        extent.max_longitude = extent.max_longitude.max(lon);
    }

    extent
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera_at(city: &str, lat: &str, lon: &str) -> Camera {
        Camera {
            city_name: city.to_string(),
            latitude: lat.to_string(),
            longitude: lon.to_string(),
            ..Camera::default()
        }
    }

    #[test]
    fn distance_between_identical_points_is_zero() {
        let d = distance_km(25.0478, 121.5173, 25.0478, 121.5173);
        assert!(d.abs() < 1e-9);
    }

    #[test]
    fn distance_berlin_to_paris_is_about_878_km() {
        let d = distance_km(52.5200, 13.4050, 48.8566, 2.3522);
        assert!((d - 878.0).abs() < 10.0, "got {d}km");
    }

    #[test]
    fn distance_is_symmetric() {
        let there = distance_km(25.0478, 121.5173, 22.6273, 120.3014);
        let back = distance_km(22.6273, 120.3014, 25.0478, 121.5173);
        assert!((there - back).abs() < 1e-9);
    }

    #[test]
    fn nearby_sorts_ascending_and_respects_radius() {
        let cameras = vec![
            camera_at("far", "25.10", "121.60"),
            camera_at("near", "25.001", "121.501"),
            camera_at("exact", "25.0", "121.5"),
        ];
        let hits = find_nearby(&cameras, 25.0, 121.5, 50.0);
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].camera.city_name, "exact");
        assert!(hits[0].distance_km.abs() < 1e-9);
        assert_eq!(hits[1].camera.city_name, "near");
        assert_eq!(hits[2].camera.city_name, "far");
        for hit in &hits {
            assert!(hit.distance_km <= 50.0);
        }
    }

    #[test]
    fn nearby_includes_coincident_record_at_zero_radius() {
        let cameras = vec![camera_at("exact", "25.0", "121.5")];
        let hits = find_nearby(&cameras, 25.0, 121.5, 0.0);
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn nearby_excludes_records_without_coordinates() {
        let cameras = vec![
            camera_at("unset", "0", "0"),
            camera_at("blank", "", ""),
            camera_at("half", "25.0", "0"),
        ];
        // target at the origin, so 0,0 records would trivially match
        assert!(find_nearby(&cameras, 0.0, 0.0, 10.0).is_empty());
    }

    #[test]
    fn nearby_keeps_record_order_on_equal_distance() {
        let cameras = vec![
            camera_at("first", "25.0", "121.5"),
            camera_at("second", "25.0", "121.5"),
        ];
        let hits = find_nearby(&cameras, 25.0, 121.5, 1.0);
        assert_eq!(hits[0].camera.city_name, "first");
        assert_eq!(hits[1].camera.city_name, "second");
    }

    #[test]
    fn in_bounds_is_inclusive_and_keeps_zero_coordinates() {
        let cameras = vec![
            camera_at("edge", "25.0", "121.5"),
            camera_at("inside", "24.0", "121.0"),
            camera_at("outside", "26.0", "121.0"),
            camera_at("unset", "0", "0"),
        ];
        let hits = find_in_bounds(&cameras, 0.0, 25.0, 0.0, 122.0);
        let names: Vec<&str> = hits.iter().map(|c| c.city_name.as_str()).collect();
        assert_eq!(names, vec!["edge", "inside", "unset"]);
    }

    #[test]
    fn bounds_covers_valid_records_only() {
        let cameras = vec![
            camera_at("a", "25.0", "121.5"),
            camera_at("b", "22.6", "120.3"),
            camera_at("unset", "0", "0"),
        ];
        let extent = bounds(&cameras);
        assert!((extent.min_latitude - 22.6).abs() < f64::EPSILON);
        assert!((extent.max_latitude - 25.0).abs() < f64::EPSILON);
        assert!((extent.min_longitude - 120.3).abs() < f64::EPSILON);
        assert!((extent.max_longitude - 121.5).abs() < f64::EPSILON);
        assert!((extent.center_latitude() - 23.8).abs() < 1e-9);
        assert!((extent.center_longitude() - 120.9).abs() < 1e-9);
    }

    #[test]
    fn bounds_of_invalid_records_is_default() {
        let cameras = vec![camera_at("unset", "0", "0"), camera_at("blank", "", "")];
        assert_eq!(bounds(&cameras), GeographicBounds::default());
    }
}
