#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Filtering predicates and aggregate statistics over a decoded dataset.
//!
//! Nothing in this crate can fail: an empty record list (or a dataset whose
//! load went wrong upstream) produces empty results and zeroed aggregates.
//! Every call scans the in-memory record list afresh; results are never
//! cached.

use std::collections::BTreeMap;

use camera_map_camera_models::{Camera, Dataset};
use serde::{Deserialize, Serialize};

/// Aggregate statistics over one dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraStatistics {
    /// Total number of records, including those with unparsable fields.
    pub total_cameras: usize,
    /// Number of distinct, non-blank city names.
    pub unique_cities: usize,
    /// Mean speed limit over records with a parsed limit > 0; `0.0` when no
    /// record qualifies.
    pub average_speed_limit: f64,
    /// Highest parsed speed limit; `0` when no record has a positive limit.
    pub max_speed_limit: u32,
    /// Lowest parsed speed limit; `0` when no record has a positive limit.
    pub min_speed_limit: u32,
    /// Occurrence count per literal direction label, including the empty
    /// label; no normalization is applied.
    pub direction_counts: BTreeMap<String, u64>,
}

impl std::fmt::Display for CameraStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} cameras across {} cities, average limit {:.1}km/h",
            self.total_cameras, self.unique_cities, self.average_speed_limit
        )
    }
}

/// Cameras whose city name contains `city`, matched case-insensitively.
#[must_use]
pub fn filter_by_city(dataset: &Dataset, city: &str) -> Vec<Camera> {
    let needle = city.to_lowercase();
    dataset
        .records()
        .iter()
        .filter(|camera| camera.city_name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Cameras whose parsed speed limit equals `speed_limit` exactly.
#[must_use]
pub fn filter_by_speed_limit(dataset: &Dataset, speed_limit: u32) -> Vec<Camera> {
    dataset
        .records()
        .iter()
        .filter(|camera| camera.speed_limit_value() == speed_limit)
        .cloned()
        .collect()
}

/// Cameras whose direction label contains `direction`, matched
/// case-insensitively.
#[must_use]
pub fn filter_by_direction(dataset: &Dataset, direction: &str) -> Vec<Camera> {
    let needle = direction.to_lowercase();
    dataset
        .records()
        .iter()
        .filter(|camera| camera.direction.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Distinct, non-blank city names, sorted ascending.
#[must_use]
pub fn unique_cities(dataset: &Dataset) -> Vec<String> {
    let mut cities: Vec<String> = dataset
        .records()
        .iter()
        .filter(|camera| !camera.city_name.trim().is_empty())
        .map(|camera| camera.city_name.clone())
        .collect();
    cities.sort();
    cities.dedup();
    cities
}

/// Computes aggregate statistics over the dataset.
///
/// Records whose speed limit is blank or unparsable still count toward
/// `total_cameras` but are excluded from the average/max/min aggregates;
/// when no record has a positive limit those three stay at their zero
/// sentinel.
#[must_use]
pub fn statistics(dataset: &Dataset) -> CameraStatistics {
    let records = dataset.records();

    let limits: Vec<u32> = records
        .iter()
        .map(Camera::speed_limit_value)
        .filter(|limit| *limit > 0)
        .collect();

    let sum: u64 = limits.iter().copied().map(u64::from).sum();
    #[allow(clippy::cast_precision_loss)]
    let average_speed_limit = if limits.is_empty() {
        0.0
    } else {
        sum as f64 / limits.len() as f64
    };

    let mut direction_counts = BTreeMap::new();
    for camera in records {
        *direction_counts.entry(camera.direction.clone()).or_insert(0) += 1;
    }

    CameraStatistics {
        total_cameras: records.len(),
        unique_cities: unique_cities(dataset).len(),
        average_speed_limit,
        max_speed_limit: limits.iter().copied().max().unwrap_or(0),
        min_speed_limit: limits.iter().copied().min().unwrap_or(0),
        direction_counts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camera_map_camera_models::DatasetResult;

    fn camera(city: &str, direction: &str, limit: &str) -> Camera {
        Camera {
            city_name: city.to_string(),
            direction: direction.to_string(),
            speed_limit: limit.to_string(),
            ..Camera::default()
        }
    }

    fn dataset_of(records: Vec<Camera>) -> Dataset {
        Dataset {
            success: true,
            result: DatasetResult {
                records,
                ..DatasetResult::default()
            },
        }
    }

    fn sample() -> Dataset {
        dataset_of(vec![
            camera("Taipei City", "North", "60"),
            camera("Taipei City", "South", "50"),
            camera("New Taipei City", "north", "60"),
            camera("Kaohsiung City", "East", "open"),
        ])
    }

    #[test]
    fn city_filter_is_case_insensitive_substring() {
        let hits = filter_by_city(&sample(), "taipei");
        assert_eq!(hits.len(), 3);
        assert!(filter_by_city(&sample(), "tainan").is_empty());
    }

    #[test]
    fn speed_limit_filter_matches_numeric_view_exactly() {
        assert_eq!(filter_by_speed_limit(&sample(), 60).len(), 2);
        assert_eq!(filter_by_speed_limit(&sample(), 50).len(), 1);
        // the unparsable "open" limit reads back as 0
        assert_eq!(filter_by_speed_limit(&sample(), 0).len(), 1);
    }

    #[test]
    fn direction_filter_is_case_insensitive_substring() {
        assert_eq!(filter_by_direction(&sample(), "NORTH").len(), 2);
        assert_eq!(filter_by_direction(&sample(), "east").len(), 1);
    }

    #[test]
    fn filters_are_idempotent_and_composable() {
        let data = sample();

        let once = filter_by_city(&data, "taipei");
        let twice = filter_by_city(&dataset_of(once.clone()), "taipei");
        assert_eq!(once, twice);

        let chained = filter_by_direction(&dataset_of(once), "north");
        let combined: Vec<Camera> = data
            .records()
            .iter()
            .filter(|c| c.city_name.to_lowercase().contains("taipei"))
            .filter(|c| c.direction.to_lowercase().contains("north"))
            .cloned()
            .collect();
        assert_eq!(chained, combined);
        assert_eq!(chained.len(), 2);
    }

    #[test]
    fn filters_on_empty_dataset_return_empty() {
        let empty = Dataset::default();
        assert!(filter_by_city(&empty, "Taipei").is_empty());
        assert!(filter_by_speed_limit(&empty, 60).is_empty());
        assert!(filter_by_direction(&empty, "North").is_empty());
    }

    #[test]
    fn unique_cities_are_sorted_and_deduplicated() {
        let data = dataset_of(vec![
            camera("Taipei", "", ""),
            camera("Kaohsiung", "", ""),
            camera("Taipei", "", ""),
            camera("   ", "", ""),
            camera("", "", ""),
        ]);
        assert_eq!(unique_cities(&data), vec!["Kaohsiung", "Taipei"]);
    }

    #[test]
    fn statistics_over_mixed_records() {
        let data = dataset_of(vec![
            Camera {
                city_name: "Taipei".to_string(),
                latitude: "25.0".to_string(),
                longitude: "121.5".to_string(),
                speed_limit: "60".to_string(),
                direction: "North".to_string(),
                ..Camera::default()
            },
            Camera {
                city_name: "Taipei".to_string(),
                latitude: "0".to_string(),
                longitude: "0".to_string(),
                speed_limit: "open".to_string(),
                ..Camera::default()
            },
            Camera {
                city_name: "Kaohsiung".to_string(),
                latitude: "22.6".to_string(),
                longitude: "120.3".to_string(),
                speed_limit: "60".to_string(),
                direction: "South".to_string(),
                ..Camera::default()
            },
        ]);

        let stats = statistics(&data);
        assert_eq!(stats.total_cameras, 3);
        assert_eq!(stats.unique_cities, 2);
        assert!((stats.average_speed_limit - 60.0).abs() < f64::EPSILON);
        assert_eq!(stats.max_speed_limit, 60);
        assert_eq!(stats.min_speed_limit, 60);
        assert_eq!(stats.direction_counts.len(), 3);
        assert_eq!(stats.direction_counts["North"], 1);
        assert_eq!(stats.direction_counts["South"], 1);
        assert_eq!(stats.direction_counts[""], 1);
    }

    #[test]
    fn statistics_without_positive_limits_stay_at_zero() {
        let data = dataset_of(vec![camera("Taipei", "North", "open"), camera("Taipei", "North", "")]);
        let stats = statistics(&data);
        assert_eq!(stats.total_cameras, 2);
        assert!((stats.average_speed_limit - 0.0).abs() < f64::EPSILON);
        assert_eq!(stats.max_speed_limit, 0);
        assert_eq!(stats.min_speed_limit, 0);
    }

    #[test]
    fn statistics_of_empty_dataset_are_zeroed() {
        let stats = statistics(&Dataset::default());
        assert_eq!(stats, CameraStatistics::default());
    }
}
