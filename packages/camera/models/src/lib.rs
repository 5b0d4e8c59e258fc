#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Typed views of the speed-camera open-data payload.
//!
//! The upstream feed is a CKAN Datastore response: a `success`/`result`
//! envelope wrapping an array of camera records. The publisher encodes
//! coordinates and speed limits as strings that are sometimes blank or
//! non-numeric, so the raw fields are kept verbatim and exposed through
//! parse-with-fallback numeric accessors instead of being validated at
//! decode time.
//!
//! Field name matching is ASCII case-insensitive on decode (the feed has
//! shipped both `CityName` and `cityname` spellings over time); encoding
//! always emits the canonical names.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One fixed speed-enforcement camera record.
///
/// All fields hold the raw upstream strings. Use [`Camera::latitude_value`],
/// [`Camera::longitude_value`], and [`Camera::speed_limit_value`] for the
/// numeric views.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Camera {
    /// City or county name (e.g. a municipality or a national highway label).
    #[serde(rename = "CityName")]
    pub city_name: String,
    /// District or region within the city.
    #[serde(rename = "RegionName")]
    pub region_name: String,
    /// Street address or milepost of the installation.
    #[serde(rename = "Address")]
    pub address: String,
    /// Police department responsible for the camera.
    #[serde(rename = "DeptNm")]
    pub department: String,
    /// Precinct or branch within the department.
    #[serde(rename = "BranchNm")]
    pub branch: String,
    /// Longitude as published — may be blank or non-numeric.
    #[serde(rename = "Longitude")]
    pub longitude: String,
    /// Latitude as published — may be blank or non-numeric.
    #[serde(rename = "Latitude")]
    pub latitude: String,
    /// Free-text direction of enforcement (e.g. northbound).
    #[serde(rename = "direct")]
    pub direction: String,
    /// Speed limit in km/h as published — may be blank or non-numeric.
    #[serde(rename = "limit")]
    pub speed_limit: String,
}

impl Camera {
    /// Longitude parsed as `f64`. Blank or unparsable input yields `0.0`;
    /// surrounding whitespace is tolerated.
    #[must_use]
    pub fn longitude_value(&self) -> f64 {
        self.longitude.trim().parse().unwrap_or(0.0)
    }

    /// Latitude parsed as `f64`. Blank or unparsable input yields `0.0`.
    #[must_use]
    pub fn latitude_value(&self) -> f64 {
        self.latitude.trim().parse().unwrap_or(0.0)
    }

    /// Speed limit parsed as km/h. Blank or unparsable input yields `0`.
    #[must_use]
    pub fn speed_limit_value(&self) -> u32 {
        self.speed_limit.trim().parse().unwrap_or(0)
    }
}

impl std::fmt::Display for Camera {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} - {} (limit: {}km/h)",
            self.city_name, self.address, self.direction, self.speed_limit
        )
    }
}

/// The full decoded payload: success flag plus the result body.
///
/// A `success` of `false` (or a decode failure before this point) marks the
/// dataset as unusable; an empty [`DatasetResult::records`] list on a
/// successful payload just means there is no data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Dataset {
    /// Whether the upstream API reported the export as successful.
    pub success: bool,
    /// The result body carrying metadata and the record list.
    pub result: DatasetResult,
}

impl Dataset {
    /// The ordered camera records.
    #[must_use]
    pub fn records(&self) -> &[Camera] {
        &self.result.records
    }
}

/// The `result` body of the payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DatasetResult {
    /// Upstream resource identifier for the export.
    pub resource_id: String,
    /// Declared page limit of the export.
    pub limit: u64,
    /// Declared total record count.
    pub total: u64,
    /// Field schema metadata; not used downstream.
    pub fields: Vec<FieldDef>,
    /// The ordered camera records.
    pub records: Vec<Camera>,
}

/// One entry of the `fields` schema list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldDef {
    /// Declared field type (e.g. `"text"`).
    #[serde(rename = "type")]
    pub kind: String,
    /// Field identifier.
    pub id: String,
}

/// Case-insensitive key lookup in a decoded JSON object.
fn lookup<'a>(map: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    map.iter()
        .find_map(|(key, value)| key.eq_ignore_ascii_case(name).then_some(value))
}

/// String field with tolerant defaults: missing keys and non-string values
/// both decode to the empty string.
fn string_field(map: &Map<String, Value>, name: &str) -> String {
    lookup(map, name)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn u64_field(map: &Map<String, Value>, name: &str) -> u64 {
    lookup(map, name).and_then(Value::as_u64).unwrap_or_default()
}

fn bool_field(map: &Map<String, Value>, name: &str) -> bool {
    lookup(map, name).and_then(Value::as_bool).unwrap_or_default()
}

impl<'de> Deserialize<'de> for Camera {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map: Map<String, Value> = Deserialize::deserialize(deserializer)?;
        Ok(Self {
            city_name: string_field(&map, "CityName"),
            region_name: string_field(&map, "RegionName"),
            address: string_field(&map, "Address"),
            department: string_field(&map, "DeptNm"),
            branch: string_field(&map, "BranchNm"),
            longitude: string_field(&map, "Longitude"),
            latitude: string_field(&map, "Latitude"),
            direction: string_field(&map, "direct"),
            speed_limit: string_field(&map, "limit"),
        })
    }
}

impl<'de> Deserialize<'de> for FieldDef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map: Map<String, Value> = Deserialize::deserialize(deserializer)?;
        Ok(Self {
            kind: string_field(&map, "type"),
            id: string_field(&map, "id"),
        })
    }
}

impl<'de> Deserialize<'de> for DatasetResult {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map: Map<String, Value> = Deserialize::deserialize(deserializer)?;
        let fields: Vec<FieldDef> = match lookup(&map, "fields") {
            Some(value) => {
                serde_json::from_value(value.clone()).map_err(serde::de::Error::custom)?
            }
            None => Vec::new(),
        };
        let records: Vec<Camera> = match lookup(&map, "records") {
            Some(value) => {
                serde_json::from_value(value.clone()).map_err(serde::de::Error::custom)?
            }
            None => Vec::new(),
        };
        Ok(Self {
            resource_id: string_field(&map, "resource_id"),
            limit: u64_field(&map, "limit"),
            total: u64_field(&map, "total"),
            fields,
            records,
        })
    }
}

impl<'de> Deserialize<'de> for Dataset {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map: Map<String, Value> = Deserialize::deserialize(deserializer)?;
        let result = match lookup(&map, "result") {
            Some(value) => {
                serde_json::from_value(value.clone()).map_err(serde::de::Error::custom)?
            }
            None => DatasetResult::default(),
        };
        Ok(Self {
            success: bool_field(&map, "success"),
            result,
        })
    }
}
