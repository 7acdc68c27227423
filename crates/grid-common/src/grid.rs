//! Occupancy grid messages and the validated grid type.
//!
//! The wire shape follows the ROS `nav_msgs/OccupancyGrid` message: an
//! `info` block (dimensions, resolution, origin pose) plus a flat, row-major
//! `data` array of signed bytes. Values 0..=100 are occupancy probabilities
//! in percent, -1 marks unknown cells.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GridError, GridResult};

/// Occupancy value for free cells.
pub const FREE: i8 = 0;
/// Occupancy value for fully occupied cells.
pub const OCCUPIED: i8 = 100;
/// Occupancy value for cells that were never observed.
pub const UNKNOWN: i8 = -1;

/// A position in meters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl Point {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Orientation as an `(x, y, z, w)` quaternion.
///
/// Expected to be unit length. Nothing in this workspace renormalizes it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub z: f64,
    #[serde(default = "default_w")]
    pub w: f64,
}

fn default_w() -> f64 {
    1.0
}

impl Quaternion {
    pub fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    pub fn identity() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    /// Rotation of `yaw` radians about +Z.
    pub fn from_yaw(yaw: f64) -> Self {
        let half = yaw * 0.5;
        Self::new(0.0, 0.0, half.sin(), half.cos())
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::identity()
    }
}

/// Position plus orientation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    #[serde(default)]
    pub position: Point,
    #[serde(default)]
    pub orientation: Quaternion,
}

impl Pose {
    pub fn new(position: Point, orientation: Quaternion) -> Self {
        Self {
            position,
            orientation,
        }
    }
}

/// Grid metadata (`info` block of the message).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapMetaData {
    /// Number of cells along X (columns)
    pub width: u32,
    /// Number of cells along Y (rows)
    pub height: u32,
    /// Cell edge length in meters
    pub resolution: f64,
    /// Pose of cell (0, 0)'s lower-left corner in the world frame
    #[serde(default)]
    pub origin: Pose,
}

impl MapMetaData {
    pub fn new(width: u32, height: u32, resolution: f64, origin: Pose) -> Self {
        Self {
            width,
            height,
            resolution,
            origin,
        }
    }

    /// Check dimensions and resolution; returns the expected cell count.
    pub fn validate(&self) -> GridResult<usize> {
        if self.width == 0 || self.height == 0 {
            return Err(GridError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if !self.resolution.is_finite() || self.resolution <= 0.0 {
            return Err(GridError::InvalidResolution(self.resolution));
        }
        (self.width as usize)
            .checked_mul(self.height as usize)
            .ok_or(GridError::InvalidDimensions {
                width: self.width,
                height: self.height,
            })
    }

    /// Metric extent of the grid as `(width_m, height_m)`.
    pub fn extent(&self) -> (f64, f64) {
        (
            self.width as f64 * self.resolution,
            self.height as f64 * self.resolution,
        )
    }

    /// True when both grids share width, height and resolution.
    pub fn same_geometry(&self, other: &MapMetaData) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.resolution == other.resolution
    }
}

/// Unvalidated grid message as received on the wire.
///
/// Extra fields such as `header` are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OccupancyGridMessage {
    #[serde(default)]
    pub info: Option<MapMetaData>,
    #[serde(default)]
    pub data: Vec<i8>,
}

impl OccupancyGridMessage {
    /// Parse a message from a JSON string.
    pub fn from_json(json: &str) -> GridResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A grid whose dimensions, resolution and data length are known to agree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OccupancyGrid {
    info: MapMetaData,
    data: Vec<i8>,
}

impl OccupancyGrid {
    /// Validate metadata and data length.
    pub fn new(info: MapMetaData, data: Vec<i8>) -> GridResult<Self> {
        let expected = info.validate()?;
        if data.len() != expected {
            return Err(GridError::DataLengthMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { info, data })
    }

    /// Grid with every cell set to `value`.
    pub fn filled(info: MapMetaData, value: i8) -> GridResult<Self> {
        let len = info.validate()?;
        Ok(Self {
            info,
            data: vec![value; len],
        })
    }

    /// Parse and validate a JSON grid message.
    pub fn from_json(json: &str) -> GridResult<Self> {
        OccupancyGridMessage::from_json(json)?.try_into()
    }

    /// Load and validate a JSON grid message from disk.
    pub fn from_file(path: impl AsRef<Path>) -> GridResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| GridError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&content)
    }

    pub fn info(&self) -> &MapMetaData {
        &self.info
    }

    pub fn width(&self) -> usize {
        self.info.width as usize
    }

    pub fn height(&self) -> usize {
        self.info.height as usize
    }

    pub fn resolution(&self) -> f64 {
        self.info.resolution
    }

    pub fn origin(&self) -> &Pose {
        &self.info.origin
    }

    /// Raw values in native row order.
    pub fn data(&self) -> &[i8] {
        &self.data
    }

    /// Number of cells (`width * height`).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false for a validated grid.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Value at native `row`, `col`.
    pub fn value(&self, row: usize, col: usize) -> Option<i8> {
        if row >= self.height() || col >= self.width() {
            return None;
        }
        self.data.get(row * self.width() + col).copied()
    }

    /// Count cells by occupancy class.
    pub fn census(&self) -> CellCensus {
        let mut census = CellCensus::default();
        for &v in &self.data {
            match v {
                FREE => census.free += 1,
                OCCUPIED => census.occupied += 1,
                UNKNOWN => census.unknown += 1,
                _ => census.other += 1,
            }
        }
        census
    }

    pub fn into_parts(self) -> (MapMetaData, Vec<i8>) {
        (self.info, self.data)
    }
}

impl TryFrom<OccupancyGridMessage> for OccupancyGrid {
    type Error = GridError;

    fn try_from(msg: OccupancyGridMessage) -> GridResult<Self> {
        let info = msg.info.ok_or(GridError::MissingInfo)?;
        Self::new(info, msg.data)
    }
}

/// Cell counts per occupancy class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CellCensus {
    pub free: usize,
    pub occupied: usize,
    pub unknown: usize,
    /// Anything else, including intermediate probabilities.
    pub other: usize,
}

impl CellCensus {
    pub fn total(&self) -> usize {
        self.free + self.occupied + self.unknown + self.other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(width: u32, height: u32) -> MapMetaData {
        MapMetaData::new(width, height, 0.05, Pose::default())
    }

    #[test]
    fn test_new_accepts_matching_length() {
        let grid = OccupancyGrid::new(info(3, 2), vec![0; 6]).unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.len(), 6);
    }

    #[test]
    fn test_new_rejects_length_mismatch() {
        let err = OccupancyGrid::new(info(3, 2), vec![0; 5]).unwrap_err();
        assert!(matches!(
            err,
            GridError::DataLengthMismatch {
                expected: 6,
                actual: 5
            }
        ));
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let err = OccupancyGrid::new(info(0, 4), vec![]).unwrap_err();
        assert!(matches!(err, GridError::InvalidDimensions { width: 0, height: 4 }));
    }

    #[test]
    fn test_bad_resolution_rejected() {
        for res in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let meta = MapMetaData::new(2, 2, res, Pose::default());
            let err = OccupancyGrid::new(meta, vec![0; 4]).unwrap_err();
            assert!(matches!(err, GridError::InvalidResolution(_)));
        }
    }

    #[test]
    fn test_missing_info_rejected() {
        let msg = OccupancyGridMessage {
            info: None,
            data: vec![0; 4],
        };
        let err = OccupancyGrid::try_from(msg).unwrap_err();
        assert!(matches!(err, GridError::MissingInfo));
        assert!(err.is_contract_violation());
    }

    #[test]
    fn test_value_lookup() {
        let grid = OccupancyGrid::new(info(2, 2), vec![0, 1, 2, 3]).unwrap();
        assert_eq!(grid.value(0, 1), Some(1));
        assert_eq!(grid.value(1, 0), Some(2));
        assert_eq!(grid.value(2, 0), None);
        assert_eq!(grid.value(0, 2), None);
    }

    #[test]
    fn test_census() {
        let grid = OccupancyGrid::new(info(5, 1), vec![0, 100, -1, 50, 0]).unwrap();
        let census = grid.census();
        assert_eq!(census.free, 2);
        assert_eq!(census.occupied, 1);
        assert_eq!(census.unknown, 1);
        assert_eq!(census.other, 1);
        assert_eq!(census.total(), 5);
    }

    #[test]
    fn test_from_yaw() {
        let q = Quaternion::from_yaw(std::f64::consts::PI);
        assert!(q.w.abs() < 1e-12);
        assert!((q.z - 1.0).abs() < 1e-12);
    }
}
