//! Common test fixtures for grid rendering tests.

use grid_common::{MapMetaData, Point, Pose, Quaternion};

/// Common grid metadata definitions for testing.
pub mod info {
    use super::*;

    /// 10x20 grid at 0.5m, origin (1, 2, 3), no rotation.
    pub fn offset_10x20() -> MapMetaData {
        MapMetaData::new(
            10,
            20,
            0.5,
            Pose::new(Point::new(1.0, 2.0, 3.0), Quaternion::identity()),
        )
    }

    /// A typical SLAM map: 384x384 cells at 5cm, centered on the world origin.
    pub fn slam_384() -> MapMetaData {
        MapMetaData::new(
            384,
            384,
            0.05,
            Pose::new(Point::new(-9.6, -9.6, 0.0), Quaternion::identity()),
        )
    }

    /// Small grid rotated a quarter turn about Z.
    pub fn rotated_4x2() -> MapMetaData {
        MapMetaData::new(
            4,
            2,
            1.0,
            Pose::new(
                Point::new(0.0, 0.0, 0.0),
                Quaternion::from_yaw(std::f64::consts::FRAC_PI_2),
            ),
        )
    }
}

/// A 3x2 `nav_msgs/OccupancyGrid` message as JSON, including a header
/// that the parser must ignore.
pub const SMALL_GRID_JSON: &str = r#"{
  "header": { "frame_id": "map", "stamp": { "sec": 0, "nanosec": 0 } },
  "info": {
    "map_load_time": { "sec": 0, "nanosec": 0 },
    "width": 3,
    "height": 2,
    "resolution": 0.05,
    "origin": {
      "position": { "x": -1.0, "y": -0.5, "z": 0.0 },
      "orientation": { "x": 0.0, "y": 0.0, "z": 0.0, "w": 1.0 }
    }
  },
  "data": [0, 50, 100, -1, 0, 100]
}"#;

/// A message whose data is one cell short.
pub const SHORT_DATA_JSON: &str = r#"{
  "info": { "width": 2, "height": 2, "resolution": 1.0 },
  "data": [0, 0, 0]
}"#;

/// A message without an info block.
pub const MISSING_INFO_JSON: &str = r#"{ "data": [0, 0, 0, 0] }"#;

/// Serialize a grid message for file-based tests.
pub fn grid_json(info: &MapMetaData, data: &[i8]) -> String {
    serde_json::json!({ "info": info, "data": data }).to_string()
}
