//! Common types shared by the occupancy grid renderer and its tools.

pub mod color;
pub mod error;
pub mod grid;
pub mod options;

pub use color::{Color, ColorSpec};
pub use error::{GridError, GridResult};
pub use grid::{
    CellCensus, MapMetaData, OccupancyGrid, OccupancyGridMessage, Point, Pose, Quaternion,
};
pub use options::{LayerOptions, PaletteName};
