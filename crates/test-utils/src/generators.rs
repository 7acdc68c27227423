//! Test data generators for synthetic occupancy grids.
//!
//! These generators create predictable, verifiable patterns so tests can
//! check exactly which source cell ended up in which pixel.

use grid_common::{MapMetaData, OccupancyGrid, Pose};

/// Creates raw data where each cell holds its own row index.
///
/// # Example
///
/// ```
/// use test_utils::create_row_index_data;
///
/// let data = create_row_index_data(3, 2);
/// assert_eq!(data, vec![0, 0, 0, 1, 1, 1]);
/// ```
pub fn create_row_index_data(width: usize, height: usize) -> Vec<i8> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for _ in 0..width {
            data.push(row as i8);
        }
    }
    data
}

/// Creates raw data where each cell holds `(row * width + col) % 128`.
pub fn create_index_data(width: usize, height: usize) -> Vec<i8> {
    (0..width * height).map(|i| (i % 128) as i8).collect()
}

/// Creates a left-to-right occupancy ramp from 0 (free) to 100 (occupied).
pub fn create_ramp_data(width: usize, height: usize) -> Vec<i8> {
    let mut data = Vec::with_capacity(width * height);
    for _ in 0..height {
        for col in 0..width {
            let v = if width > 1 { col * 100 / (width - 1) } else { 0 };
            data.push(v as i8);
        }
    }
    data
}

/// Creates a typical map: free interior, occupied border walls, and an
/// unknown band along the top rows.
pub fn create_room_data(width: usize, height: usize, unknown_rows: usize) -> Vec<i8> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            let v = if row >= height.saturating_sub(unknown_rows) {
                -1
            } else if row == 0 || col == 0 || col + 1 == width {
                100
            } else {
                0
            };
            data.push(v);
        }
    }
    data
}

/// Metadata with the given size and resolution at the world origin.
pub fn test_info(width: u32, height: u32, resolution: f64) -> MapMetaData {
    MapMetaData::new(width, height, resolution, Pose::default())
}

/// Validated grid whose cells hold their row index.
pub fn row_index_grid(width: u32, height: u32) -> OccupancyGrid {
    let data = create_row_index_data(width as usize, height as usize);
    OccupancyGrid::new(test_info(width, height, 0.05), data)
        .expect("generated grid has matching length")
}

/// Validated grid with every cell set to `value`.
pub fn uniform_grid(width: u32, height: u32, value: i8) -> OccupancyGrid {
    OccupancyGrid::filled(test_info(width, height, 0.05), value)
        .expect("generated grid has matching length")
}

/// Validated grid from raw data at 5cm resolution.
pub fn grid_from_data(width: u32, height: u32, data: Vec<i8>) -> OccupancyGrid {
    OccupancyGrid::new(test_info(width, height, 0.05), data).expect("data length must match")
}
