//! Tests for quad placement math.

use grid_common::{MapMetaData, Point, Pose, Quaternion};
use nalgebra::Point3;
use renderer::Placement;
use test_utils::{assert_approx_eq, assert_xyz_approx_eq, fixtures, row_index_grid};

#[test]
fn test_offset_grid_position_and_scale() {
    let placement = Placement::from_info(&fixtures::info::offset_10x20());

    assert_xyz_approx_eq!(placement.translation, (3.5, 7.0, 3.0), 1e-12);
    assert_approx_eq!(placement.scale.x, 0.5, 1e-12);
    assert_approx_eq!(placement.scale.y, 0.5, 1e-12);
    assert_approx_eq!(placement.scale.z, 1.0, 1e-12);
}

#[test]
fn test_lower_left_corner_on_origin() {
    let placement = Placement::from_info(&fixtures::info::offset_10x20());
    let [lower_left, lower_right, upper_right, upper_left] = placement.world_corners();

    assert_xyz_approx_eq!(lower_left, (1.0, 2.0, 3.0), 1e-12);
    assert_xyz_approx_eq!(lower_right, (6.0, 2.0, 3.0), 1e-12);
    assert_xyz_approx_eq!(upper_right, (6.0, 12.0, 3.0), 1e-12);
    assert_xyz_approx_eq!(upper_left, (1.0, 12.0, 3.0), 1e-12);
}

#[test]
fn test_slam_map_centered_on_world_origin() {
    let placement = Placement::from_info(&fixtures::info::slam_384());
    assert_xyz_approx_eq!(placement.translation, (0.0, 0.0, 0.0), 1e-9);
    let [lower_left, _, upper_right, _] = placement.world_corners();
    assert_xyz_approx_eq!(lower_left, (-9.6, -9.6, 0.0), 1e-9);
    assert_xyz_approx_eq!(upper_right, (9.6, 9.6, 0.0), 1e-9);
}

#[test]
fn test_rotation_does_not_move_translation() {
    // Translation only depends on extent and origin position.
    let info = fixtures::info::rotated_4x2();
    let placement = Placement::from_info(&info);
    assert_xyz_approx_eq!(placement.translation, (2.0, 1.0, 0.0), 1e-12);

    let q = placement.rotation.quaternion();
    assert_approx_eq!(q.k, (std::f64::consts::FRAC_PI_4).sin(), 1e-12);
    assert_approx_eq!(q.w, (std::f64::consts::FRAC_PI_4).cos(), 1e-12);
}

#[test]
fn test_rotation_spins_about_quad_center() {
    let placement = Placement::from_info(&fixtures::info::rotated_4x2());
    // Local +X edge midpoint (2, 0, 0) rotates to +Y of the center.
    let p = placement.transform_point(&Point3::new(2.0, 0.0, 0.0));
    assert_xyz_approx_eq!(p, (2.0, 3.0, 0.0), 1e-12);
}

#[test]
fn test_homogeneous_matrix() {
    let placement = Placement::from_info(&fixtures::info::offset_10x20());
    let m = placement.to_homogeneous();
    assert_approx_eq!(m[(0, 0)], 0.5, 1e-12);
    assert_approx_eq!(m[(1, 1)], 0.5, 1e-12);
    assert_approx_eq!(m[(2, 2)], 1.0, 1e-12);
    assert_approx_eq!(m[(0, 3)], 3.5, 1e-12);
    assert_approx_eq!(m[(1, 3)], 7.0, 1e-12);
    assert_approx_eq!(m[(2, 3)], 3.0, 1e-12);
    assert_approx_eq!(m[(3, 3)], 1.0, 1e-12);
}

#[test]
fn test_independent_of_cell_values() {
    let grid = row_index_grid(8, 4);
    let zeros = grid_common::OccupancyGrid::filled(*grid.info(), 0).unwrap();
    assert_eq!(Placement::from_grid(&grid), Placement::from_grid(&zeros));
}

#[test]
fn test_quad_size_in_cells() {
    let info = MapMetaData::new(
        7,
        3,
        0.1,
        Pose::new(Point::new(0.0, 0.0, 0.0), Quaternion::identity()),
    );
    let placement = Placement::from_info(&info);
    assert_eq!(placement.quad_size.x, 7.0);
    assert_eq!(placement.quad_size.y, 3.0);
    let local = placement.local_corners();
    assert_xyz_approx_eq!(local[0], (-3.5, -1.5, 0.0), 1e-12);
}

#[test]
fn test_serializes_to_json() {
    let placement = Placement::from_info(&fixtures::info::offset_10x20());
    let json = serde_json::to_value(placement).unwrap();
    assert!(json.get("translation").is_some());
    assert!(json.get("rotation").is_some());
    let back: Placement = serde_json::from_value(json).unwrap();
    assert_eq!(back, placement);
}
