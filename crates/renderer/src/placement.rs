//! World-space placement of the grid quad.
//!
//! The quad is built at one unit per cell and centered on its own origin,
//! so it is scaled by the grid resolution and shifted by half its metric
//! extent to put its lower-left corner on the grid origin.

use grid_common::{MapMetaData, OccupancyGrid, Pose};
use nalgebra::{Matrix4, Point3, Quaternion, UnitQuaternion, Vector2, Vector3};
use serde::{Deserialize, Serialize};

/// Rotation, translation and non-uniform scale for the grid quad.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Quad center in world coordinates
    pub translation: Vector3<f64>,
    /// Grid origin orientation, copied verbatim
    pub rotation: UnitQuaternion<f64>,
    /// `(resolution, resolution, 1)`
    pub scale: Vector3<f64>,
    /// Quad size in cells (local units)
    pub quad_size: Vector2<f64>,
}

impl Placement {
    pub fn from_info(info: &MapMetaData) -> Self {
        let origin = &info.origin;
        let (extent_x, extent_y) = info.extent();

        Self {
            translation: Vector3::new(
                extent_x / 2.0 + origin.position.x,
                extent_y / 2.0 + origin.position.y,
                origin.position.z,
            ),
            rotation: rotation_of(origin),
            scale: Vector3::new(info.resolution, info.resolution, 1.0),
            quad_size: Vector2::new(info.width as f64, info.height as f64),
        }
    }

    pub fn from_grid(grid: &OccupancyGrid) -> Self {
        Self::from_info(grid.info())
    }

    /// `T * R * S` as a 4x4 matrix.
    pub fn to_homogeneous(&self) -> Matrix4<f64> {
        Matrix4::new_translation(&self.translation)
            * self.rotation.to_homogeneous()
            * Matrix4::new_nonuniform_scaling(&self.scale)
    }

    /// Map a point from quad-local to world coordinates.
    pub fn transform_point(&self, local: &Point3<f64>) -> Point3<f64> {
        let scaled = Point3::from(local.coords.component_mul(&self.scale));
        self.rotation.transform_point(&scaled) + self.translation
    }

    /// Quad corners in local units: lower-left, lower-right, upper-right, upper-left.
    pub fn local_corners(&self) -> [Point3<f64>; 4] {
        let hx = self.quad_size.x / 2.0;
        let hy = self.quad_size.y / 2.0;
        [
            Point3::new(-hx, -hy, 0.0),
            Point3::new(hx, -hy, 0.0),
            Point3::new(hx, hy, 0.0),
            Point3::new(-hx, hy, 0.0),
        ]
    }

    /// Quad corners in world coordinates, same order as [`Self::local_corners`].
    pub fn world_corners(&self) -> [Point3<f64>; 4] {
        self.local_corners().map(|p| self.transform_point(&p))
    }
}

/// Pose orientation as a unit quaternion, without renormalizing.
fn rotation_of(pose: &Pose) -> UnitQuaternion<f64> {
    let q = pose.orientation;
    UnitQuaternion::new_unchecked(Quaternion::new(q.w, q.x, q.y, q.z))
}
