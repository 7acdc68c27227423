//! Shared test utilities for the occupancy-viz workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Occupancy grid generators with verifiable patterns
//! - Grid message fixtures (JSON and typed)
//! - Approximate equality macros for placement math
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{fixtures, row_index_grid};
//! ```

pub mod fixtures;
pub mod generators;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;

/// Macro for approximate floating-point equality assertions.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(1.0001_f64, 1.0_f64, 0.001_f64); // passes
/// assert_approx_eq!(1.1_f32, 1.0_f32, 0.001_f32);    // fails
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if diff > epsilon {
            panic!(
                concat!(
                    "assertion failed: `(left ≈ right)`\n",
                    "  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`"
                ),
                left,
                right,
                diff,
                epsilon
            );
        }
    }};
}

/// Macro for approximate equality of 3D points or vectors.
///
/// Works with anything exposing `.x`, `.y`, `.z` fields.
///
/// ```ignore
/// use test_utils::assert_xyz_approx_eq;
///
/// assert_xyz_approx_eq!(placement.translation, (3.5, 7.0, 3.0), 1e-9);
/// ```
#[macro_export]
macro_rules! assert_xyz_approx_eq {
    ($actual:expr, ($x:expr, $y:expr, $z:expr), $epsilon:expr) => {{
        let actual = $actual;
        $crate::assert_approx_eq!(actual.x, $x, $epsilon);
        $crate::assert_approx_eq!(actual.y, $y, $epsilon);
        $crate::assert_approx_eq!(actual.z, $z, $epsilon);
    }};
}
