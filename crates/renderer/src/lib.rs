//! Occupancy grid rendering.
//!
//! Turns an [`OccupancyGrid`](grid_common::OccupancyGrid) into:
//! - an RGBA pixel buffer colored by a named palette or a custom function
//! - a placement (rotation, translation, scale) for a unit-per-cell quad
//!
//! Engine objects are created through the [`scene::SceneBackend`] adapter;
//! nothing here talks to a GPU.

pub mod colorizer;
pub mod error;
pub mod layer;
pub mod palette;
pub mod placement;
pub mod png;
pub mod scene;

pub use colorizer::{
    ColorFn, ColorResolver, Colorizer, PixelBuffer, RawValue, ScaledCost, ValueResolver,
};
pub use error::{RenderError, RenderResult};
pub use layer::OccupancyGridLayer;
pub use palette::{Palette, PaletteSet};
pub use placement::Placement;
pub use scene::{GridMesh, MaterialDescriptor, SceneBackend, TextureDescriptor};
