//! A colorized grid layer: pixel buffer, placement and update signal.

use grid_common::{LayerOptions, MapMetaData, OccupancyGrid, OccupancyGridMessage};

use crate::colorizer::{Colorizer, PixelBuffer};
use crate::error::{RenderError, RenderResult};
use crate::placement::Placement;
use crate::scene::{MaterialDescriptor, TextureDescriptor};

/// Everything a rendering backend needs to show one occupancy grid.
///
/// The pixel buffer is rebuilt in full on every update and swapped in only
/// once complete. After each rebuild the layer reports `needs_update()`
/// until a consumer takes the new pixels with [`take_update`](Self::take_update).
#[derive(Debug)]
pub struct OccupancyGridLayer {
    colorizer: Colorizer,
    info: MapMetaData,
    pixels: PixelBuffer,
    placement: Placement,
    revision: u64,
    needs_update: bool,
}

impl OccupancyGridLayer {
    pub fn new(grid: &OccupancyGrid, colorizer: Colorizer) -> Self {
        let pixels = colorizer.colorize(grid);
        Self {
            info: *grid.info(),
            placement: Placement::from_grid(grid),
            pixels,
            colorizer,
            revision: 1,
            needs_update: true,
        }
    }

    /// Layer with palette colors taken from `options`.
    pub fn with_options(grid: &OccupancyGrid, options: LayerOptions) -> Self {
        Self::new(grid, Colorizer::new(options))
    }

    /// Validate a raw message, then build the layer.
    pub fn from_message(msg: OccupancyGridMessage, colorizer: Colorizer) -> RenderResult<Self> {
        let grid = OccupancyGrid::try_from(msg)?;
        Ok(Self::new(&grid, colorizer))
    }

    /// Recolor from a new grid with the same geometry.
    ///
    /// The origin may move; width, height and resolution may not.
    pub fn update(&mut self, grid: &OccupancyGrid) -> RenderResult<()> {
        if !self.info.same_geometry(grid.info()) {
            return Err(RenderError::GeometryChanged {
                expected: self.info,
                actual: *grid.info(),
            });
        }

        let pixels = self.colorizer.colorize(grid);
        self.pixels = pixels;
        self.info = *grid.info();
        self.placement = Placement::from_grid(grid);
        self.revision += 1;
        self.needs_update = true;

        tracing::debug!(revision = self.revision, "Occupancy grid layer updated");
        Ok(())
    }

    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    pub fn info(&self) -> &MapMetaData {
        &self.info
    }

    pub fn colorizer(&self) -> &Colorizer {
        &self.colorizer
    }

    pub fn options(&self) -> &LayerOptions {
        self.colorizer.options()
    }

    /// Number of completed colorization passes.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn needs_update(&self) -> bool {
        self.needs_update
    }

    /// Hand out the latest pixels once per colorization pass.
    pub fn take_update(&mut self) -> Option<&PixelBuffer> {
        if !self.needs_update {
            return None;
        }
        self.needs_update = false;
        Some(&self.pixels)
    }

    pub fn texture_descriptor(&self) -> TextureDescriptor {
        TextureDescriptor::for_buffer(&self.pixels)
    }

    pub fn material_descriptor(&self) -> MaterialDescriptor {
        MaterialDescriptor::from_options(self.options())
    }

    pub fn into_pixels(self) -> PixelBuffer {
        self.pixels
    }
}
