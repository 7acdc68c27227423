//! Occupancy grid to RGBA pixel buffer conversion.
//!
//! Color resolution is split into two pluggable steps:
//! 1. [`ValueResolver`] turns the raw signed cell into an unsigned value
//!    (default: two's-complement reinterpretation, `-1 -> 255`).
//! 2. [`ColorResolver`] turns that value into a color (default: palette
//!    lookup, overridable with a caller-supplied color function).
//!
//! The output image is Y-flipped relative to the grid: image row 0 is the
//! top of the rendered texture and shows the grid's last row.

use std::fmt;
use std::sync::Arc;

use grid_common::{Color, LayerOptions, OccupancyGrid};

use crate::palette::{Palette, PaletteSet, CHANNELS};

/// Maps a raw cell to the unsigned value used for color lookup.
///
/// `index` is the position in `data`, `row` / `col` the native grid row and
/// column of that cell.
pub trait ValueResolver: Send + Sync {
    fn resolve_value(&self, index: usize, row: usize, col: usize, data: &[i8]) -> u8;
}

/// Maps a resolved value to a color.
pub trait ColorResolver: Send + Sync {
    fn resolve_color(&self, value: u8, index: usize, row: usize, col: usize) -> Color;
}

/// Default value resolution: the raw byte, reinterpreted as unsigned.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawValue;

impl ValueResolver for RawValue {
    #[inline]
    fn resolve_value(&self, index: usize, _row: usize, _col: usize, data: &[i8]) -> u8 {
        data[index] as u8
    }
}

/// Rescales raw costs from `[min, max]` onto the 0..=100 occupancy range.
///
/// Values outside the range are clamped. Unknown cells (`-1`) stay 255 so
/// they keep their palette color.
#[derive(Debug, Clone, Copy)]
pub struct ScaledCost {
    min: f64,
    max: f64,
}

impl ScaledCost {
    pub fn new(min: i8, max: i8) -> Self {
        Self {
            min: min as f64,
            max: max as f64,
        }
    }
}

impl ValueResolver for ScaledCost {
    fn resolve_value(&self, index: usize, _row: usize, _col: usize, data: &[i8]) -> u8 {
        let raw = data[index];
        if raw == grid_common::grid::UNKNOWN {
            return 255;
        }
        let range = self.max - self.min;
        if range.abs() < f64::EPSILON {
            return if raw as f64 >= self.max { 100 } else { 0 };
        }
        let t = ((raw as f64 - self.min) / range).clamp(0.0, 1.0);
        (t * 100.0).round() as u8
    }
}

impl ColorResolver for Palette {
    #[inline]
    fn resolve_color(&self, value: u8, _index: usize, _row: usize, _col: usize) -> Color {
        self.color(value)
    }
}

impl<R: ColorResolver + ?Sized> ColorResolver for Arc<R> {
    #[inline]
    fn resolve_color(&self, value: u8, index: usize, row: usize, col: usize) -> Color {
        (**self).resolve_color(value, index, row, col)
    }
}

/// Adapts a closure `(value, index, row, col) -> Color` into a [`ColorResolver`].
pub struct ColorFn<F>(pub F);

impl<F> ColorResolver for ColorFn<F>
where
    F: Fn(u8, usize, usize, usize) -> Color + Send + Sync,
{
    #[inline]
    fn resolve_color(&self, value: u8, index: usize, row: usize, col: usize) -> Color {
        (self.0)(value, index, row, col)
    }
}

/// A fully populated RGBA image, row 0 at the top.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// RGBA bytes, `width * height * 4` long.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Pixel at image `row` (0 = top) and `col`.
    pub fn pixel(&self, row: usize, col: usize) -> Option<Color> {
        if row >= self.height || col >= self.width {
            return None;
        }
        let i = (row * self.width + col) * CHANNELS;
        Some(Color::new(
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ))
    }

    /// Bytes of one image row.
    pub fn row(&self, row: usize) -> Option<&[u8]> {
        let stride = self.width * CHANNELS;
        self.data.get(row * stride..(row + 1) * stride)
    }

    /// Iterate pixels in image order.
    pub fn pixels(&self) -> impl Iterator<Item = Color> + '_ {
        self.data
            .chunks_exact(CHANNELS)
            .map(|c| Color::new(c[0], c[1], c[2], c[3]))
    }
}

impl fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}

/// Converts grids into pixel buffers using the configured resolvers.
pub struct Colorizer {
    options: LayerOptions,
    palette: Arc<Palette>,
    value_resolver: Box<dyn ValueResolver>,
    color_resolver: Option<Box<dyn ColorResolver>>,
}

impl Colorizer {
    /// Colorizer drawing its palette from the shared palette set.
    pub fn new(options: LayerOptions) -> Self {
        Self::with_palette_set(options, PaletteSet::shared())
    }

    pub fn with_palette_set(options: LayerOptions, palettes: &PaletteSet) -> Self {
        let palette = palettes.get(options.palette);
        Self {
            options,
            palette,
            value_resolver: Box::new(RawValue),
            color_resolver: None,
        }
    }

    /// Override palette lookup with a color function.
    pub fn with_color_fn<F>(self, color_fn: F) -> Self
    where
        F: Fn(u8, usize, usize, usize) -> Color + Send + Sync + 'static,
    {
        self.with_color_resolver(ColorFn(color_fn))
    }

    pub fn with_color_resolver(mut self, resolver: impl ColorResolver + 'static) -> Self {
        self.color_resolver = Some(Box::new(resolver));
        self
    }

    pub fn with_value_resolver(mut self, resolver: impl ValueResolver + 'static) -> Self {
        self.value_resolver = Box::new(resolver);
        self
    }

    pub fn options(&self) -> &LayerOptions {
        &self.options
    }

    pub fn palette(&self) -> &Arc<Palette> {
        &self.palette
    }

    /// True when a color function replaces palette lookup.
    pub fn has_custom_colors(&self) -> bool {
        self.color_resolver.is_some()
    }

    #[inline]
    pub fn resolve_value(&self, index: usize, row: usize, col: usize, data: &[i8]) -> u8 {
        self.value_resolver.resolve_value(index, row, col, data)
    }

    #[inline]
    pub fn resolve_color(&self, value: u8, index: usize, row: usize, col: usize) -> Color {
        match &self.color_resolver {
            Some(resolver) => resolver.resolve_color(value, index, row, col),
            None => self.palette.color(value),
        }
    }

    /// Colorize every cell of `grid` in a single pass.
    pub fn colorize(&self, grid: &OccupancyGrid) -> PixelBuffer {
        let width = grid.width();
        let height = grid.height();
        let data = grid.data();
        let mut pixels = vec![0u8; width * height * CHANNELS];

        for (row, out_row) in pixels.chunks_exact_mut(width * CHANNELS).enumerate() {
            let src_row = height - row - 1;
            for (col, out) in out_row.chunks_exact_mut(CHANNELS).enumerate() {
                let index = col + src_row * width;
                let value = self.resolve_value(index, src_row, col, data);
                let color = self.resolve_color(value, index, src_row, col);
                out.copy_from_slice(&color.to_array());
            }
        }

        tracing::debug!(
            width,
            height,
            palette = %self.options.palette,
            custom_colors = self.has_custom_colors(),
            "Colorized occupancy grid"
        );

        PixelBuffer {
            width,
            height,
            data: pixels,
        }
    }
}

impl Default for Colorizer {
    fn default() -> Self {
        Self::new(LayerOptions::default())
    }
}

impl fmt::Debug for Colorizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Colorizer")
            .field("options", &self.options)
            .field("custom_colors", &self.has_custom_colors())
            .finish()
    }
}
