//! Fixed value-to-color lookup tables for occupancy data.
//!
//! Every palette has 256 RGBA entries (1024 bytes) indexed by the cell value
//! reinterpreted as an unsigned byte, so `-1` (unknown) lands on entry 255
//! and negative values wrapped from signed bytes fill `128..=254`.
//!
//! Three schemes are provided:
//! - **raw**: identity grayscale
//! - **map**: occupancy probability grayscale (white = free, black = occupied)
//! - **costmap**: blue-to-red cost ramp with inscribed / lethal sentinels

use std::fmt;
use std::sync::Arc;

use grid_common::{Color, PaletteName};
use once_cell::sync::Lazy;

/// Number of entries in every palette.
pub const PALETTE_SIZE: usize = 256;

/// Bytes per palette entry.
pub const CHANNELS: usize = 4;

/// Color for unknown cells (`-1`, i.e. 255).
pub const UNKNOWN_COLOR: Color = Color::new(0x70, 0x89, 0x86, 255);

/// Color for values 101..=127, which are not valid occupancy percentages.
pub const ILLEGAL_POSITIVE_COLOR: Color = Color::GREEN;

/// Costmap value for cells inside the robot's inscribed radius.
pub const INSCRIBED_COST: u8 = 99;

/// Costmap value for cells that are certainly in collision.
pub const LETHAL_COST: u8 = 100;

/// Process-wide palette set, built on first use.
static SHARED_PALETTES: Lazy<PaletteSet> = Lazy::new(|| {
    tracing::debug!("Building shared palette set");
    PaletteSet::build()
});

/// A 256-entry RGBA lookup table.
#[derive(Clone, PartialEq, Eq)]
pub struct Palette {
    table: [u8; PALETTE_SIZE * CHANNELS],
}

impl Palette {
    /// Build the table for a named scheme.
    pub fn build(name: PaletteName) -> Self {
        match name {
            PaletteName::Raw => Self::raw(),
            PaletteName::Map => Self::map(),
            PaletteName::Costmap => Self::costmap(),
        }
    }

    pub fn raw() -> Self {
        Self::from_fn(raw_color)
    }

    pub fn map() -> Self {
        Self::from_fn(map_color)
    }

    pub fn costmap() -> Self {
        Self::from_fn(costmap_color)
    }

    /// Tabulate an arbitrary value-to-color rule.
    pub fn from_fn(rule: impl Fn(u8) -> Color) -> Self {
        let mut table = [0u8; PALETTE_SIZE * CHANNELS];
        for (value, entry) in table.chunks_exact_mut(CHANNELS).enumerate() {
            entry.copy_from_slice(&rule(value as u8).to_array());
        }
        Self { table }
    }

    /// Color for an unsigned cell value.
    #[inline]
    pub fn color(&self, value: u8) -> Color {
        let i = value as usize * CHANNELS;
        Color::new(
            self.table[i],
            self.table[i + 1],
            self.table[i + 2],
            self.table[i + 3],
        )
    }

    /// Raw table bytes, RGBA interleaved.
    pub fn as_bytes(&self) -> &[u8] {
        &self.table
    }

    /// Iterate entries in value order.
    pub fn colors(&self) -> impl Iterator<Item = Color> + '_ {
        self.table
            .chunks_exact(CHANNELS)
            .map(|c| Color::new(c[0], c[1], c[2], c[3]))
    }
}

impl fmt::Debug for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Palette")
            .field("entries", &PALETTE_SIZE)
            .field("first", &self.color(0))
            .field("last", &self.color(255))
            .finish()
    }
}

/// Identity grayscale: `v -> (v, v, v, 255)`.
pub fn raw_color(value: u8) -> Color {
    Color::gray(value)
}

/// Occupancy probability grayscale with sentinel bands.
pub fn map_color(value: u8) -> Color {
    match value {
        0..=100 => Color::gray((255.0 - 255.0 * value as f64 / 100.0) as u8),
        101..=127 => ILLEGAL_POSITIVE_COLOR,
        128..=254 => illegal_negative_color(value),
        255 => UNKNOWN_COLOR,
    }
}

/// Cost visualization: free space is transparent, costs ramp blue to red.
pub fn costmap_color(value: u8) -> Color {
    match value {
        0 => Color::transparent(),
        1..=98 => {
            let v = value as f64;
            Color::new(
                (255.0 * v / 100.0) as u8,
                0,
                (255.0 - 255.0 * v / 100.0) as u8,
                255,
            )
        }
        INSCRIBED_COST => Color::CYAN,
        LETHAL_COST => Color::YELLOW,
        101..=127 => ILLEGAL_POSITIVE_COLOR,
        128..=254 => illegal_negative_color(value),
        255 => UNKNOWN_COLOR,
    }
}

/// Red-to-yellow ramp over 128..=254 (negative signed values other than -1).
fn illegal_negative_color(value: u8) -> Color {
    let t = (value - 128) as f64;
    Color::new(255, (255.0 * t / (254.0 - 128.0)) as u8, 0, 255)
}

/// All named palettes, built eagerly and shared read-only.
#[derive(Debug, Clone)]
pub struct PaletteSet {
    raw: Arc<Palette>,
    map: Arc<Palette>,
    costmap: Arc<Palette>,
}

impl PaletteSet {
    pub fn build() -> Self {
        Self {
            raw: Arc::new(Palette::raw()),
            map: Arc::new(Palette::map()),
            costmap: Arc::new(Palette::costmap()),
        }
    }

    /// Process-wide set, built on first use.
    pub fn shared() -> &'static PaletteSet {
        &SHARED_PALETTES
    }

    pub fn get(&self, name: PaletteName) -> Arc<Palette> {
        match name {
            PaletteName::Raw => Arc::clone(&self.raw),
            PaletteName::Map => Arc::clone(&self.map),
            PaletteName::Costmap => Arc::clone(&self.costmap),
        }
    }

    /// Lookup by string; unknown names resolve to `raw`.
    pub fn by_name(&self, name: &str) -> Arc<Palette> {
        self.get(PaletteName::from_name(name))
    }
}

impl Default for PaletteSet {
    fn default() -> Self {
        Self::build()
    }
}
