//! Tests for the palette tables.

use grid_common::{Color, PaletteName};
use renderer::palette::{
    costmap_color, map_color, raw_color, Palette, PaletteSet, ILLEGAL_POSITIVE_COLOR, UNKNOWN_COLOR,
};

// ============================================================================
// raw
// ============================================================================

#[test]
fn test_raw_is_identity_grayscale() {
    let palette = Palette::raw();
    for v in 0..=255u8 {
        assert_eq!(palette.color(v), Color::new(v, v, v, 255), "value {}", v);
    }
}

#[test]
fn test_raw_last_entry_in_range() {
    // 255 is the highest index a cell can resolve to
    let palette = Palette::raw();
    assert_eq!(&palette.as_bytes()[1020..1024], &[255, 255, 255, 255]);
}

// ============================================================================
// map
// ============================================================================

#[test]
fn test_map_probability_band_is_gray_and_decreasing() {
    let palette = Palette::map();
    let mut previous: Option<u8> = None;
    for v in 0..=100u8 {
        let c = palette.color(v);
        assert_eq!(c.r, c.g, "value {}", v);
        assert_eq!(c.g, c.b, "value {}", v);
        assert_eq!(c.a, 255);
        if let Some(prev) = previous {
            assert!(c.r < prev, "gray level must drop at {}: {} >= {}", v, c.r, prev);
        }
        previous = Some(c.r);
    }
}

#[test]
fn test_map_bands() {
    for v in 101..=127u8 {
        assert_eq!(map_color(v), ILLEGAL_POSITIVE_COLOR);
    }
    for v in 128..=254u8 {
        let c = map_color(v);
        assert_eq!((c.r, c.b, c.a), (255, 0, 255));
    }
    assert_eq!(map_color(255), UNKNOWN_COLOR);
    assert_eq!(UNKNOWN_COLOR, Color::new(0x70, 0x89, 0x86, 255));
}

#[test]
fn test_map_negative_ramp_is_monotonic() {
    let greens: Vec<u8> = (128..=254u8).map(|v| map_color(v).g).collect();
    assert!(greens.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(greens.first(), Some(&0));
    assert_eq!(greens.last(), Some(&255));
}

#[test]
fn test_map_unknown_cell() {
    // -1 on the wire is 255 unsigned
    assert_eq!(Palette::map().color(-1i8 as u8), UNKNOWN_COLOR);
}

// ============================================================================
// costmap
// ============================================================================

#[test]
fn test_costmap_alpha() {
    let palette = Palette::costmap();
    for v in 0..=255u8 {
        let expected = if v == 0 { 0 } else { 255 };
        assert_eq!(palette.color(v).a, expected, "value {}", v);
    }
}

#[test]
fn test_costmap_ramp_blue_to_red() {
    for v in 1..=98u8 {
        let c = costmap_color(v);
        assert_eq!(c.g, 0);
        assert_eq!(c.r, (255.0 * v as f64 / 100.0) as u8);
        assert_eq!(c.b, (255.0 - 255.0 * v as f64 / 100.0) as u8);
    }
    assert!(costmap_color(1).b > costmap_color(1).r);
    assert!(costmap_color(98).r > costmap_color(98).b);
}

#[test]
fn test_costmap_shares_sentinel_bands_with_map() {
    for v in 101..=255u8 {
        assert_eq!(costmap_color(v), map_color(v), "value {}", v);
    }
}

// ============================================================================
// construction
// ============================================================================

#[test]
fn test_build_is_deterministic() {
    for name in PaletteName::ALL {
        let a = Palette::build(name);
        let b = Palette::build(name);
        assert_eq!(a.as_bytes(), b.as_bytes(), "palette {}", name);
    }
}

#[test]
fn test_shared_set_matches_fresh_build() {
    let shared = PaletteSet::shared();
    for name in PaletteName::ALL {
        assert_eq!(*shared.get(name), Palette::build(name));
    }
}

#[test]
fn test_unknown_name_falls_back_to_raw() {
    let set = PaletteSet::build();
    assert_eq!(set.by_name("bogus").as_bytes(), Palette::raw().as_bytes());
    assert_eq!(set.by_name("").as_bytes(), Palette::raw().as_bytes());
    assert_eq!(set.by_name("map").as_bytes(), Palette::map().as_bytes());
}

#[test]
fn test_from_fn_tabulates_rule() {
    let palette = Palette::from_fn(raw_color);
    assert_eq!(palette, Palette::raw());
}

#[test]
fn test_shared_set_is_built_once() {
    let a = PaletteSet::shared();
    let b = PaletteSet::shared();
    assert!(std::ptr::eq(a, b));
    assert!(std::sync::Arc::ptr_eq(&a.get(PaletteName::Map), &b.get(PaletteName::Map)));
}
