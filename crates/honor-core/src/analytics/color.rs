// Impact normalization and color-scale sampling.
//
// Colors encode Impacto_Total relative to the range of the whole dataset, so
// the same value keeps the same color whatever filter is active. The color
// scale itself is injected through `ColorScale`, which keeps this module free
// of any rendering dependency.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use tracing::debug;

use crate::dataset::ImpactRange;

/// Normalized position used when the range collapses to a single value (or
/// the input is not a finite number).
pub const DEGENERATE_T: f64 = 0.5;

// ---------------------------------------------------------------------------
// Rgb
// ---------------------------------------------------------------------------

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Build from a `0xRRGGBB` literal.
    pub const fn from_hex(hex: u32) -> Self {
        Rgb {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Linear interpolation in RGB space, `t` in [0, 1].
    fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ---------------------------------------------------------------------------
// Color scales
// ---------------------------------------------------------------------------

/// A deterministic map from `t` in [0, 1] to a color.
pub trait ColorScale {
    fn sample(&self, t: f64) -> Rgb;
}

impl<F> ColorScale for F
where
    F: Fn(f64) -> Rgb,
{
    fn sample(&self, t: f64) -> Rgb {
        self(t)
    }
}

/// Evenly spaced color stops with linear interpolation between neighbours.
#[derive(Debug, Clone, Copy)]
pub struct GradientScale {
    stops: &'static [Rgb],
}

impl GradientScale {
    /// `stops` must hold at least two colors; fewer is rejected at compile
    /// time when used in a const.
    pub const fn new(stops: &'static [Rgb]) -> Self {
        assert!(stops.len() >= 2, "a gradient needs at least two color stops");
        GradientScale { stops }
    }
}

impl ColorScale for GradientScale {
    fn sample(&self, t: f64) -> Rgb {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { DEGENERATE_T };
        let segments = self.stops.len() - 1;
        let pos = t * segments as f64;
        let idx = (pos.floor() as usize).min(segments - 1);
        self.stops[idx].lerp(self.stops[idx + 1], pos - idx as f64)
    }
}

const TURBO_STOPS: [Rgb; 15] = [
    Rgb::from_hex(0x30123b),
    Rgb::from_hex(0x4145ab),
    Rgb::from_hex(0x4675ed),
    Rgb::from_hex(0x39a2fc),
    Rgb::from_hex(0x1bcfd4),
    Rgb::from_hex(0x24eca6),
    Rgb::from_hex(0x61fc6c),
    Rgb::from_hex(0xa4fc3b),
    Rgb::from_hex(0xd1e834),
    Rgb::from_hex(0xf3c63a),
    Rgb::from_hex(0xfe9b2d),
    Rgb::from_hex(0xf36315),
    Rgb::from_hex(0xd93806),
    Rgb::from_hex(0xb11901),
    Rgb::from_hex(0x7a0402),
];

const VIRIDIS_STOPS: [Rgb; 10] = [
    Rgb::from_hex(0x440154),
    Rgb::from_hex(0x482878),
    Rgb::from_hex(0x3e4989),
    Rgb::from_hex(0x31688e),
    Rgb::from_hex(0x26828e),
    Rgb::from_hex(0x1f9e89),
    Rgb::from_hex(0x35b779),
    Rgb::from_hex(0x6ece58),
    Rgb::from_hex(0xb5de2b),
    Rgb::from_hex(0xfde725),
];

pub const TURBO: GradientScale = GradientScale::new(&TURBO_STOPS);
pub const VIRIDIS: GradientScale = GradientScale::new(&VIRIDIS_STOPS);

/// Built-in scales selectable by name from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamedScale {
    #[default]
    Turbo,
    Viridis,
}

impl ColorScale for NamedScale {
    fn sample(&self, t: f64) -> Rgb {
        match self {
            NamedScale::Turbo => TURBO.sample(t),
            NamedScale::Viridis => VIRIDIS.sample(t),
        }
    }
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Position of `value` inside `range`, clamped to [0, 1].
///
/// A degenerate range (`max == min`) or a non-finite value yields
/// `DEGENERATE_T`.
pub fn normalize(value: f64, range: ImpactRange) -> f64 {
    if range.is_degenerate() || !value.is_finite() {
        return DEGENERATE_T;
    }
    ((value - range.min) / (range.max - range.min)).clamp(0.0, 1.0)
}

/// Maps impact values to colors against a fixed dataset-wide range.
#[derive(Debug, Clone, Copy)]
pub struct ColorMapper<S> {
    range: ImpactRange,
    scale: S,
}

impl<S: ColorScale> ColorMapper<S> {
    pub fn new(range: ImpactRange, scale: S) -> Self {
        if range.is_degenerate() {
            debug!(
                "impact range collapsed to {}; every player maps to t={}",
                range.min, DEGENERATE_T
            );
        }
        ColorMapper { range, scale }
    }

    pub fn normalize(&self, value: f64) -> f64 {
        normalize(value, self.range)
    }

    pub fn color_for(&self, value: f64) -> Rgb {
        self.scale.sample(self.normalize(value))
    }

    /// Batch form of `color_for`; each value goes through the same path.
    pub fn colors_for<I: IntoIterator<Item = f64>>(&self, values: I) -> Vec<Rgb> {
        values.into_iter().map(|v| self.color_for(v)).collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
