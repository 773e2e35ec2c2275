//! Per-vertex color palette
//!
//! Colors arrive as floating-point RGB rows in either the unit range
//! (`0.0..=1.0`) or the byte range (`0..=255`). They are quantized to 8 bits
//! per channel and deduplicated into a palette that the model document
//! exposes as a single color group.

use std::collections::BTreeMap;
use std::fmt;

/// An 8-bit-per-channel RGB color
///
/// Ordering is lexicographic over (red, green, blue), which is the order
/// palette entries are enumerated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Color {
    /// Create a new color
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Quantize a floating-point RGB row interpreted in `range`
    ///
    /// Channels are rounded half away from zero and saturated to `0..=255`.
    pub fn quantize(rgb: [f64; 3], range: ColorRange) -> Self {
        let scale = range.scale();
        let channel = |v: f64| (v * scale).round().clamp(0.0, 255.0) as u8;
        Self::new(channel(rgb[0]), channel(rgb[1]), channel(rgb[2]))
    }

    /// Six uppercase hex digits, `RRGGBB`
    pub fn hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.hex())
    }
}

/// Numeric domain of an input color array
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorRange {
    /// Channels in `0.0..=1.0`, scaled by 255
    Unit,
    /// Channels already in `0..=255`
    Byte,
}

impl ColorRange {
    /// Detect the domain of a whole color array
    ///
    /// If no channel anywhere in the array exceeds 1, the array is read as
    /// unit range. A very dark palette given in byte range (every channel 0
    /// or 1) is therefore read as unit range; callers with such data should
    /// pre-scale it.
    pub fn detect(colors: &[[f64; 3]]) -> Self {
        let max = colors
            .iter()
            .flatten()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        if max <= 1.0 {
            ColorRange::Unit
        } else {
            ColorRange::Byte
        }
    }

    fn scale(self) -> f64 {
        match self {
            ColorRange::Unit => 255.0,
            ColorRange::Byte => 1.0,
        }
    }
}

/// Deduplicated colors plus the per-vertex slot mapping into them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorPalette {
    colors: Vec<Color>,
    slots: Vec<usize>,
    range: ColorRange,
}

impl ColorPalette {
    /// Build a palette from one RGB row per vertex
    pub fn from_colors(rows: &[[f64; 3]]) -> Self {
        let range = ColorRange::detect(rows);
        let quantized: Vec<Color> = rows.iter().map(|&rgb| Color::quantize(rgb, range)).collect();

        let mut distinct: BTreeMap<Color, usize> =
            quantized.iter().map(|&color| (color, 0)).collect();
        for (slot, index) in distinct.values_mut().enumerate() {
            *index = slot;
        }

        let slots = quantized.iter().map(|color| distinct[color]).collect();
        let colors = distinct.into_keys().collect();

        Self {
            colors,
            slots,
            range,
        }
    }

    /// Distinct colors in palette order
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Palette slot of every vertex, in vertex order
    pub fn slots(&self) -> &[usize] {
        &self.slots
    }

    /// Palette slot of one vertex (0-based vertex index)
    pub fn slot(&self, vertex: usize) -> Option<usize> {
        self.slots.get(vertex).copied()
    }

    /// Resolved color of one vertex
    pub fn color_of(&self, vertex: usize) -> Option<Color> {
        self.slot(vertex).map(|slot| self.colors[slot])
    }

    /// Range the input was interpreted in
    pub fn range(&self) -> ColorRange {
        self.range
    }

    /// Number of distinct colors
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// True when the palette holds no colors
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}
