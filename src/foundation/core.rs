use std::fmt;

pub use kurbo::{Affine, BezPath, Point, Rect, Size, Vec2};

/// Stable handle of a node inside a host document.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Straight (non-premultiplied) RGB color with channels in `0..=1`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rgb {
    /// Red channel.
    pub r: f64,
    /// Green channel.
    pub g: f64,
    /// Blue channel.
    pub b: f64,
}

impl Rgb {
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    /// Color from channels in `0..=1`.
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Color from a `0xRRGGBB` literal.
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| f64::from((hex >> shift) & 0xff) / 255.0;
        Self::new(channel(16), channel(8), channel(0))
    }
}

/// Straight RGBA color with channels in `0..=1`, used by gradient stops.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rgba {
    /// Red channel.
    pub r: f64,
    /// Green channel.
    pub g: f64,
    /// Blue channel.
    pub b: f64,
    /// Alpha.
    pub a: f64,
}

impl Rgba {
    /// Color from channels in `0..=1`.
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// `rgb` with alpha `a`.
    pub const fn with_alpha(rgb: Rgb, a: f64) -> Self {
        Self::new(rgb.r, rgb.g, rgb.b, a)
    }
}

/// Color stop of a linear gradient.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GradientStop {
    /// Offset along the gradient axis, `0..=1`.
    pub position: f64,
    /// Color at this offset.
    pub color: Rgba,
}

/// Fill or stroke paint attached to a node.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Paint {
    /// Uniform color.
    Solid {
        /// Fill color.
        color: Rgb,
        /// Paint opacity in `0..=1`.
        opacity: f64,
    },
    /// Left-to-right gradient across the node's box.
    LinearGradient {
        /// Stops in ascending position order.
        stops: Vec<GradientStop>,
        /// Gradient-space transform relative to the node box.
        transform: Affine,
    },
}

impl Paint {
    /// Solid paint of `color` at `opacity`.
    pub fn solid(color: Rgb, opacity: f64) -> Self {
        Self::Solid { color, opacity }
    }
}

/// Outline applied to a node: paints, weight and optional dash pattern.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Stroke {
    /// Paints stacked along the outline.
    pub paints: Vec<Paint>,
    /// Line width.
    pub weight: f64,
    /// Alternating dash and gap lengths; empty for a solid line.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dash_pattern: Vec<f64>,
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
