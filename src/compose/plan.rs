//! Pure description of a shimmer: layer geometry, variant layout, group styling and the
//! transition pair. Nothing here touches a document; the assembler stages apply it.

use crate::compose::transitions::{ShimmerState, TransitionRule, shimmer_rules};
use crate::foundation::core::{Affine, GradientStop, Paint, Point, Rgb, Rgba, Size, Stroke};
use crate::foundation::error::{ShimmerError, ShimmerResult};
use crate::session::config::ShimmerConfig;

/// Transient clone of the source text.
pub const TEXT_COPY_NAME: &str = "Text Copy";
/// Transient flattened outlines.
pub const TEXT_VECTOR_NAME: &str = "Text Vector";
/// Clipping frame of each variant.
pub const CONTAINER_NAME: &str = "Container";
/// Mask layer.
pub const HOLLOW_TEXT_NAME: &str = "Hollow Text";
/// Backdrop layer.
pub const BACKDROP_NAME: &str = "Background";
/// Gradient layer.
pub const GRADIENT_NAME: &str = "Shimmer Gradient";
/// Start variant component.
pub const START_VARIANT_NAME: &str = "Shimmer Start";
/// End variant component.
pub const END_VARIANT_NAME: &str = "Shimmer End";
/// Variant set.
pub const GROUP_NAME: &str = "Shimmer Effect";

/// Accent color marking generated groups in the document outline.
pub const MARKER_COLOR_HEX: u32 = 0x9747FF;
/// Dash and gap lengths of the marker stroke.
pub const MARKER_DASH_PATTERN: [f64; 2] = [8.0, 4.0];
/// Marker stroke width.
pub const MARKER_STROKE_WEIGHT: f64 = 2.0;
/// Opacity of the marker fill.
pub const MARKER_FILL_OPACITY: f64 = 0.3;

/// One child of a container frame, in frame-local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerSpec {
    /// Layer name.
    pub name: &'static str,
    /// Offset from the container origin.
    pub position: Point,
    /// Layer size.
    pub size: Size,
    /// Fill paints.
    pub fills: Vec<Paint>,
    /// Whether the layer masks the ones above it.
    pub is_mask: bool,
}

/// Clipping frame holding mask, backdrop and gradient (back to front).
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerSpec {
    /// Frame name.
    pub name: &'static str,
    /// Frame size, equal to the glyph box.
    pub size: Size,
    /// Mask, backdrop and gradient.
    pub layers: [LayerSpec; 3],
}

/// One variant component inside the group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariantSpec {
    /// State the variant shows.
    pub state: ShimmerState,
    /// Component name.
    pub name: &'static str,
    /// Position inside the group.
    pub position: Point,
    /// Component size.
    pub size: Size,
}

/// Name and marker styling of the variant set.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupStyle {
    /// Group name.
    pub name: &'static str,
    /// Dashed marker outline.
    pub stroke: Stroke,
    /// Tinted marker fill.
    pub fills: Vec<Paint>,
}

/// Everything needed to build one shimmer from a measured glyph box.
#[derive(Debug, Clone, PartialEq)]
pub struct ShimmerPlan {
    /// Measured glyph box.
    pub size: Size,
    /// Start and End, in that order.
    pub variants: [VariantSpec; 2],
    /// Variant set styling.
    pub group: GroupStyle,
    /// Sweep and reset rules.
    pub rules: [TransitionRule; 2],
    backdrop_fill: Paint,
}

impl ShimmerPlan {
    /// Plan a shimmer for glyphs measured at `size`.
    pub fn new(size: Size, cfg: &ShimmerConfig) -> ShimmerResult<Self> {
        if !(size.width.is_finite() && size.height.is_finite())
            || size.width <= 0.0
            || size.height <= 0.0
        {
            return Err(ShimmerError::validation(format!(
                "glyph box must be positive and finite, got {}x{}",
                size.width, size.height
            )));
        }
        cfg.validate()?;

        let marker = Rgb::from_hex(MARKER_COLOR_HEX);
        Ok(Self {
            size,
            variants: [
                VariantSpec {
                    state: ShimmerState::Start,
                    name: START_VARIANT_NAME,
                    position: Point::ZERO,
                    size,
                },
                VariantSpec {
                    state: ShimmerState::End,
                    name: END_VARIANT_NAME,
                    position: Point::new(cfg.variant_spacing, 0.0),
                    size,
                },
            ],
            group: GroupStyle {
                name: GROUP_NAME,
                stroke: Stroke {
                    paints: vec![Paint::solid(marker, 1.0)],
                    weight: MARKER_STROKE_WEIGHT,
                    dash_pattern: MARKER_DASH_PATTERN.to_vec(),
                },
                fills: vec![
                    Paint::solid(Rgb::WHITE, 1.0),
                    Paint::solid(marker, MARKER_FILL_OPACITY),
                ],
            },
            rules: shimmer_rules(),
            backdrop_fill: Paint::solid(cfg.backdrop_color, cfg.backdrop_opacity),
        })
    }

    /// Gradient x (frame-local) for `state`: one full width outside either edge.
    pub fn gradient_x(&self, state: ShimmerState) -> f64 {
        match state {
            ShimmerState::Start => -self.size.width,
            ShimmerState::End => self.size.width,
        }
    }

    /// Opaque white; only the mask's alpha matters.
    pub fn mask_fills(&self) -> Vec<Paint> {
        vec![Paint::solid(Rgb::WHITE, 1.0)]
    }

    /// Translucent backdrop paint.
    pub fn backdrop_fills(&self) -> Vec<Paint> {
        vec![self.backdrop_fill.clone()]
    }

    /// Transparent -> opaque white -> transparent, left to right.
    pub fn gradient_fills(&self) -> Vec<Paint> {
        let clear = Rgba::with_alpha(Rgb::WHITE, 0.0);
        let opaque = Rgba::with_alpha(Rgb::WHITE, 1.0);
        vec![Paint::LinearGradient {
            stops: vec![
                GradientStop {
                    position: 0.0,
                    color: clear,
                },
                GradientStop {
                    position: 0.5,
                    color: opaque,
                },
                GradientStop {
                    position: 1.0,
                    color: clear,
                },
            ],
            transform: Affine::IDENTITY,
        }]
    }

    /// Container contents for `state`; the states differ only in the gradient's x.
    pub fn container(&self, state: ShimmerState) -> ContainerSpec {
        let layer = |name, position, fills, is_mask| LayerSpec {
            name,
            position,
            size: self.size,
            fills,
            is_mask,
        };
        ContainerSpec {
            name: CONTAINER_NAME,
            size: self.size,
            layers: [
                layer(HOLLOW_TEXT_NAME, Point::ZERO, self.mask_fills(), true),
                layer(BACKDROP_NAME, Point::ZERO, self.backdrop_fills(), false),
                layer(
                    GRADIENT_NAME,
                    Point::new(self.gradient_x(state), 0.0),
                    self.gradient_fills(),
                    false,
                ),
            ],
        }
    }

    /// Spec of the variant showing `state`.
    pub fn variant(&self, state: ShimmerState) -> &VariantSpec {
        match state {
            ShimmerState::Start => &self.variants[0],
            ShimmerState::End => &self.variants[1],
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/plan.rs"]
mod tests;
