use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgb;
use crate::foundation::error::{ShimmerError, ShimmerResult};

/// Page name used as the namespace for generated shimmer components.
pub const DEFAULT_TARGET_PAGE: &str = "Shimmer Components";

/// Where generated variant groups end up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementMode {
    /// Below the source text on the current page; the source text is removed.
    Legacy,
    /// On a dedicated page, to the right of existing content.
    #[default]
    Page,
}

/// Generator options. Every field has a default, so partial JSON files are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShimmerConfig {
    /// Placement strategy for the finished group.
    pub mode: PlacementMode,
    /// Exact, case-sensitive name of the page that collects generated groups.
    pub target_page_name: String,
    /// Vertical gap between the source text and the group in legacy mode.
    pub below_text_gap: f64,
    /// Horizontal gap between existing page content and the group in page mode.
    pub page_gap: f64,
    /// Horizontal offset of the End variant relative to the Start variant.
    pub variant_spacing: f64,
    /// Backdrop color behind the hollow glyphs.
    pub backdrop_color: Rgb,
    /// Backdrop opacity in `0..=1`.
    pub backdrop_opacity: f64,
}

impl Default for ShimmerConfig {
    fn default() -> Self {
        Self {
            mode: PlacementMode::Page,
            target_page_name: DEFAULT_TARGET_PAGE.to_string(),
            below_text_gap: 20.0,
            page_gap: 100.0,
            variant_spacing: 200.0,
            backdrop_color: Rgb::new(0.9, 0.9, 0.9),
            backdrop_opacity: 0.5,
        }
    }
}

impl ShimmerConfig {
    /// Reject an empty page name, negative gaps and an out-of-range opacity.
    pub fn validate(&self) -> ShimmerResult<()> {
        if self.target_page_name.is_empty() {
            return Err(ShimmerError::validation("target_page_name must be non-empty"));
        }
        for (name, v) in [
            ("below_text_gap", self.below_text_gap),
            ("page_gap", self.page_gap),
            ("variant_spacing", self.variant_spacing),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(ShimmerError::validation(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.backdrop_opacity) {
            return Err(ShimmerError::validation(
                "backdrop_opacity must be within 0..=1",
            ));
        }
        let c = self.backdrop_color;
        if [c.r, c.g, c.b].iter().any(|v| !(0.0..=1.0).contains(v)) {
            return Err(ShimmerError::validation(
                "backdrop_color channels must be within 0..=1",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/config.rs"]
mod tests;
