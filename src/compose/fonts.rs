use crate::foundation::core::NodeId;
use crate::foundation::error::{ShimmerError, ShimmerResult};
use crate::scene::host::SceneHost;
use crate::scene::model::{FontName, FontWeight, TextStyle};

/// Weights below this trigger auto-bold escalation.
pub const SEMIBOLD_THRESHOLD: u16 = 500;

/// Style names tried for one target weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoldCandidate {
    /// Numeric weight the styles stand for.
    pub weight: u16,
    /// Style names tried in order.
    pub styles: &'static [&'static str],
}

/// Try order: heaviest common weights first, then the mid weights.
pub const BOLD_CANDIDATES: &[BoldCandidate] = &[
    BoldCandidate {
        weight: 700,
        styles: &["Bold"],
    },
    BoldCandidate {
        weight: 800,
        styles: &["ExtraBold", "Extra Bold", "Extrabold"],
    },
    BoldCandidate {
        weight: 900,
        styles: &["Black", "Heavy"],
    },
    BoldCandidate {
        weight: 600,
        styles: &["SemiBold", "Semi Bold", "Semibold"],
    },
    BoldCandidate {
        weight: 500,
        styles: &["Medium"],
    },
];

/// What the resolver did to the source text's typography.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontResolution {
    /// Font loaded; no weight change requested or possible.
    Unchanged,
    /// Auto-bold skipped because the text mixes several weights.
    SkippedMixed,
    /// No bolder style of the family could be loaded.
    NoBolderStyle,
    /// The text was restyled to a bolder member of its family.
    Escalated {
        /// Bolder font now applied.
        font: FontName,
        /// Its numeric weight.
        weight: u16,
    },
}

/// Load the text's current font and, when asked, escalate it to a bolder style.
///
/// Loading the current font is mandatory and its failure is returned. Searching for a bolder
/// style is best-effort: every candidate that fails to load is skipped, and running out of
/// candidates leaves the text untouched.
#[tracing::instrument(skip(host))]
pub async fn resolve_font<H: SceneHost>(
    host: &mut H,
    text: NodeId,
    auto_bold: bool,
) -> ShimmerResult<FontResolution> {
    let info = host.snapshot(text)?;
    let TextStyle { font, weight } = info
        .text
        .ok_or_else(|| ShimmerError::selection(format!("node {text} is not a text node")))?;

    host.load_font(&font).await?;

    if !auto_bold {
        return Ok(FontResolution::Unchanged);
    }
    let current = match weight {
        FontWeight::Mixed => {
            tracing::debug!("mixed font weights; auto-bold skipped");
            return Ok(FontResolution::SkippedMixed);
        }
        FontWeight::Resolved(w) if w >= SEMIBOLD_THRESHOLD => return Ok(FontResolution::Unchanged),
        FontWeight::Resolved(w) => w,
    };

    for candidate in BOLD_CANDIDATES {
        for style in candidate.styles {
            let bolder = FontName::new(font.family.clone(), *style);
            match host.load_font(&bolder).await {
                Ok(()) => {
                    host.set_text_font(text, bolder.clone(), candidate.weight)?;
                    tracing::debug!(
                        family = %bolder.family,
                        style = %bolder.style,
                        from = current,
                        to = candidate.weight,
                        "font weight escalated"
                    );
                    return Ok(FontResolution::Escalated {
                        font: bolder,
                        weight: candidate.weight,
                    });
                }
                Err(err) => {
                    tracing::debug!(style = %style, error = %err, "bold candidate unavailable");
                }
            }
        }
    }

    tracing::info!(family = %font.family, "no bolder style available; keeping original weight");
    Ok(FontResolution::NoBolderStyle)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/fonts.rs"]
mod tests;
