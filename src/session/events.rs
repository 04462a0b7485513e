use serde::{Deserialize, Serialize};

/// Inbound trigger from the UI panel.
///
/// The legacy panel only sends `autoFontWeight`; `replaceText` then defaults to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShimmerRequest {
    /// Escalate light text to a bold style.
    pub auto_font_weight: bool,
    /// Substitute an instance for the source text (page mode).
    #[serde(default)]
    pub replace_text: bool,
}

/// Outbound selection summary, re-emitted on every selection change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionStatus {
    /// Whether a trigger would be accepted now.
    pub has_valid_selection: bool,
    /// Selected text nodes.
    pub selection_count: usize,
}

#[cfg(test)]
#[path = "../../tests/unit/session/events.rs"]
mod tests;
