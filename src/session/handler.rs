use crate::compose::pipeline::{ShimmerOutput, create_shimmer};
use crate::foundation::core::NodeId;
use crate::foundation::error::ShimmerResult;
use crate::scene::host::SceneHost;
use crate::scene::model::NodeType;
use crate::session::config::{PlacementMode, ShimmerConfig};
use crate::session::events::{CreateShimmerRequest, SelectionStatus};

/// Shown when nothing is selected.
pub const MSG_EMPTY_SELECTION: &str = "Please select some text first";
/// Shown when the selection holds a non-text node.
pub const MSG_NOT_TEXT: &str = "Please select text nodes only";
/// Shown when page mode gets more than one text.
pub const MSG_MULTIPLE: &str = "Please select a single text layer";
/// Shown when the pipeline fails.
pub const MSG_FAILED: &str = "Error creating shimmer effect";

/// Why a trigger was refused before any document mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionRejection {
    /// Nothing selected.
    Empty,
    /// A selected node is not text.
    NotText,
    /// More than one text in page mode.
    Multiple,
}

impl SelectionRejection {
    /// User-facing notification text.
    pub fn message(self) -> &'static str {
        match self {
            Self::Empty => MSG_EMPTY_SELECTION,
            Self::NotText => MSG_NOT_TEXT,
            Self::Multiple => MSG_MULTIPLE,
        }
    }
}

/// Result of handling one trigger event.
#[derive(Debug)]
pub enum RunOutcome {
    /// One output per processed text.
    Created(Vec<ShimmerOutput>),
    /// Refused before touching the document.
    Rejected(SelectionRejection),
    /// The pipeline failed part-way; nodes created so far stay in the document.
    Failed(String),
}

/// Text nodes the current selection allows the generator to run on.
///
/// Legacy mode accepts one or more text nodes; page mode requires exactly one.
pub fn validate_selection<H: SceneHost>(
    host: &H,
    mode: PlacementMode,
) -> Result<Vec<NodeId>, SelectionRejection> {
    let selection = host.selection();
    if selection.is_empty() {
        return Err(SelectionRejection::Empty);
    }
    let all_text = selection.iter().all(|id| {
        host.snapshot(*id)
            .is_ok_and(|info| info.node_type == NodeType::Text)
    });
    if !all_text {
        return Err(SelectionRejection::NotText);
    }
    if mode == PlacementMode::Page && selection.len() > 1 {
        return Err(SelectionRejection::Multiple);
    }
    Ok(selection)
}

/// Summary that drives the panel's trigger button.
pub fn selection_status<H: SceneHost>(host: &H, mode: PlacementMode) -> SelectionStatus {
    let text_count = host
        .selection()
        .iter()
        .filter(|id| {
            host.snapshot(**id)
                .is_ok_and(|info| info.node_type == NodeType::Text)
        })
        .count();
    SelectionStatus {
        has_valid_selection: validate_selection(host, mode).is_ok(),
        selection_count: text_count,
    }
}

/// Compute the selection summary and send it to the panel.
pub fn post_selection_status<H: SceneHost>(host: &mut H, mode: PlacementMode) -> SelectionStatus {
    let status = selection_status(host, mode);
    host.post_status(status);
    status
}

/// Handle the panel's create trigger end to end.
///
/// Selection problems are reported and leave the document untouched. Any pipeline failure is
/// logged, reported once with a generic message and ends the session without rollback.
#[tracing::instrument(skip(host, cfg))]
pub async fn handle_create_shimmer<H: SceneHost>(
    host: &mut H,
    request: CreateShimmerRequest,
    cfg: &ShimmerConfig,
) -> RunOutcome {
    let texts = match validate_selection(host, cfg.mode) {
        Ok(texts) => texts,
        Err(rejection) => {
            tracing::info!(?rejection, "selection rejected");
            host.notify(rejection.message(), true);
            return RunOutcome::Rejected(rejection);
        }
    };

    match run_all(host, &texts, request, cfg).await {
        Ok(outputs) => {
            host.notify(
                &format!("Created shimmer effect for {} text node(s)", outputs.len()),
                false,
            );
            host.close();
            RunOutcome::Created(outputs)
        }
        Err(err) => {
            tracing::error!(error = %err, "error creating shimmer effect");
            host.notify(MSG_FAILED, true);
            host.close();
            RunOutcome::Failed(err.to_string())
        }
    }
}

async fn run_all<H: SceneHost>(
    host: &mut H,
    texts: &[NodeId],
    request: CreateShimmerRequest,
    cfg: &ShimmerConfig,
) -> ShimmerResult<Vec<ShimmerOutput>> {
    let mut outputs = Vec::with_capacity(texts.len());
    for text in texts {
        outputs.push(create_shimmer(host, *text, request, cfg).await?);
    }
    Ok(outputs)
}

#[cfg(test)]
#[path = "../../tests/unit/session/handler.rs"]
mod tests;
