use crate::compose::container::{ContainerFrame, assemble_start, clone_end};
use crate::compose::fonts::{FontResolution, resolve_font};
use crate::compose::geometry::{GlyphCapture, build_layers, capture_glyphs};
use crate::compose::packager::{VariantGroup, package_variants};
use crate::compose::placement::{
    Placement, SourceText, place_below_text, place_on_target_page, remove_transient,
};
use crate::compose::plan::ShimmerPlan;
use crate::compose::transitions::wire_transitions;
use crate::foundation::core::NodeId;
use crate::foundation::error::ShimmerResult;
use crate::scene::host::SceneHost;
use crate::session::config::{PlacementMode, ShimmerConfig};
use crate::session::events::CreateShimmerRequest;

/// Handles to everything one pipeline run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ShimmerOutput {
    /// Source text as captured before the run.
    pub source: SourceText,
    /// Font decision.
    pub font: FontResolution,
    /// Plan the stages applied.
    pub plan: ShimmerPlan,
    /// Start container.
    pub start: ContainerFrame,
    /// End container.
    pub end: ContainerFrame,
    /// Variant set.
    pub variants: VariantGroup,
    /// Final placement.
    pub placement: Placement,
}

/// Turn one text node into a looping shimmer variant group.
///
/// Steps run strictly in order, each awaiting the previous one. A failure aborts the rest and
/// leaves already-created nodes in place; the transient glyph snapshot is removed either way.
#[tracing::instrument(skip(host, cfg))]
pub async fn create_shimmer<H: SceneHost>(
    host: &mut H,
    text: NodeId,
    request: CreateShimmerRequest,
    cfg: &ShimmerConfig,
) -> ShimmerResult<ShimmerOutput> {
    cfg.validate()?;
    let source = SourceText::capture(host, text)?;
    let font = resolve_font(host, text, request.auto_font_weight).await?;

    let capture = capture_glyphs(host, text)?;
    let built = build_from_capture(host, &source, &capture, request, cfg).await;
    let cleaned = release_capture(host, &capture);

    let (plan, start, end, variants, placement) = built?;
    cleaned?;
    tracing::info!(group = %variants.group, page = %placement.page, "shimmer created");
    Ok(ShimmerOutput {
        source,
        font,
        plan,
        start,
        end,
        variants,
        placement,
    })
}

type Built = (
    ShimmerPlan,
    ContainerFrame,
    ContainerFrame,
    VariantGroup,
    Placement,
);

async fn build_from_capture<H: SceneHost>(
    host: &mut H,
    source: &SourceText,
    capture: &GlyphCapture,
    request: CreateShimmerRequest,
    cfg: &ShimmerConfig,
) -> ShimmerResult<Built> {
    let plan = ShimmerPlan::new(capture.size, cfg)?;
    let layers = build_layers(host, capture, &plan)?;
    let start = assemble_start(host, layers, capture.origin, &plan)?;
    let end = clone_end(host, &start, &plan)?;
    let variants = package_variants(host, &start, &end, &plan)?;
    wire_transitions(host, variants.variants, &plan.rules).await?;

    let placement = match cfg.mode {
        PlacementMode::Legacy => place_below_text(host, source, &variants, cfg)?,
        PlacementMode::Page => {
            place_on_target_page(host, source, &variants, cfg, request.replace_text)?
        }
    };
    Ok((plan, start, end, variants, placement))
}

fn release_capture<H: SceneHost>(host: &mut H, capture: &GlyphCapture) -> ShimmerResult<()> {
    remove_transient(host, capture.text_copy, "text copy")?;
    remove_transient(host, capture.vector, "text vector")?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/compose/pipeline.rs"]
mod tests;
