use crate::compose::plan::{
    HOLLOW_TEXT_NAME, LayerSpec, ShimmerPlan, TEXT_COPY_NAME, TEXT_VECTOR_NAME,
};
use crate::compose::placement::remove_transient;
use crate::compose::transitions::ShimmerState;
use crate::foundation::core::{NodeId, Point, Size};
use crate::foundation::error::{ShimmerError, ShimmerResult};
use crate::scene::host::SceneHost;

/// Vector snapshot of the source glyphs plus the mask cloned from it.
///
/// `text_copy` and `vector` are transient and must be removed once the shimmer is built;
/// flatten usually consumes `text_copy` already.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphCapture {
    /// Renamed clone of the source text.
    pub text_copy: NodeId,
    /// Flattened outlines.
    pub vector: NodeId,
    /// Clone of the outlines that becomes the mask layer.
    pub mask: NodeId,
    /// Mask origin in its parent's coordinates, as measured after flattening.
    pub origin: Point,
    /// Measured glyph box.
    pub size: Size,
}

/// Clone the text, flatten the clone into paths and clone the paths into the mask.
///
/// Geometry is measured once here and reused for both states. If a step fails after the
/// text was cloned, the partial snapshot is removed before the error is returned.
#[tracing::instrument(skip(host))]
pub fn capture_glyphs<H: SceneHost>(host: &mut H, text: NodeId) -> ShimmerResult<GlyphCapture> {
    let text_copy = host
        .clone_subtree(text)?
        .root
        .ok_or_else(|| ShimmerError::host(format!("cloning {text} produced no node")))?;

    let vector = match flatten_copy(host, text_copy) {
        Ok(vector) => vector,
        Err(err) => return Err(release_partial(host, &[text_copy], err)),
    };
    let mask = match clone_mask(host, vector) {
        Ok(mask) => mask,
        Err(err) => return Err(release_partial(host, &[text_copy, vector], err)),
    };

    let bounds = match host.snapshot(mask) {
        Ok(info) => info.bounds,
        Err(err) => return Err(release_partial(host, &[text_copy, vector, mask], err)),
    };
    tracing::debug!(width = bounds.width(), height = bounds.height(), "glyphs measured");
    Ok(GlyphCapture {
        text_copy,
        vector,
        mask,
        origin: bounds.origin(),
        size: bounds.size(),
    })
}

fn flatten_copy<H: SceneHost>(host: &mut H, text_copy: NodeId) -> ShimmerResult<NodeId> {
    host.set_name(text_copy, TEXT_COPY_NAME)?;
    host.flatten(text_copy)
}

fn clone_mask<H: SceneHost>(host: &mut H, vector: NodeId) -> ShimmerResult<NodeId> {
    host.set_name(vector, TEXT_VECTOR_NAME)?;
    let mask = host
        .clone_subtree(vector)?
        .root
        .ok_or_else(|| ShimmerError::host(format!("cloning {vector} produced no node")))?;
    host.set_name(mask, HOLLOW_TEXT_NAME)?;
    Ok(mask)
}

/// Remove the transient nodes of an aborted capture and hand back the original error.
fn release_partial<H: SceneHost>(
    host: &mut H,
    nodes: &[NodeId],
    err: ShimmerError,
) -> ShimmerError {
    for node in nodes {
        if let Err(cleanup) = remove_transient(host, *node, "partial glyph capture") {
            tracing::error!(node = %node, error = %cleanup, "failed to release partial capture");
        }
    }
    err
}

/// The three container layers, not yet parented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layers {
    /// Hollow glyph mask.
    pub mask: NodeId,
    /// Backdrop rectangle.
    pub backdrop: NodeId,
    /// Gradient rectangle.
    pub gradient: NodeId,
}

/// Turn the captured glyphs into the mask layer and create the backdrop and gradient beside it.
///
/// Each node receives its Start-state [`LayerSpec`], positioned relative to the glyph origin
/// until the container re-roots it.
#[tracing::instrument(skip(host, plan))]
pub fn build_layers<H: SceneHost>(
    host: &mut H,
    capture: &GlyphCapture,
    plan: &ShimmerPlan,
) -> ShimmerResult<Layers> {
    let spec = plan.container(ShimmerState::Start);
    let [mask_spec, backdrop_spec, gradient_spec] = &spec.layers;

    let mask = capture.mask;
    apply_layer(host, mask, mask_spec, capture.origin)?;

    let backdrop = host.create_rectangle()?;
    apply_layer(host, backdrop, backdrop_spec, capture.origin)?;

    let gradient = host.create_rectangle()?;
    apply_layer(host, gradient, gradient_spec, capture.origin)?;

    Ok(Layers {
        mask,
        backdrop,
        gradient,
    })
}

fn apply_layer<H: SceneHost>(
    host: &mut H,
    node: NodeId,
    layer: &LayerSpec,
    origin: Point,
) -> ShimmerResult<()> {
    host.set_name(node, layer.name)?;
    host.resize(node, layer.size)?;
    host.set_position(node, origin + layer.position.to_vec2())?;
    host.set_fills(node, layer.fills.clone())?;
    host.set_mask(node, layer.is_mask)?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/compose/geometry.rs"]
mod tests;
