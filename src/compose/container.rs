use crate::compose::geometry::Layers;
use crate::compose::plan::{ContainerSpec, ShimmerPlan};
use crate::compose::transitions::ShimmerState;
use crate::foundation::core::{NodeId, Point};
use crate::foundation::error::{ShimmerError, ShimmerResult};
use crate::scene::host::SceneHost;

/// A built clipping frame and its three children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerFrame {
    /// Clipping frame.
    pub frame: NodeId,
    /// Hollow glyph mask.
    pub mask: NodeId,
    /// Translucent backdrop.
    pub backdrop: NodeId,
    /// Sweeping gradient.
    pub gradient: NodeId,
}

impl ContainerFrame {
    /// Children in z-order, back to front.
    pub fn layers(&self) -> [NodeId; 3] {
        [self.mask, self.backdrop, self.gradient]
    }
}

/// Stack the layers into a clipping frame laid out for the Start state.
///
/// The frame starts at the glyph origin, then every child is re-rooted to frame-local
/// coordinates and the frame itself moves to (0,0).
#[tracing::instrument(skip(host, plan))]
pub fn assemble_start<H: SceneHost>(
    host: &mut H,
    layers: Layers,
    origin: Point,
    plan: &ShimmerPlan,
) -> ShimmerResult<ContainerFrame> {
    let spec = plan.container(ShimmerState::Start);

    let frame = host.create_frame()?;
    host.set_name(frame, spec.name)?;
    host.resize(frame, spec.size)?;
    host.set_position(frame, origin)?;
    host.set_clips_content(frame, true)?;
    host.set_fills(frame, Vec::new())?;

    let built = ContainerFrame {
        frame,
        mask: layers.mask,
        backdrop: layers.backdrop,
        gradient: layers.gradient,
    };
    for layer in built.layers() {
        host.append_child(frame, layer)?;
    }

    host.set_position(frame, Point::ZERO)?;
    apply_layout(host, &built, &spec)?;
    Ok(built)
}

/// Clone the finished Start frame and move only the clone's gradient to the End position.
#[tracing::instrument(skip(host, plan))]
pub fn clone_end<H: SceneHost>(
    host: &mut H,
    start: &ContainerFrame,
    plan: &ShimmerPlan,
) -> ShimmerResult<ContainerFrame> {
    let copies = host.clone_subtree(start.frame)?;
    let lookup = |original: NodeId| {
        copies.get(original).ok_or_else(|| {
            ShimmerError::host(format!("clone of {} is missing {original}", start.frame))
        })
    };
    let end = ContainerFrame {
        frame: lookup(start.frame)?,
        mask: lookup(start.mask)?,
        backdrop: lookup(start.backdrop)?,
        gradient: lookup(start.gradient)?,
    };

    let spec = plan.container(ShimmerState::End);
    host.set_name(end.frame, spec.name)?;
    host.set_position(end.frame, Point::ZERO)?;
    host.set_position(end.gradient, spec.layers[2].position)?;
    Ok(end)
}

fn apply_layout<H: SceneHost>(
    host: &mut H,
    built: &ContainerFrame,
    spec: &ContainerSpec,
) -> ShimmerResult<()> {
    for (node, layer) in built.layers().into_iter().zip(&spec.layers) {
        host.set_position(node, layer.position)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/compose/container.rs"]
mod tests;
