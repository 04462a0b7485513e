use crate::compose::container::ContainerFrame;
use crate::compose::plan::ShimmerPlan;
use crate::compose::transitions::{ShimmerState, StateNodes};
use crate::foundation::core::NodeId;
use crate::foundation::error::ShimmerResult;
use crate::scene::host::SceneHost;

/// The merged pair of variant components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantGroup {
    /// Component set holding both variants.
    pub group: NodeId,
    /// Start and End components.
    pub variants: StateNodes,
}

/// Wrap each frame in its own named component and merge both into a styled variant set on
/// the current page.
#[tracing::instrument(skip(host, plan))]
pub fn package_variants<H: SceneHost>(
    host: &mut H,
    start: &ContainerFrame,
    end: &ContainerFrame,
    plan: &ShimmerPlan,
) -> ShimmerResult<VariantGroup> {
    let start_component = wrap(host, start.frame, plan, ShimmerState::Start)?;
    let end_component = wrap(host, end.frame, plan, ShimmerState::End)?;

    let page = host.current_page();
    let group = host.combine_as_variants(&[start_component, end_component], page)?;
    host.set_name(group, plan.group.name)?;
    host.set_stroke(group, plan.group.stroke.clone())?;
    host.set_fills(group, plan.group.fills.clone())?;

    Ok(VariantGroup {
        group,
        variants: StateNodes {
            start: start_component,
            end: end_component,
        },
    })
}

fn wrap<H: SceneHost>(
    host: &mut H,
    frame: NodeId,
    plan: &ShimmerPlan,
    state: ShimmerState,
) -> ShimmerResult<NodeId> {
    let spec = plan.variant(state);
    let component = host.create_component()?;
    host.set_name(component, spec.name)?;
    host.resize(component, spec.size)?;
    host.set_position(component, spec.position)?;
    host.append_child(component, frame)?;
    Ok(component)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/packager.rs"]
mod tests;
