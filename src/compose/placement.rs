use crate::compose::packager::VariantGroup;
use crate::foundation::core::{NodeId, Point, Rect, Vec2};
use crate::foundation::error::{ShimmerError, ShimmerResult};
use crate::scene::host::SceneHost;
use crate::scene::model::{NodeType, RemovalOutcome};
use crate::session::config::ShimmerConfig;

/// The source text as it was before the pipeline touched the document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceText {
    /// Text node.
    pub id: NodeId,
    /// Its parent.
    pub parent: NodeId,
    /// Index among the parent's children.
    pub index: usize,
    /// Bounds in parent coordinates.
    pub bounds: Rect,
    /// Bounds in page coordinates.
    pub page_bounds: Rect,
}

impl SourceText {
    /// Read the text's position in the tree; fails for non-text nodes.
    pub fn capture<H: SceneHost>(host: &H, id: NodeId) -> ShimmerResult<Self> {
        let info = host.snapshot(id)?;
        if info.node_type != NodeType::Text {
            return Err(ShimmerError::selection(format!("node {id} is not a text node")));
        }
        let parent = info
            .parent
            .ok_or_else(|| ShimmerError::host(format!("text {id} has no parent")))?;
        let index = host
            .children(parent)?
            .iter()
            .position(|c| *c == id)
            .ok_or_else(|| ShimmerError::host(format!("text {id} is not a child of {parent}")))?;
        let offset = page_offset(host, parent)?;
        Ok(Self {
            id,
            parent,
            index,
            bounds: info.bounds,
            page_bounds: info.bounds + offset,
        })
    }
}

/// Translation from `node`'s local space to its page's space.
fn page_offset<H: SceneHost>(host: &H, node: NodeId) -> ShimmerResult<Vec2> {
    let mut offset = Vec2::ZERO;
    let mut cur = host.snapshot(node)?;
    while cur.node_type != NodeType::Page {
        offset += cur.bounds.origin().to_vec2();
        let parent = cur
            .parent
            .ok_or_else(|| ShimmerError::host(format!("node {} is detached", cur.id)))?;
        cur = host.snapshot(parent)?;
    }
    Ok(offset)
}

/// Outcome of looking up the target page by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageResolution {
    /// Target page.
    pub page: NodeId,
    /// Whether the lookup had to create it.
    pub created: bool,
}

/// First page named exactly `name`, or a new page with that name.
pub fn resolve_target_page<H: SceneHost>(host: &mut H, name: &str) -> ShimmerResult<PageResolution> {
    for page in host.pages() {
        if host.snapshot(page)?.name == name {
            return Ok(PageResolution {
                page,
                created: false,
            });
        }
    }
    let page = host.create_page()?;
    host.set_name(page, name)?;
    tracing::info!(page = %page, page_name = name, "created target page");
    Ok(PageResolution {
        page,
        created: true,
    })
}

/// Slot to the right of the page's right-most top-level node, aligned with that node's top.
/// An empty page yields the origin.
pub fn right_edge_slot<H: SceneHost>(
    host: &H,
    page: NodeId,
    exclude: NodeId,
    gap: f64,
) -> ShimmerResult<Point> {
    let mut rightmost: Option<Rect> = None;
    for child in host.children(page)? {
        if child == exclude {
            continue;
        }
        let b = host.snapshot(child)?.bounds;
        if rightmost.is_none_or(|r| b.x1 > r.x1) {
            rightmost = Some(b);
        }
    }
    Ok(match rightmost {
        Some(r) => Point::new(r.x1 + gap, r.y0),
        None => Point::ZERO,
    })
}

/// Remove a node that may already be gone. Only genuine host failures are returned.
pub fn remove_transient<H: SceneHost>(
    host: &mut H,
    id: NodeId,
    label: &str,
) -> ShimmerResult<RemovalOutcome> {
    let outcome = host.remove(id)?;
    if outcome == RemovalOutcome::AlreadyAbsent {
        tracing::debug!(node = %id, label, "already removed");
    }
    Ok(outcome)
}

/// Where the finished shimmer ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Page holding the variant set.
    pub page: NodeId,
    /// Start-variant instance substituted for the source text.
    pub instance: Option<NodeId>,
    /// Whether the source text was removed.
    pub text_removed: bool,
}

/// Legacy layout: group below the text on the current page, text removed, group selected.
#[tracing::instrument(skip(host, cfg))]
pub fn place_below_text<H: SceneHost>(
    host: &mut H,
    source: &SourceText,
    group: &VariantGroup,
    cfg: &ShimmerConfig,
) -> ShimmerResult<Placement> {
    let page = host.current_page();
    let b = source.page_bounds;
    host.set_position(group.group, Point::new(b.x0, b.y1 + cfg.below_text_gap))?;
    remove_transient(host, source.id, "source text")?;
    host.set_selection(&[group.group])?;
    host.focus_viewport(&[group.group]);
    Ok(Placement {
        page,
        instance: None,
        text_removed: true,
    })
}

/// Page layout: group moved onto the named target page; the text is either replaced by a
/// Start instance or left alone while the group is selected on the target page.
#[tracing::instrument(skip(host, cfg))]
pub fn place_on_target_page<H: SceneHost>(
    host: &mut H,
    source: &SourceText,
    group: &VariantGroup,
    cfg: &ShimmerConfig,
    replace_text: bool,
) -> ShimmerResult<Placement> {
    let original_page = host.current_page();
    let target = resolve_target_page(host, &cfg.target_page_name)?.page;

    let slot = right_edge_slot(host, target, group.group, cfg.page_gap)?;
    host.append_child(target, group.group)?;
    host.set_position(group.group, slot)?;

    if replace_text {
        let instance = host.create_instance(group.variants.start)?;
        let index = host
            .children(source.parent)?
            .iter()
            .position(|c| *c == source.id)
            .unwrap_or(source.index);
        host.insert_child(source.parent, index, instance)?;
        host.set_position(instance, source.bounds.origin())?;
        remove_transient(host, source.id, "source text")?;
        host.set_selection(&[instance])?;
        return Ok(Placement {
            page: target,
            instance: Some(instance),
            text_removed: true,
        });
    }

    host.set_current_page(target)?;
    host.set_selection(&[group.group])?;
    host.set_current_page(original_page)?;
    Ok(Placement {
        page: target,
        instance: None,
        text_removed: false,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/compose/placement.rs"]
mod tests;
