use std::collections::{BTreeMap, BTreeSet};

use kurbo::Shape as _;
use serde::{Deserialize, Serialize};

use crate::foundation::core::{BezPath, NodeId, Paint, Point, Rect, Rgb, Size, Stroke};
use crate::foundation::error::{ShimmerError, ShimmerResult};
use crate::scene::host::SceneHost;
use crate::scene::model::{
    Action, CloneMap, FontName, FontWeight, Node, NodeInfo, NodeKind, NodeType, Reaction,
    RemovalOutcome, TextProps, TextStyle, Trigger,
};
use crate::session::events::SelectionStatus;

const DEFAULT_NODE_SIZE: f64 = 100.0;
const DEFAULT_SHAPE_FILL: Rgb = Rgb::new(0.85, 0.85, 0.85);

/// User-facing message recorded by [`Document::notify`](SceneHost::notify).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Text shown to the user.
    pub message: String,
    /// Whether it was shown as an error.
    pub is_error: bool,
}

/// In-memory design document implementing [`SceneHost`].
///
/// Nodes live in an id-indexed arena; pages are root nodes with their own selection. The
/// document enforces the host rules the generator depends on (font loading before text
/// restyling, flatten consuming its input, variant sets only over components) and records the
/// side channels (notifications, status events, viewport focus, session close) for inspection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    nodes: BTreeMap<NodeId, Node>,
    next_id: u32,
    pages: Vec<NodeId>,
    current_page: NodeId,
    /// Installed font families and their style names.
    #[serde(default)]
    fonts: BTreeMap<String, BTreeSet<String>>,
    #[serde(skip)]
    loaded_fonts: BTreeSet<FontName>,
    #[serde(default)]
    notifications: Vec<Notification>,
    #[serde(default)]
    status_events: Vec<SelectionStatus>,
    #[serde(default)]
    viewport_focus: Vec<NodeId>,
    #[serde(default)]
    closed: bool,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document with a single empty page named `Page 1`.
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: BTreeMap::new(),
            next_id: 0,
            pages: Vec::new(),
            current_page: NodeId(0),
            fonts: BTreeMap::new(),
            loaded_fonts: BTreeSet::new(),
            notifications: Vec::new(),
            status_events: Vec::new(),
            viewport_focus: Vec::new(),
            closed: false,
        };
        doc.current_page = doc.add_page("Page 1");
        doc
    }

    /// Check structural consistency after deserialization.
    pub fn validate(&self) -> ShimmerResult<()> {
        if self.pages.is_empty() {
            return Err(ShimmerError::validation("document must have at least one page"));
        }
        if !self.pages.contains(&self.current_page) {
            return Err(ShimmerError::validation(format!(
                "current page {} is not a page",
                self.current_page
            )));
        }
        for (id, node) in &self.nodes {
            if node.id != *id {
                return Err(ShimmerError::validation(format!(
                    "node stored under {id} reports id {}",
                    node.id
                )));
            }
            if id.0 >= self.next_id {
                return Err(ShimmerError::validation(format!(
                    "node {id} is not below next_id {}",
                    self.next_id
                )));
            }
            for child in &node.children {
                let c = self.get(*child)?;
                if c.parent != Some(*id) {
                    return Err(ShimmerError::validation(format!(
                        "child {child} of {id} does not point back to its parent"
                    )));
                }
            }
            let is_page = matches!(node.kind, NodeKind::Page { .. });
            if is_page != self.pages.contains(id) {
                return Err(ShimmerError::validation(format!(
                    "page list and node kind disagree for {id}"
                )));
            }
            if !is_page && node.parent.is_none() {
                return Err(ShimmerError::validation(format!("node {id} has no parent")));
            }
            if let Some(parent) = node.parent {
                let listed = self
                    .nodes
                    .get(&parent)
                    .is_some_and(|p| p.children.contains(id));
                if !listed {
                    return Err(ShimmerError::validation(format!(
                        "parent {parent} of {id} does not list it as a child"
                    )));
                }
            }
        }
        for page in &self.pages {
            if !self.nodes.contains_key(page) {
                return Err(ShimmerError::validation(format!("page {page} does not exist")));
            }
        }
        self.validate_ancestry()?;
        for page in &self.pages {
            for selected in self.page_selection(*page) {
                if selected == *page || self.page_of(selected) != Some(*page) {
                    return Err(ShimmerError::validation(format!(
                        "selection of page {page} holds {selected}, which is not on that page"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Every parent chain must end at a page within `nodes.len()` steps.
    fn validate_ancestry(&self) -> ShimmerResult<()> {
        let limit = self.nodes.len();
        for (id, node) in &self.nodes {
            let mut cur = node;
            let mut steps = 0;
            while let Some(parent) = cur.parent {
                steps += 1;
                if steps > limit {
                    return Err(ShimmerError::validation(format!(
                        "node {id} is part of a parent cycle"
                    )));
                }
                cur = self.nodes.get(&parent).ok_or_else(|| {
                    ShimmerError::validation(format!("parent {parent} of {id} does not exist"))
                })?;
            }
            if !matches!(cur.kind, NodeKind::Page { .. }) {
                return Err(ShimmerError::validation(format!(
                    "node {id} is not attached to a page"
                )));
            }
        }
        Ok(())
    }

    /// Register a font family with the given style names.
    pub fn install_font(&mut self, family: &str, styles: &[&str]) {
        let entry = self.fonts.entry(family.to_string()).or_default();
        entry.extend(styles.iter().map(|s| s.to_string()));
    }

    /// Append an empty page.
    pub fn add_page(&mut self, name: &str) -> NodeId {
        let id = self.alloc(name, NodeKind::Page { selection: Vec::new() });
        self.pages.push(id);
        id
    }

    /// Add a text node under `parent` occupying `frame` (parent coordinates).
    pub fn add_text(
        &mut self,
        parent: NodeId,
        name: &str,
        props: TextProps,
        frame: Rect,
    ) -> ShimmerResult<NodeId> {
        let id = self.alloc(name, NodeKind::Text(props));
        self.get_mut(id)?.fills = vec![Paint::solid(Rgb::new(0.0, 0.0, 0.0), 1.0)];
        self.place(id, parent, frame)?;
        Ok(id)
    }

    /// Add a plain rectangle under `parent` occupying `frame` (parent coordinates).
    pub fn add_rectangle(&mut self, parent: NodeId, name: &str, frame: Rect) -> ShimmerResult<NodeId> {
        let id = self.alloc(name, NodeKind::Rectangle);
        self.place(id, parent, frame)?;
        Ok(id)
    }

    /// Stored node, if live.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Whether `id` is live.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Live nodes, pages included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Pages whose name equals `name` exactly.
    pub fn pages_named(&self, name: &str) -> Vec<NodeId> {
        self.pages
            .iter()
            .copied()
            .filter(|p| self.nodes.get(p).is_some_and(|n| n.name == name))
            .collect()
    }

    /// Selection stored on `page`, which need not be the current page.
    pub fn page_selection(&self, page: NodeId) -> Vec<NodeId> {
        match self.nodes.get(&page).map(|n| &n.kind) {
            Some(NodeKind::Page { selection }) => selection.clone(),
            _ => Vec::new(),
        }
    }

    /// Page that (transitively) contains `id`.
    pub fn page_of(&self, id: NodeId) -> Option<NodeId> {
        let mut cur = id;
        loop {
            let node = self.nodes.get(&cur)?;
            match node.parent {
                Some(p) => cur = p,
                None => return matches!(node.kind, NodeKind::Page { .. }).then_some(cur),
            }
        }
    }

    /// Messages passed to `notify`, oldest first.
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Selection status events posted so far.
    pub fn status_events(&self) -> &[SelectionStatus] {
        &self.status_events
    }

    /// Nodes last scrolled into view.
    pub fn viewport_focus(&self) -> &[NodeId] {
        &self.viewport_focus
    }

    /// Whether the session was closed.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Whether `load_font` succeeded for `font`.
    pub fn is_font_loaded(&self, font: &FontName) -> bool {
        self.loaded_fonts.contains(font)
    }

    fn alloc(&mut self, name: &str, kind: NodeKind) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, Node::new(id, name, kind));
        id
    }

    fn get(&self, id: NodeId) -> ShimmerResult<&Node> {
        self.nodes
            .get(&id)
            .ok_or_else(|| ShimmerError::host(format!("node {id} does not exist")))
    }

    fn get_mut(&mut self, id: NodeId) -> ShimmerResult<&mut Node> {
        self.nodes
            .get_mut(&id)
            .ok_or_else(|| ShimmerError::host(format!("node {id} does not exist")))
    }

    fn place(&mut self, id: NodeId, parent: NodeId, frame: Rect) -> ShimmerResult<()> {
        self.attach(parent, None, id)?;
        let node = self.get_mut(id)?;
        node.position = frame.origin();
        node.size = frame.size();
        Ok(())
    }

    fn create_on_current_page(&mut self, name: &str, kind: NodeKind) -> ShimmerResult<NodeId> {
        let id = self.alloc(name, kind);
        let page = self.current_page;
        self.attach(page, None, id)?;
        self.get_mut(id)?.size = Size::new(DEFAULT_NODE_SIZE, DEFAULT_NODE_SIZE);
        Ok(id)
    }

    fn detach(&mut self, id: NodeId) -> ShimmerResult<()> {
        let parent = self.get(id)?.parent;
        if let Some(p) = parent {
            self.get_mut(p)?.children.retain(|c| *c != id);
            self.get_mut(id)?.parent = None;
        }
        Ok(())
    }

    fn attach(&mut self, parent: NodeId, index: Option<usize>, child: NodeId) -> ShimmerResult<()> {
        let parent_type = self.get(parent)?.kind.node_type();
        if !accepts_children(parent_type) {
            return Err(ShimmerError::host(format!(
                "node {parent} ({parent_type:?}) cannot have children"
            )));
        }
        if self.get(child)?.kind.node_type() == NodeType::Page {
            return Err(ShimmerError::host("pages cannot be re-parented"));
        }
        if self.is_ancestor_or_self(child, parent) {
            return Err(ShimmerError::host(format!(
                "cannot move {child} into its own subtree"
            )));
        }
        let same_parent = self.get(child)?.parent == Some(parent);
        self.detach(child)?;
        let len = self.get(parent)?.children.len();
        let index = index.unwrap_or(len);
        if index > len {
            if same_parent {
                // Detaching shrank the list; clamp to the new end.
                self.get_mut(parent)?.children.push(child);
            } else {
                return Err(ShimmerError::host(format!(
                    "child index {index} out of range for {parent} ({len} children)"
                )));
            }
        } else {
            self.get_mut(parent)?.children.insert(index, child);
        }
        self.get_mut(child)?.parent = Some(parent);
        Ok(())
    }

    fn is_ancestor_or_self(&self, ancestor: NodeId, mut id: NodeId) -> bool {
        loop {
            if id == ancestor {
                return true;
            }
            match self.nodes.get(&id).and_then(|n| n.parent) {
                Some(p) => id = p,
                None => return false,
            }
        }
    }

    /// Copy `id` and its descendants without attaching the copy anywhere.
    fn copy_subtree(&mut self, id: NodeId, map: &mut CloneMap) -> ShimmerResult<NodeId> {
        let original = self.get(id)?.clone();
        let copy = NodeId(self.next_id);
        self.next_id += 1;
        map.insert(id, copy);

        let mut node = original.clone();
        node.id = copy;
        node.parent = None;
        node.children = Vec::with_capacity(original.children.len());
        self.nodes.insert(copy, node);

        for child in original.children {
            let child_copy = self.copy_subtree(child, map)?;
            self.get_mut(child_copy)?.parent = Some(copy);
            self.get_mut(copy)?.children.push(child_copy);
        }
        Ok(copy)
    }

    fn drop_subtree(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.remove(&id) {
            for child in node.children {
                self.drop_subtree(child);
            }
        }
    }

    fn purge_selections(&mut self) {
        let live: BTreeSet<NodeId> = self.nodes.keys().copied().collect();
        for page in self.pages.clone() {
            if let Some(Node {
                kind: NodeKind::Page { selection },
                ..
            }) = self.nodes.get_mut(&page)
            {
                selection.retain(|n| live.contains(n));
            }
        }
    }
}

fn accepts_children(t: NodeType) -> bool {
    matches!(
        t,
        NodeType::Page
            | NodeType::Frame
            | NodeType::Component
            | NodeType::ComponentSet
            | NodeType::Instance
    )
}

impl SceneHost for Document {
    fn snapshot(&self, id: NodeId) -> ShimmerResult<NodeInfo> {
        let node = self.get(id)?;
        let text = match &node.kind {
            NodeKind::Text(props) => Some(TextStyle {
                font: props.font.clone(),
                weight: props.weight,
            }),
            _ => None,
        };
        Ok(NodeInfo {
            id,
            node_type: node.kind.node_type(),
            name: node.name.clone(),
            parent: node.parent,
            bounds: node.bounds(),
            text,
        })
    }

    fn children(&self, id: NodeId) -> ShimmerResult<Vec<NodeId>> {
        Ok(self.get(id)?.children.clone())
    }

    fn current_page(&self) -> NodeId {
        self.current_page
    }

    fn set_current_page(&mut self, page: NodeId) -> ShimmerResult<()> {
        if !self.pages.contains(&page) {
            return Err(ShimmerError::host(format!("node {page} is not a page")));
        }
        self.current_page = page;
        Ok(())
    }

    fn pages(&self) -> Vec<NodeId> {
        self.pages.clone()
    }

    fn create_page(&mut self) -> ShimmerResult<NodeId> {
        let name = format!("Page {}", self.pages.len() + 1);
        Ok(self.add_page(&name))
    }

    fn selection(&self) -> Vec<NodeId> {
        self.page_selection(self.current_page)
    }

    fn set_selection(&mut self, nodes: &[NodeId]) -> ShimmerResult<()> {
        let page = self.current_page;
        for id in nodes {
            if self.page_of(*id) != Some(page) || *id == page {
                return Err(ShimmerError::host(format!(
                    "node {id} is not on the current page"
                )));
            }
        }
        if let NodeKind::Page { selection } = &mut self.get_mut(page)?.kind {
            *selection = nodes.to_vec();
        }
        Ok(())
    }

    fn clone_subtree(&mut self, id: NodeId) -> ShimmerResult<CloneMap> {
        let parent = self
            .get(id)?
            .parent
            .ok_or_else(|| ShimmerError::host(format!("node {id} cannot be cloned")))?;
        let index = self
            .get(parent)?
            .children
            .iter()
            .position(|c| *c == id)
            .unwrap_or(0);
        let mut map = CloneMap::default();
        let copy = self.copy_subtree(id, &mut map)?;
        self.attach(parent, Some(index + 1), copy)?;
        Ok(map)
    }

    fn flatten(&mut self, id: NodeId) -> ShimmerResult<NodeId> {
        let node = self.get(id)?.clone();
        let path = match &node.kind {
            NodeKind::Text(TextProps {
                outline: Some(outline),
                ..
            }) => outline.clone(),
            NodeKind::Vector { path } => path.clone(),
            NodeKind::Text(_) | NodeKind::Rectangle => box_path(node.size),
            _ => {
                return Err(ShimmerError::host(format!(
                    "node {id} ({:?}) cannot be flattened",
                    node.kind.node_type()
                )));
            }
        };
        let parent = node
            .parent
            .ok_or_else(|| ShimmerError::host(format!("node {id} has no parent")))?;
        let index = self
            .get(parent)?
            .children
            .iter()
            .position(|c| *c == id)
            .unwrap_or(0);

        let vector = self.alloc(&node.name, NodeKind::Vector { path });
        {
            let v = self.get_mut(vector)?;
            v.position = node.position;
            v.size = node.size;
            v.fills = node.fills;
        }
        self.attach(parent, Some(index), vector)?;
        self.remove(id)?;
        Ok(vector)
    }

    fn create_rectangle(&mut self) -> ShimmerResult<NodeId> {
        let id = self.create_on_current_page("Rectangle", NodeKind::Rectangle)?;
        self.get_mut(id)?.fills = vec![Paint::solid(DEFAULT_SHAPE_FILL, 1.0)];
        Ok(id)
    }

    fn create_frame(&mut self) -> ShimmerResult<NodeId> {
        let id = self.create_on_current_page("Frame", NodeKind::Frame)?;
        let node = self.get_mut(id)?;
        node.fills = vec![Paint::solid(Rgb::WHITE, 1.0)];
        node.clips_content = true;
        Ok(id)
    }

    fn create_component(&mut self) -> ShimmerResult<NodeId> {
        self.create_on_current_page("Component", NodeKind::Component)
    }

    fn combine_as_variants(
        &mut self,
        components: &[NodeId],
        parent: NodeId,
    ) -> ShimmerResult<NodeId> {
        if components.is_empty() {
            return Err(ShimmerError::host("combine_as_variants needs at least one component"));
        }
        let mut union: Option<Rect> = None;
        for id in components {
            let node = self.get(*id)?;
            if node.kind.node_type() != NodeType::Component {
                return Err(ShimmerError::host(format!(
                    "node {id} is not a component"
                )));
            }
            let b = node.bounds();
            union = Some(union.map_or(b, |u| u.union(b)));
        }
        let union = union.unwrap_or(Rect::ZERO);

        let set = self.alloc("Component Set", NodeKind::ComponentSet);
        self.attach(parent, None, set)?;
        {
            let node = self.get_mut(set)?;
            node.position = union.origin();
            node.size = union.size();
        }
        for id in components {
            self.attach(set, None, *id)?;
            let node = self.get_mut(*id)?;
            node.position -= union.origin().to_vec2();
        }
        Ok(set)
    }

    fn create_instance(&mut self, component: NodeId) -> ShimmerResult<NodeId> {
        let main = self.get(component)?.clone();
        if main.kind.node_type() != NodeType::Component {
            return Err(ShimmerError::host(format!(
                "node {component} is not a component"
            )));
        }
        let instance = self.create_on_current_page(
            &main.name,
            NodeKind::Instance {
                main_component: component,
            },
        )?;
        {
            let node = self.get_mut(instance)?;
            node.size = main.size;
            node.fills = main.fills.clone();
            node.clips_content = main.clips_content;
            node.reactions = main.reactions.clone();
        }
        for child in main.children {
            let mut map = CloneMap::default();
            let copy = self.copy_subtree(child, &mut map)?;
            self.attach(instance, None, copy)?;
        }
        Ok(instance)
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) -> ShimmerResult<()> {
        self.attach(parent, None, child)
    }

    fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) -> ShimmerResult<()> {
        self.attach(parent, Some(index), child)
    }

    fn remove(&mut self, id: NodeId) -> ShimmerResult<RemovalOutcome> {
        let Some(node) = self.nodes.get(&id) else {
            return Ok(RemovalOutcome::AlreadyAbsent);
        };
        if node.kind.node_type() == NodeType::Page {
            if self.pages.len() == 1 {
                return Err(ShimmerError::host("cannot remove the last page"));
            }
            self.pages.retain(|p| *p != id);
            if self.current_page == id {
                self.current_page = self.pages[0];
            }
        }
        self.detach(id)?;
        self.drop_subtree(id);
        self.purge_selections();
        Ok(RemovalOutcome::Removed)
    }

    fn set_name(&mut self, id: NodeId, name: &str) -> ShimmerResult<()> {
        self.get_mut(id)?.name = name.to_string();
        Ok(())
    }

    fn set_position(&mut self, id: NodeId, position: Point) -> ShimmerResult<()> {
        self.get_mut(id)?.position = position;
        Ok(())
    }

    fn resize(&mut self, id: NodeId, size: Size) -> ShimmerResult<()> {
        if !(size.width.is_finite() && size.height.is_finite())
            || size.width < 0.0
            || size.height < 0.0
        {
            return Err(ShimmerError::host(format!(
                "invalid size {}x{} for {id}",
                size.width, size.height
            )));
        }
        self.get_mut(id)?.size = size;
        Ok(())
    }

    fn set_fills(&mut self, id: NodeId, fills: Vec<Paint>) -> ShimmerResult<()> {
        self.get_mut(id)?.fills = fills;
        Ok(())
    }

    fn set_stroke(&mut self, id: NodeId, stroke: Stroke) -> ShimmerResult<()> {
        self.get_mut(id)?.stroke = Some(stroke);
        Ok(())
    }

    fn set_mask(&mut self, id: NodeId, is_mask: bool) -> ShimmerResult<()> {
        self.get_mut(id)?.is_mask = is_mask;
        Ok(())
    }

    fn set_clips_content(&mut self, id: NodeId, clips: bool) -> ShimmerResult<()> {
        let node = self.get_mut(id)?;
        if !accepts_children(node.kind.node_type()) {
            return Err(ShimmerError::host(format!("node {id} cannot clip content")));
        }
        node.clips_content = clips;
        Ok(())
    }

    fn set_text_font(&mut self, id: NodeId, font: FontName, weight: u16) -> ShimmerResult<()> {
        if !self.loaded_fonts.contains(&font) {
            return Err(ShimmerError::font(format!(
                "font '{} {}' must be loaded before it is applied",
                font.family, font.style
            )));
        }
        match &mut self.get_mut(id)?.kind {
            NodeKind::Text(props) => {
                props.font = font;
                props.weight = FontWeight::Resolved(weight);
                Ok(())
            }
            _ => Err(ShimmerError::host(format!("node {id} is not a text node"))),
        }
    }

    fn focus_viewport(&mut self, nodes: &[NodeId]) {
        self.viewport_focus = nodes.to_vec();
    }

    fn notify(&mut self, message: &str, is_error: bool) {
        self.notifications.push(Notification {
            message: message.to_string(),
            is_error,
        });
    }

    fn post_status(&mut self, status: SelectionStatus) {
        self.status_events.push(status);
    }

    fn close(&mut self) {
        self.closed = true;
    }

    async fn load_font(&mut self, font: &FontName) -> ShimmerResult<()> {
        let installed = self
            .fonts
            .get(&font.family)
            .is_some_and(|styles| styles.contains(&font.style));
        if !installed {
            return Err(ShimmerError::font(format!(
                "font '{} {}' is not available",
                font.family, font.style
            )));
        }
        self.loaded_fonts.insert(font.clone());
        Ok(())
    }

    async fn set_reactions(&mut self, id: NodeId, reactions: Vec<Reaction>) -> ShimmerResult<()> {
        for reaction in &reactions {
            let Trigger::AfterTimeout { timeout_ms } = reaction.trigger;
            if timeout_ms == 0 {
                return Err(ShimmerError::host("after-timeout triggers need a non-zero delay"));
            }
            for action in &reaction.actions {
                let Action::ChangeTo { destination, .. } = action;
                self.get(*destination)?;
            }
        }
        self.get_mut(id)?.reactions = reactions;
        Ok(())
    }
}

/// Rectangle path covering `size`, used when a text node carries no glyph outline.
fn box_path(size: Size) -> BezPath {
    Rect::from_origin_size(Point::ZERO, size).to_path(0.1)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/document.rs"]
mod tests;
