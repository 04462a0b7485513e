use crate::foundation::core::{NodeId, Paint, Point, Size, Stroke};
use crate::foundation::error::ShimmerResult;
use crate::scene::model::{CloneMap, FontName, NodeInfo, Reaction, RemovalOutcome};
use crate::session::events::SelectionStatus;

/// Scene-mutation interface the shimmer pipeline drives.
///
/// Every document edit goes through this trait, so the generator can run against a live design
/// tool binding or against the in-memory [`Document`](crate::Document). Only font loading and
/// reaction authoring suspend; they must be awaited before the next call is issued.
///
/// Creation methods place new nodes on the current page. Positions are relative to the
/// node's parent.
#[allow(async_fn_in_trait)]
pub trait SceneHost {
    /// Read-only view of a live node.
    fn snapshot(&self, id: NodeId) -> ShimmerResult<NodeInfo>;

    /// Children of `id` in z-order (back to front).
    fn children(&self, id: NodeId) -> ShimmerResult<Vec<NodeId>>;

    /// Page the user is looking at.
    fn current_page(&self) -> NodeId;
    /// Switch to `page`.
    fn set_current_page(&mut self, page: NodeId) -> ShimmerResult<()>;
    /// All pages in document order.
    fn pages(&self) -> Vec<NodeId>;
    /// Append a new empty page.
    fn create_page(&mut self) -> ShimmerResult<NodeId>;

    /// Selection of the current page.
    fn selection(&self) -> Vec<NodeId>;
    /// Replace the selection of the current page.
    fn set_selection(&mut self, nodes: &[NodeId]) -> ShimmerResult<()>;

    /// Deep copy of `id`, inserted right after it in the same parent.
    fn clone_subtree(&mut self, id: NodeId) -> ShimmerResult<CloneMap>;
    /// Convert `id` into a vector node with the same frame. `id` is consumed.
    fn flatten(&mut self, id: NodeId) -> ShimmerResult<NodeId>;
    /// New rectangle on the current page.
    fn create_rectangle(&mut self) -> ShimmerResult<NodeId>;
    /// New frame on the current page.
    fn create_frame(&mut self) -> ShimmerResult<NodeId>;
    /// New empty component on the current page.
    fn create_component(&mut self) -> ShimmerResult<NodeId>;
    /// Group `components` into a variant set under `parent`.
    fn combine_as_variants(
        &mut self,
        components: &[NodeId],
        parent: NodeId,
    ) -> ShimmerResult<NodeId>;
    /// Instance of `component`, placed on the current page.
    fn create_instance(&mut self, component: NodeId) -> ShimmerResult<NodeId>;

    /// Move `child` to the top of `parent`'s children.
    fn append_child(&mut self, parent: NodeId, child: NodeId) -> ShimmerResult<()>;
    /// Move `child` into `parent` at `index`.
    fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) -> ShimmerResult<()>;
    /// Delete `id` and its subtree; an absent node is not an error.
    fn remove(&mut self, id: NodeId) -> ShimmerResult<RemovalOutcome>;

    /// Rename a node.
    fn set_name(&mut self, id: NodeId, name: &str) -> ShimmerResult<()>;
    /// Move a node within its parent.
    fn set_position(&mut self, id: NodeId, position: Point) -> ShimmerResult<()>;
    /// Change a node's size.
    fn resize(&mut self, id: NodeId, size: Size) -> ShimmerResult<()>;
    /// Replace a node's fills.
    fn set_fills(&mut self, id: NodeId, fills: Vec<Paint>) -> ShimmerResult<()>;
    /// Replace a node's outline.
    fn set_stroke(&mut self, id: NodeId, stroke: Stroke) -> ShimmerResult<()>;
    /// Toggle mask behavior.
    fn set_mask(&mut self, id: NodeId, is_mask: bool) -> ShimmerResult<()>;
    /// Toggle child clipping on a frame-like node.
    fn set_clips_content(&mut self, id: NodeId, clips: bool) -> ShimmerResult<()>;
    /// Restyle a text node. The font must already be loaded.
    fn set_text_font(&mut self, id: NodeId, font: FontName, weight: u16) -> ShimmerResult<()>;

    /// Bring `nodes` into view.
    fn focus_viewport(&mut self, nodes: &[NodeId]);
    /// Show a transient message to the user.
    fn notify(&mut self, message: &str, is_error: bool);
    /// Forward the selection summary to the UI panel.
    fn post_status(&mut self, status: SelectionStatus);
    /// End the generator session.
    fn close(&mut self);

    /// Make `font` available for text edits.
    async fn load_font(&mut self, font: &FontName) -> ShimmerResult<()>;
    /// Replace the prototype reactions of `id`.
    async fn set_reactions(&mut self, id: NodeId, reactions: Vec<Reaction>) -> ShimmerResult<()>;
}

