//! Shimmer turns a static text layer of a design document into an animated loading placeholder.
//!
//! The generator builds a hollow (masked) copy of the glyphs, a translucent backdrop and a
//! sweeping white gradient, packages a "start" and an "end" snapshot of the sweep as two
//! component variants, and wires them with timed prototype reactions so the host's playback
//! loops them: pause, eased sweep, instant reset.
//!
//! # Pipeline overview
//!
//! 1. **Resolve font**: load the text's font, optionally escalate to a bolder style.
//! 2. **Capture glyphs**: clone and flatten the text, clone the paths into a white mask.
//! 3. **Assemble**: stack mask, backdrop and gradient into a clipping frame (Start), clone it
//!    and shift only the gradient (End).
//! 4. **Package**: wrap both frames in components and merge them into a marked variant set.
//! 5. **Wire**: attach the Start -> End (600 ms, 1200 ms ease-out) and End -> Start (1 ms, instant)
//!    reactions.
//! 6. **Place**: below the text (legacy) or on a dedicated page, then drop transient nodes.
//!
//! All document edits go through [`SceneHost`]; [`Document`] is an in-memory host.
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

mod animation;
mod compose;
mod foundation;
mod scene;
mod session;

pub use animation::ease::Ease;
pub use compose::container::{ContainerFrame, assemble_start, clone_end};
pub use compose::fonts::{
    BOLD_CANDIDATES, BoldCandidate, FontResolution, SEMIBOLD_THRESHOLD, resolve_font,
};
pub use compose::geometry::{GlyphCapture, Layers, build_layers, capture_glyphs};
pub use compose::packager::{VariantGroup, package_variants};
pub use compose::pipeline::{ShimmerOutput, create_shimmer};
pub use compose::placement::{
    PageResolution, Placement, SourceText, place_below_text, place_on_target_page,
    remove_transient, resolve_target_page, right_edge_slot,
};
pub use compose::plan::{
    BACKDROP_NAME, CONTAINER_NAME, ContainerSpec, END_VARIANT_NAME, GRADIENT_NAME, GROUP_NAME,
    GroupStyle, HOLLOW_TEXT_NAME, LayerSpec, MARKER_COLOR_HEX, MARKER_DASH_PATTERN,
    MARKER_FILL_OPACITY, MARKER_STROKE_WEIGHT, START_VARIANT_NAME, ShimmerPlan, TEXT_COPY_NAME,
    TEXT_VECTOR_NAME, VariantSpec,
};
pub use compose::transitions::{
    Animation, LoopSample, RESET_DELAY_MS, SWEEP_DELAY_MS, SWEEP_DURATION_MS, ShimmerLoop,
    ShimmerState, StateNodes, TransitionRule, shimmer_rules, validate_rules, wire_transitions,
};
pub use foundation::core::{
    Affine, BezPath, GradientStop, NodeId, Paint, Point, Rect, Rgb, Rgba, Size, Stroke, Vec2,
};
pub use foundation::error::{ShimmerError, ShimmerResult};
pub use scene::document::{Document, Notification};
pub use scene::host::SceneHost;
pub use scene::model::{
    Action, CloneMap, FontName, FontWeight, HostTransition, Node, NodeInfo, NodeKind, NodeType,
    Reaction, RemovalOutcome, TextProps, TextStyle, Trigger,
};
pub use session::config::{DEFAULT_TARGET_PAGE, PlacementMode, ShimmerConfig};
pub use session::events::{CreateShimmerRequest, SelectionStatus};
pub use session::handler::{
    MSG_EMPTY_SELECTION, MSG_FAILED, MSG_MULTIPLE, MSG_NOT_TEXT, RunOutcome, SelectionRejection,
    handle_create_shimmer, post_selection_status, selection_status, validate_selection,
};

#[cfg(test)]
#[path = "../tests/unit/support.rs"]
mod test_support;
