use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::animation::ease::Ease;
use crate::foundation::core::{BezPath, NodeId, Paint, Point, Rect, Size, Stroke};

/// Font reference as the host names it: a family plus one of its style names.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FontName {
    /// Family name, e.g. `Inter`.
    pub family: String,
    /// Style name within the family, e.g. `Bold`.
    pub style: String,
}

impl FontName {
    /// Font reference from a family and style name.
    pub fn new(family: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            style: style.into(),
        }
    }
}

/// Numeric weight of a text run, or `Mixed` when the run carries several weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    /// Single numeric weight (400 regular, 700 bold).
    Resolved(u16),
    /// Several weights within one run.
    Mixed,
}

impl Serialize for FontWeight {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Resolved(w) => serializer.serialize_u16(*w),
            Self::Mixed => serializer.serialize_str("mixed"),
        }
    }
}

impl<'de> Deserialize<'de> for FontWeight {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Num(u16),
            Str(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Num(w) => Ok(Self::Resolved(w)),
            Repr::Str(s) if s.eq_ignore_ascii_case("mixed") => Ok(Self::Mixed),
            Repr::Str(s) => Err(serde::de::Error::custom(format!(
                "font weight must be a number or \"mixed\", got '{s}'"
            ))),
        }
    }
}

/// Content and typography of a text node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextProps {
    /// Text content.
    pub characters: String,
    /// Font applied to the whole run.
    pub font: FontName,
    /// Weight of the run.
    pub weight: FontWeight,
    /// Font size in document units.
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    /// Glyph outlines in local coordinates, when the document carries them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outline: Option<BezPath>,
}

fn default_font_size() -> f64 {
    16.0
}

/// Node type together with its type-specific data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    /// Top-level canvas.
    Page {
        /// Selected nodes on this page.
        #[serde(default)]
        selection: Vec<NodeId>,
    },
    /// Text layer.
    Text(TextProps),
    /// Path geometry, e.g. flattened text.
    Vector {
        /// Outline in local coordinates.
        path: BezPath,
    },
    /// Plain rectangle.
    Rectangle,
    /// Container that can clip its children.
    Frame,
    /// Reusable main component.
    Component,
    /// Variant set grouping components.
    ComponentSet,
    /// Instance of a main component.
    Instance {
        /// Component this instance was created from.
        main_component: NodeId,
    },
}

impl NodeKind {
    /// Data-free discriminant.
    pub fn node_type(&self) -> NodeType {
        match self {
            Self::Page { .. } => NodeType::Page,
            Self::Text(_) => NodeType::Text,
            Self::Vector { .. } => NodeType::Vector,
            Self::Rectangle => NodeType::Rectangle,
            Self::Frame => NodeType::Frame,
            Self::Component => NodeType::Component,
            Self::ComponentSet => NodeType::ComponentSet,
            Self::Instance { .. } => NodeType::Instance,
        }
    }
}

/// Data-free discriminant of [`NodeKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    /// See [`NodeKind::Page`].
    Page,
    /// See [`NodeKind::Text`].
    Text,
    /// See [`NodeKind::Vector`].
    Vector,
    /// See [`NodeKind::Rectangle`].
    Rectangle,
    /// See [`NodeKind::Frame`].
    Frame,
    /// See [`NodeKind::Component`].
    Component,
    /// See [`NodeKind::ComponentSet`].
    ComponentSet,
    /// See [`NodeKind::Instance`].
    Instance,
}

/// Stored node of a [`Document`](crate::Document).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Handle of this node.
    pub id: NodeId,
    /// Layer name shown to users.
    pub name: String,
    /// Containing node; `None` only for pages.
    #[serde(default)]
    pub parent: Option<NodeId>,
    /// Children in z-order (back to front).
    #[serde(default)]
    pub children: Vec<NodeId>,
    /// Position relative to the parent.
    #[serde(default)]
    pub position: Point,
    /// Width and height.
    #[serde(default)]
    pub size: Size,
    /// Type and type-specific data.
    pub kind: NodeKind,
    /// Fill paints, bottom first.
    #[serde(default)]
    pub fills: Vec<Paint>,
    /// Outline, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<Stroke>,
    /// Whether this node masks the siblings above it.
    #[serde(default)]
    pub is_mask: bool,
    /// Whether children are clipped to this node's box.
    #[serde(default)]
    pub clips_content: bool,
    /// Prototype reactions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reactions: Vec<Reaction>,
}

impl Node {
    /// Detached node at the origin with an empty box.
    pub fn new(id: NodeId, name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id,
            name: name.into(),
            parent: None,
            children: Vec::new(),
            position: Point::ZERO,
            size: Size::ZERO,
            kind,
            fills: Vec::new(),
            stroke: None,
            is_mask: false,
            clips_content: false,
            reactions: Vec::new(),
        }
    }

    /// Bounding box in parent coordinates.
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }
}

/// Typography of a text node as reported by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Current font.
    pub font: FontName,
    /// Current weight.
    pub weight: FontWeight,
}

/// Read-only view of a node, independent of how the host stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeInfo {
    /// Node handle.
    pub id: NodeId,
    /// Node type.
    pub node_type: NodeType,
    /// Layer name.
    pub name: String,
    /// Containing node.
    pub parent: Option<NodeId>,
    /// Bounds in parent coordinates.
    pub bounds: Rect,
    /// Typography, for text nodes.
    pub text: Option<TextStyle>,
}

/// Original-to-copy mapping produced by a subtree clone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CloneMap {
    /// Copy of the cloned subtree's root.
    pub root: Option<NodeId>,
    copies: BTreeMap<NodeId, NodeId>,
}

impl CloneMap {
    /// Record `copy` as the clone of `original`. The first insert is the root.
    pub fn insert(&mut self, original: NodeId, copy: NodeId) {
        if self.root.is_none() {
            self.root = Some(copy);
        }
        self.copies.insert(original, copy);
    }

    /// Copy made from `original`.
    pub fn get(&self, original: NodeId) -> Option<NodeId> {
        self.copies.get(&original).copied()
    }

    /// Number of copied nodes.
    pub fn len(&self) -> usize {
        self.copies.len()
    }

    /// Whether nothing was copied.
    pub fn is_empty(&self) -> bool {
        self.copies.is_empty()
    }
}

/// Result of removing a node that may already be gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalOutcome {
    /// The node existed and is gone now.
    Removed,
    /// The node was already gone.
    AlreadyAbsent,
}

/// Prototype reaction attached to a node: when `trigger` fires, run `actions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reaction {
    /// When the reaction fires.
    pub trigger: Trigger,
    /// What it does.
    pub actions: Vec<Action>,
}

/// Reaction trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Trigger {
    /// Fires once the node has been shown for `timeout_ms`.
    AfterTimeout {
        /// Delay in milliseconds; hosts reject zero.
        timeout_ms: u32,
    },
}

/// Reaction action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Swap the shown variant for `destination`.
    ChangeTo {
        /// Variant to show next.
        destination: NodeId,
        /// `None` switches instantly.
        transition: Option<HostTransition>,
    },
}

/// Animated transition between two variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HostTransition {
    /// Interpolate matching layers between the two variants.
    SmartAnimate {
        /// Duration in milliseconds.
        duration_ms: u32,
        /// Easing curve.
        easing: Ease,
    },
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
