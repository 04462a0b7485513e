//! Host-facing scene model.
//!
//! [`SceneHost`](host::SceneHost) is the only way the generator touches a document;
//! [`Document`](document::Document) is the in-memory implementation used by the CLI and tests.

pub(crate) mod document;
pub(crate) mod host;
pub(crate) mod model;
