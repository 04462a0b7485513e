//! Shimmer composition stages, leaf first: font resolution, glyph capture, container
//! assembly, component packaging, transition wiring, placement. `pipeline` runs them in order.

pub(crate) mod container;
pub(crate) mod fonts;
pub(crate) mod geometry;
pub(crate) mod packager;
pub(crate) mod pipeline;
pub(crate) mod placement;
pub(crate) mod plan;
pub(crate) mod transitions;
