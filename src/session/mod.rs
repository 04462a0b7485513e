pub(crate) mod config;
pub(crate) mod events;
pub(crate) mod handler;
