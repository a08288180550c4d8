//! Per-frame systems.

pub mod animation;
