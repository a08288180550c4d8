//! Browser-facing bindings.

pub mod animation_loop;
pub mod wasm;
