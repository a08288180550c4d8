//! Shared infrastructure: logging bootstrap.

pub mod logging;
