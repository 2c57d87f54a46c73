//! Small formatting helpers shared across the codol crates.

pub mod debug;
