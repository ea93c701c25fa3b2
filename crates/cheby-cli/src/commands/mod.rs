//! CLI command implementations.

pub mod common;
pub mod design;
pub mod impulse;
pub mod presets;
pub mod process;
