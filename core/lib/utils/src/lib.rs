//! Various helpers used across the zkLink crates.

mod format;
mod serde_wrappers;

pub use format::*;
pub use serde_wrappers::*;
