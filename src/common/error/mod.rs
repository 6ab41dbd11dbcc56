//! Unified error type for chartdeck.
//!
//! Only structural problems (bad input shape, unreadable files, broken
//! packages) become errors. Cosmetic degradations in the chart and slide
//! paths are handled locally and never reach this type.

// Submodule declarations
pub mod types;

// Re-exports
pub use types::{Error, Result};
