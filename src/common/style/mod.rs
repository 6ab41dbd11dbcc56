//! Style primitives: colors and lengths.

// Submodule declarations
pub mod color;
pub mod len;

// Re-exports
pub use color::RGBColor;
pub use len::Length;
