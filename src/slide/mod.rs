//! Slide composition.
//!
//! Consumes a [`ChartModel`](crate::chart::ChartModel) and produces slides:
//!
//! - A title slide with centered title and subtitle
//! - A chart slide with a styled chart on the left and one summary
//!   [`Card`] per series (at most [`MAX_CARDS`]) stacked on the right, each
//!   colored like its series
//!
//! Positions come from [`LayoutConfig`]; fonts and colors from [`theme`].

pub mod applier;
pub mod card;
pub mod chart_frame;
pub mod composer;
pub mod layout;
pub mod shape;
pub mod theme;

#[cfg(test)]
mod tests;

pub use applier::{
    BestEffort, Capabilities, OptionalProperty, SkippedProperty, StyleApplier, StyleError,
};
pub use card::{Card, MAX_CARDS, PLACEHOLDER_VALUE, build_cards, format_percent, resolve_evolution, resolve_label};
pub use chart_frame::{AxisLine, CategoryAxis, ChartFrame, ChartSeries, DataLabels, Marker, ValueAxis};
pub use composer::{Slide, SlideComposer, SlideLayout};
pub use layout::{LayoutConfig, Rect};
pub use shape::{Alignment, Paragraph, Placeholder, Shape, TextBox, TextFormat, TextRun};
