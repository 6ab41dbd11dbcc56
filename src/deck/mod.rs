//! Presentation container and `.pptx` persistence.
//!
//! A [`Deck`] is an ordered list of composed slides on a fixed canvas.
//! [`PptxWriter`] turns it into an Office Open XML package:
//!
//! ```text
//! [Content_Types].xml
//! _rels/.rels
//! docProps/{app,core}.xml
//! ppt/presentation.xml
//! ppt/slideMasters/slideMaster1.xml
//! ppt/slideLayouts/slideLayout{1,2}.xml
//! ppt/theme/theme1.xml
//! ppt/slides/slideN.xml
//! ppt/charts/chartN.xml
//! ```

pub mod chart_xml;
pub mod constants;
pub mod drawing;
pub mod package;
pub mod parts;
pub mod slide_xml;
pub mod writer;

pub use writer::{DeckSink, PptxWriter};

use crate::common::Length;
use crate::slide::{LayoutConfig, Slide};

/// Slides on a canvas of fixed size.
#[derive(Debug, Clone, PartialEq)]
pub struct Deck {
    width: Length,
    height: Length,
    title: Option<String>,
    slides: Vec<Slide>,
}

impl Deck {
    /// Empty deck whose canvas matches `layout`.
    pub fn new(layout: &LayoutConfig) -> Self {
        Self {
            width: layout.canvas_width(),
            height: layout.canvas_height(),
            title: None,
            slides: Vec::new(),
        }
    }

    /// Document title written to the package properties.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn width(&self) -> Length {
        self.width
    }

    pub fn height(&self) -> Length {
        self.height
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn push_slide(&mut self, slide: Slide) {
        self.slides.push(slide);
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }
}

impl Default for Deck {
    /// 16:9 canvas, 13.33 x 7.5 in.
    fn default() -> Self {
        Self::new(&LayoutConfig::default())
    }
}
