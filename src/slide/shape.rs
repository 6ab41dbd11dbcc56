//! Shapes placed on a composed slide.

use super::chart_frame::ChartFrame;
use super::layout::Rect;
use crate::common::RGBColor;

/// Character formatting of a text run or data label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextFormat {
    /// Font family
    pub font: Option<String>,
    /// Font size in points
    pub size: Option<f64>,
    /// Bold text
    pub bold: Option<bool>,
    /// Text color
    pub color: Option<RGBColor>,
}

impl TextFormat {
    /// A format with the given font and size.
    pub fn new(font: &str, size: f64) -> Self {
        Self {
            font: Some(font.to_string()),
            size: Some(size),
            ..Default::default()
        }
    }

    #[inline]
    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = Some(bold);
        self
    }

    #[inline]
    pub fn color(mut self, color: RGBColor) -> Self {
        self.color = Some(color);
        self
    }
}

/// A run of uniformly formatted text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub format: TextFormat,
}

/// Horizontal paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

impl Alignment {
    /// The `algn` attribute value.
    pub const fn xml_value(&self) -> &'static str {
        match self {
            Self::Left => "l",
            Self::Center => "ctr",
            Self::Right => "r",
        }
    }
}

/// A paragraph of one or more runs.
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub runs: Vec<TextRun>,
    pub alignment: Option<Alignment>,
}

impl Paragraph {
    /// A paragraph holding a single run.
    pub fn single(text: impl Into<String>, format: TextFormat) -> Self {
        Self {
            runs: vec![TextRun {
                text: text.into(),
                format,
            }],
            alignment: None,
        }
    }

    #[inline]
    pub fn aligned(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    /// Concatenated run text.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

/// Layout placeholder a text box fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// Title of the title layout
    CenteredTitle,
    /// Subtitle of the title layout
    Subtitle,
    /// Title of any other layout
    Title,
}

impl Placeholder {
    /// The `type` attribute of `<p:ph>`.
    pub const fn xml_type(&self) -> &'static str {
        match self {
            Self::CenteredTitle => "ctrTitle",
            Self::Subtitle => "subTitle",
            Self::Title => "title",
        }
    }

    /// The `idx` attribute of `<p:ph>`, when the placeholder has one.
    pub const fn xml_index(&self) -> Option<u32> {
        match self {
            Self::Subtitle => Some(1),
            _ => None,
        }
    }
}

/// A positioned text box, either filling a layout placeholder or free.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBox {
    pub placeholder: Option<Placeholder>,
    pub name: String,
    pub rect: Rect,
    pub paragraphs: Vec<Paragraph>,
}

impl TextBox {
    /// Create an empty free text box.
    pub fn new(name: impl Into<String>, rect: Rect) -> Self {
        Self {
            placeholder: None,
            name: name.into(),
            rect,
            paragraphs: Vec::new(),
        }
    }

    /// Fill a layout placeholder.
    #[inline]
    pub fn in_placeholder(mut self, placeholder: Placeholder) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    #[inline]
    pub fn with_paragraph(mut self, paragraph: Paragraph) -> Self {
        self.paragraphs.push(paragraph);
        self
    }

    /// The text of every paragraph, joined by newlines.
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Anything placed on a slide.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Text(TextBox),
    Chart(Box<ChartFrame>),
}

impl Shape {
    pub fn rect(&self) -> Rect {
        match self {
            Self::Text(text) => text.rect,
            Self::Chart(chart) => chart.rect,
        }
    }

    pub fn as_text(&self) -> Option<&TextBox> {
        match self {
            Self::Text(text) => Some(text),
            Self::Chart(_) => None,
        }
    }

    pub fn as_chart(&self) -> Option<&ChartFrame> {
        match self {
            Self::Chart(chart) => Some(chart),
            Self::Text(_) => None,
        }
    }
}
