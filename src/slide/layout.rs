//! Fixed positional layout of the title and chart slides.
//!
//! Distances are configured in inches (and points for text-box heights) and
//! converted to EMUs on access. Horizontal centering and the card column
//! width are derived from the canvas width, so the same layout adapts to a
//! different canvas size.

use serde::{Deserialize, Serialize};

use crate::common::{Error, Length, Result};

/// Largest accepted distance, in inches.
const MAX_DISTANCE_IN: f64 = 1000.0;

/// A positioned rectangle on the slide canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    /// Left edge
    pub x: Length,
    /// Top edge
    pub y: Length,
    /// Width
    pub width: Length,
    /// Height
    pub height: Length,
}

impl Rect {
    /// Create a rectangle.
    #[inline]
    pub const fn new(x: Length, y: Length, width: Length, height: Length) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge.
    #[inline]
    pub fn right(&self) -> Length {
        self.x + self.width
    }
}

/// Slide canvas size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Width in inches
    pub width_in: f64,
    /// Height in inches
    pub height_in: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        // 16:9 widescreen
        Self {
            width_in: 13.33,
            height_in: 7.5,
        }
    }
}

/// Title (cover) slide text blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TitleSlideLayout {
    /// Width shared by the title and subtitle blocks
    pub text_width_in: f64,
    pub title_top_in: f64,
    pub title_height_pt: f64,
    pub subtitle_top_in: f64,
    pub subtitle_height_pt: f64,
}

impl Default for TitleSlideLayout {
    fn default() -> Self {
        Self {
            text_width_in: 12.33,
            title_top_in: 2.0,
            title_height_pt: 60.0,
            subtitle_top_in: 4.0,
            subtitle_height_pt: 36.0,
        }
    }
}

/// Chart slide: title, chart rectangle on the left, cards on the right.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSlideLayout {
    pub title_width_in: f64,
    pub title_top_in: f64,
    pub title_height_pt: f64,
    pub chart_left_in: f64,
    pub chart_top_in: f64,
    pub chart_width_in: f64,
    pub chart_height_in: f64,
    /// Gap between the chart's right edge and the card column
    pub card_left_margin_in: f64,
    /// Gap between the card column and the canvas edge
    pub card_right_margin_in: f64,
    pub card_height_in: f64,
    /// Vertical gap between stacked cards
    pub card_gap_in: f64,
}

impl Default for ChartSlideLayout {
    fn default() -> Self {
        Self {
            title_width_in: 12.33,
            title_top_in: 0.8,
            title_height_pt: 45.0,
            chart_left_in: 1.0,
            chart_top_in: 2.0,
            chart_width_in: 8.5,
            chart_height_in: 5.0,
            card_left_margin_in: 0.5,
            card_right_margin_in: 0.5,
            card_height_in: 2.0,
            card_gap_in: 0.3,
        }
    }
}

/// Every positional constant of the generated slides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub canvas: CanvasConfig,
    pub title_slide: TitleSlideLayout,
    pub chart_slide: ChartSlideLayout,
}

impl LayoutConfig {
    /// Canvas width.
    pub fn canvas_width(&self) -> Length {
        Length::from_inches(self.canvas.width_in)
    }

    /// Canvas height.
    pub fn canvas_height(&self) -> Length {
        Length::from_inches(self.canvas.height_in)
    }

    /// A block of `width` centered horizontally on the canvas.
    fn centered(&self, width_in: f64, top_in: f64, height: Length) -> Rect {
        let width = Length::from_inches(width_in);
        let left = (self.canvas_width() - width).half();
        Rect::new(left, Length::from_inches(top_in), width, height)
    }

    /// Title block of the cover slide.
    pub fn cover_title(&self) -> Rect {
        let l = &self.title_slide;
        self.centered(l.text_width_in, l.title_top_in, Length::from_pt(l.title_height_pt))
    }

    /// Subtitle block of the cover slide.
    pub fn cover_subtitle(&self) -> Rect {
        let l = &self.title_slide;
        self.centered(l.text_width_in, l.subtitle_top_in, Length::from_pt(l.subtitle_height_pt))
    }

    /// Title block of the chart slide.
    pub fn chart_title(&self) -> Rect {
        let l = &self.chart_slide;
        self.centered(l.title_width_in, l.title_top_in, Length::from_pt(l.title_height_pt))
    }

    /// Chart rectangle.
    pub fn chart(&self) -> Rect {
        let l = &self.chart_slide;
        Rect::new(
            Length::from_inches(l.chart_left_in),
            Length::from_inches(l.chart_top_in),
            Length::from_inches(l.chart_width_in),
            Length::from_inches(l.chart_height_in),
        )
    }

    /// Rectangle of the card at `index`, stacked from the chart's top edge.
    pub fn card(&self, index: usize) -> Rect {
        let l = &self.chart_slide;
        let chart = self.chart();
        let left = chart.right() + Length::from_inches(l.card_left_margin_in);
        let width = self.canvas_width() - left - Length::from_inches(l.card_right_margin_in);
        let height = Length::from_inches(l.card_height_in);
        let step = height + Length::from_inches(l.card_gap_in);
        Rect::new(left, chart.y + step * index as i64, width, height)
    }

    /// Every configured distance, in inches, with its field name.
    fn distances_in(&self) -> [(&'static str, f64); 18] {
        let (c, t, l) = (&self.canvas, &self.title_slide, &self.chart_slide);
        [
            ("canvas.width_in", c.width_in),
            ("canvas.height_in", c.height_in),
            ("title_slide.text_width_in", t.text_width_in),
            ("title_slide.title_top_in", t.title_top_in),
            ("title_slide.title_height_pt", t.title_height_pt / 72.0),
            ("title_slide.subtitle_top_in", t.subtitle_top_in),
            ("title_slide.subtitle_height_pt", t.subtitle_height_pt / 72.0),
            ("chart_slide.title_width_in", l.title_width_in),
            ("chart_slide.title_top_in", l.title_top_in),
            ("chart_slide.title_height_pt", l.title_height_pt / 72.0),
            ("chart_slide.chart_left_in", l.chart_left_in),
            ("chart_slide.chart_top_in", l.chart_top_in),
            ("chart_slide.chart_width_in", l.chart_width_in),
            ("chart_slide.chart_height_in", l.chart_height_in),
            ("chart_slide.card_left_margin_in", l.card_left_margin_in),
            ("chart_slide.card_right_margin_in", l.card_right_margin_in),
            ("chart_slide.card_height_in", l.card_height_in),
            ("chart_slide.card_gap_in", l.card_gap_in),
        ]
    }

    /// Reject layouts that cannot produce a sensible slide.
    pub fn validate(&self) -> Result<()> {
        for (name, inches) in self.distances_in() {
            if !inches.is_finite() || inches.abs() > MAX_DISTANCE_IN {
                return Err(Error::Config(format!(
                    "{} must be a finite distance within {} in",
                    name, MAX_DISTANCE_IN
                )));
            }
        }

        if self.canvas.width_in <= 0.0 || self.canvas.height_in <= 0.0 {
            return Err(Error::Config(format!(
                "canvas must have a positive size, got {}x{} in",
                self.canvas.width_in, self.canvas.height_in
            )));
        }

        let chart = self.chart();
        if chart.width <= Length::ZERO || chart.height <= Length::ZERO {
            return Err(Error::Config("chart rectangle must have a positive size".to_string()));
        }

        if self.card(0).width <= Length::ZERO {
            return Err(Error::Config(
                "no horizontal room left for summary cards right of the chart".to_string(),
            ));
        }

        Ok(())
    }
}
