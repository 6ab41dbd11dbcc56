//! Fonts, sizes and colors of the generated report.

use crate::common::RGBColor;

/// Font family applied to every text run and data label.
pub const FONT_FACE: &str = "Century Gothic";

/// Color of slide titles and subtitles.
pub const TITLE_COLOR: RGBColor = RGBColor::BLACK;

pub const COVER_TITLE_SIZE_PT: f64 = 40.0;
pub const COVER_SUBTITLE_SIZE_PT: f64 = 24.0;
pub const CHART_TITLE_SIZE_PT: f64 = 30.0;

pub const SERIES_LINE_WIDTH_PT: f64 = 2.5;
pub const MARKER_SIZE: u8 = 6;
pub const MARKER_OUTLINE_WIDTH_PT: f64 = 0.0;
pub const DATA_LABEL_SIZE_PT: f64 = 10.0;
pub const CATEGORY_LABEL_SIZE_PT: f64 = 12.0;

pub const CARD_VALUE_SIZE_PT: f64 = 26.0;
pub const CARD_LABEL_SIZE_PT: f64 = 14.0;

/// Series colors; cards reuse the color of the series they summarize.
pub const PALETTE: [RGBColor; 2] = [RGBColor::new(46, 117, 182), RGBColor::new(237, 125, 49)];

/// Palette color of the series at `index`, cycling when there are more
/// series than colors.
#[inline]
pub fn palette_color(index: usize) -> RGBColor {
    PALETTE[index % PALETTE.len()]
}
