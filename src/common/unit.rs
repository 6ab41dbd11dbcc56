//! Unit conversion utilities.
//!
//! DrawingML positions and sizes are expressed in EMUs (English Metric
//! Units); font sizes are expressed in hundredths of a point.

pub const EMUS_PER_INCH: i64 = 914_400;
pub const EMUS_PER_PT: i64 = 12_700;

#[inline]
pub fn inches_to_emu(inches: f64) -> i64 {
    (inches * EMUS_PER_INCH as f64).round() as i64
}

#[inline]
pub fn pt_to_emu_f64(pt: f64) -> i64 {
    (pt * EMUS_PER_PT as f64).round() as i64
}

#[inline]
pub fn emu_to_pt_f64(emu: i64) -> f64 {
    emu as f64 / EMUS_PER_PT as f64
}

/// Font size in points to the `sz` attribute value (hundredths of a point).
#[inline]
pub fn pt_to_font_size(pt: f64) -> u32 {
    (pt * 100.0).round() as u32
}
