use std::fmt;
use std::ops::{Add, Mul, Sub};

use crate::common::unit::{EMUS_PER_INCH, emu_to_pt_f64, inches_to_emu, pt_to_emu_f64};

/// Length measurement stored in EMUs.
///
/// # Examples
///
/// ```rust
/// use chartdeck::common::Length;
///
/// let length = Length::from_inches(1.0);
/// assert_eq!(length.emus(), 914_400);
/// assert_eq!(length.points(), 72.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Length {
    /// Value in EMUs (English Metric Units)
    /// 1 inch = 914,400 EMUs
    /// 1 pt = 12,700 EMUs
    emus: i64,
}

impl Length {
    /// Zero length.
    pub const ZERO: Self = Self::from_emus(0);

    /// Create a length from EMUs.
    #[inline]
    pub const fn from_emus(emus: i64) -> Self {
        Self { emus }
    }

    /// Create a length from inches.
    #[inline]
    pub fn from_inches(inches: f64) -> Self {
        Self::from_emus(inches_to_emu(inches))
    }

    /// Create a length from points (1/72 inch).
    #[inline]
    pub fn from_pt(pt: f64) -> Self {
        Self::from_emus(pt_to_emu_f64(pt))
    }

    /// Get the value in EMUs.
    #[inline]
    pub const fn emus(&self) -> i64 {
        self.emus
    }

    /// Convert to inches.
    #[inline]
    pub fn inches(&self) -> f64 {
        self.emus as f64 / EMUS_PER_INCH as f64
    }

    /// Convert to points.
    #[inline]
    pub fn points(&self) -> f64 {
        emu_to_pt_f64(self.emus)
    }

    /// Half of this length, rounded toward zero like integer EMU division.
    #[inline]
    pub const fn half(&self) -> Self {
        Self::from_emus(self.emus / 2)
    }
}

// Arithmetic saturates at the `i64` range; no slide geometry gets near it.
impl Add for Length {
    type Output = Length;

    #[inline]
    fn add(self, rhs: Length) -> Length {
        Length::from_emus(self.emus.saturating_add(rhs.emus))
    }
}

impl Sub for Length {
    type Output = Length;

    #[inline]
    fn sub(self, rhs: Length) -> Length {
        Length::from_emus(self.emus.saturating_sub(rhs.emus))
    }
}

impl Mul<i64> for Length {
    type Output = Length;

    #[inline]
    fn mul(self, rhs: i64) -> Length {
        Length::from_emus(self.emus.saturating_mul(rhs))
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}\"", self.inches())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic() {
        let a = Length::from_inches(2.0);
        let b = Length::from_inches(0.3);
        assert_eq!((a + b).emus(), 2_103_120);
        assert_eq!((a - b).emus(), 1_554_480);
        assert_eq!((a * 3).inches(), 6.0);
        assert_eq!(Length::from_emus(5).half().emus(), 2);
        assert_eq!(Length::from_pt(0.0), Length::ZERO);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let max = Length::from_emus(i64::MAX);
        let min = Length::from_emus(i64::MIN);
        assert_eq!(max + Length::from_inches(1.0), max);
        assert_eq!(min - Length::from_inches(1.0), min);
        assert_eq!(max * 2, max);
        assert_eq!(Length::from_inches(1.0e14), max);
    }

    #[test]
    fn test_display() {
        assert_eq!(Length::from_inches(13.33).to_string(), "13.33\"");
    }
}
