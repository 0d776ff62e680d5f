//! Unit conversion utilities.
//!
//! Word records measure lengths in twips (1/20 pt), border widths in eighths
//! of a point and font sizes in half-points. ODF wants points with a unit
//! suffix.

use std::fmt;

pub const TWIPS_PER_PT: f64 = 20.0;
pub const EIGHTHS_PER_PT: f64 = 8.0;
pub const HALF_POINTS_PER_PT: f64 = 2.0;

#[inline]
pub fn twips_to_pt(twips: i32) -> f64 {
    twips as f64 / TWIPS_PER_PT
}

#[inline]
pub fn eighths_to_pt(eighths: u32) -> f64 {
    eighths as f64 / EIGHTHS_PER_PT
}

#[inline]
pub fn half_points_to_pt(half_points: u16) -> f64 {
    half_points as f64 / HALF_POINTS_PER_PT
}

/// A length in points, rendered the way ODF attributes expect (`"12.5pt"`).
///
/// # Examples
///
/// ```
/// use doc2odt::common::unit::Pt;
///
/// assert_eq!(Pt(72.0).to_string(), "72pt");
/// assert_eq!(Pt(0.5).to_string(), "0.5pt");
/// assert_eq!(Pt::from_twips(1440).to_string(), "72pt");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Pt(pub f64);

impl Pt {
    #[inline]
    pub fn from_twips(twips: i32) -> Self {
        Self(twips_to_pt(twips))
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Pt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fixed = format!("{:.4}", self.0);
        let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
        // "-0" is not a length anyone wants to read
        let trimmed = if trimmed == "-0" { "0" } else { trimmed };
        write!(f, "{}pt", trimmed)
    }
}
