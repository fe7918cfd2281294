//! Narrow vs. wide layout resolution.

use std::{fmt, str::FromStr};

/// Points per `em`/`rem` when parsing a [`CssLength`].
pub const POINTS_PER_EM: f32 = 16.0;

/// The two mutually exclusive presentation modes of the picker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum LayoutMode {
    /// Heading above the page, tall and thin.
    Narrow,

    /// Heading to the left of the page.
    #[default]
    Wide,
}

impl LayoutMode {
    #[inline]
    pub fn is_narrow(self) -> bool {
        self == Self::Narrow
    }
}

impl From<bool> for LayoutMode {
    /// `true` is [`LayoutMode::Narrow`].
    #[inline]
    fn from(narrow: bool) -> Self {
        if narrow { Self::Narrow } else { Self::Wide }
    }
}

/// Decide the layout from the `force_narrow` override and the current breakpoint match.
///
/// ```
/// use paper_date_picker::{LayoutMode, resolve_layout};
/// assert_eq!(resolve_layout(true, false), LayoutMode::Narrow);
/// assert_eq!(resolve_layout(false, false), LayoutMode::Wide);
/// assert_eq!(resolve_layout(false, true), LayoutMode::Narrow);
/// ```
#[inline]
pub fn resolve_layout(force_narrow: bool, viewport_matches_narrow_query: bool) -> LayoutMode {
    LayoutMode::from(force_narrow || viewport_matches_narrow_query)
}

// ----------------------------------------------------------------------------

/// A CSS length, as given for the responsive breakpoint, e.g. `"560px"` or `"35em"`.
///
/// Unitless numbers are taken as pixels, which are taken as egui points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CssLength {
    value: f32,
    unit: CssUnit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CssUnit {
    Px,
    Em,
    Rem,
}

impl CssLength {
    #[inline]
    pub fn px(value: f32) -> Self {
        Self {
            value,
            unit: CssUnit::Px,
        }
    }

    /// The length in egui points.
    pub fn points(&self) -> f32 {
        match self.unit {
            CssUnit::Px => self.value,
            CssUnit::Em | CssUnit::Rem => self.value * POINTS_PER_EM,
        }
    }
}

impl Default for CssLength {
    fn default() -> Self {
        Self::px(560.0)
    }
}

impl fmt::Display for CssLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = match self.unit {
            CssUnit::Px => "px",
            CssUnit::Em => "em",
            CssUnit::Rem => "rem",
        };
        write!(f, "{}{unit}", self.value)
    }
}

/// A string could not be parsed as a [`CssLength`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid CSS length {0:?}, expected e.g. \"560px\"")]
pub struct ParseLengthError(pub String);

impl FromStr for CssLength {
    type Err = ParseLengthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let lower = trimmed.to_ascii_lowercase();
        let (number, unit) = if let Some(number) = lower.strip_suffix("rem") {
            (number, CssUnit::Rem)
        } else if let Some(number) = lower.strip_suffix("em") {
            (number, CssUnit::Em)
        } else if let Some(number) = lower.strip_suffix("px") {
            (number, CssUnit::Px)
        } else {
            (lower.as_str(), CssUnit::Px)
        };

        match number.trim_end().parse::<f32>() {
            Ok(value) if value.is_finite() => Ok(Self { value, unit }),
            _ => Err(ParseLengthError(trimmed.to_owned())),
        }
    }
}

// ----------------------------------------------------------------------------

/// The narrow-layout breakpoint, modelled on a `(max-width: …)` media query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MediaQuery {
    /// Matches every viewport. Used when narrow layout is forced.
    Always,

    /// Matches when the viewport is at most this many points wide.
    ///
    /// A zero or negative width never matches.
    MaxWidth(f32),
}

impl MediaQuery {
    pub fn new(force_narrow: bool, responsive_width: CssLength) -> Self {
        if force_narrow {
            Self::Always
        } else {
            Self::MaxWidth(responsive_width.points())
        }
    }

    pub fn matches(&self, viewport_width: f32) -> bool {
        match *self {
            Self::Always => true,
            Self::MaxWidth(max_width) => max_width > 0.0 && viewport_width <= max_width,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn force_narrow_always_wins() {
        assert_eq!(resolve_layout(true, true), LayoutMode::Narrow);
        assert_eq!(resolve_layout(true, false), LayoutMode::Narrow);
        assert_eq!(resolve_layout(false, true), LayoutMode::Narrow);
        assert_eq!(resolve_layout(false, false), LayoutMode::Wide);
    }

    #[test]
    fn parse_css_lengths() {
        assert_eq!("560px".parse::<CssLength>().map(|l| l.points()), Ok(560.0));
        assert_eq!(" 35em ".parse::<CssLength>().map(|l| l.points()), Ok(560.0));
        assert_eq!("2rem".parse::<CssLength>().map(|l| l.points()), Ok(32.0));
        assert_eq!("300".parse::<CssLength>().map(|l| l.points()), Ok(300.0));
        assert_eq!("12.5 PX".parse::<CssLength>().map(|l| l.points()), Ok(12.5));
        assert!("wide".parse::<CssLength>().is_err());
        assert!("px".parse::<CssLength>().is_err());
        assert!("".parse::<CssLength>().is_err());
    }

    #[test]
    fn display_keeps_the_unit() {
        assert_eq!(CssLength::default().to_string(), "560px");
        let em: CssLength = "2.5em".parse().unwrap_or_default();
        assert_eq!(em.to_string(), "2.5em");
    }

    #[test]
    fn breakpoint_matching() {
        let query = MediaQuery::new(false, CssLength::px(560.0));
        assert!(query.matches(400.0));
        assert!(query.matches(560.0));
        assert!(!query.matches(561.0));

        assert!(MediaQuery::new(true, CssLength::px(560.0)).matches(4000.0));
    }

    #[test]
    fn non_positive_breakpoint_never_matches() {
        assert!(!MediaQuery::new(false, CssLength::px(0.0)).matches(0.0));
        assert!(!MediaQuery::new(false, CssLength::px(-10.0)).matches(-20.0));
        assert!(MediaQuery::new(true, CssLength::px(0.0)).matches(100.0));
    }
}
