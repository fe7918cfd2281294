//! Text shown in the picker heading: the selected year, and the date split into segments.

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use regex::Regex;

use crate::CalendarView;

/// Pattern used for the heading year.
pub const YEAR_FORMAT: &str = "YYYY";

/// Default pattern used for the heading date.
pub const DEFAULT_HEADING_FORMAT: &str = "ddd, MMM D";

/// Default separator pattern splitting the heading date: a comma.
pub const DEFAULT_HEADING_BREAK: &str = "[,]";

/// The four-digit year of `date` as formatted by `calendar`,
/// or an empty string if there is no date.
pub fn format_year(calendar: &dyn CalendarView, date: Option<NaiveDate>, locale: &str) -> String {
    date.map(|date| calendar.date_format(date, YEAR_FORMAT, locale))
        .unwrap_or_default()
}

/// Format `date` with `calendar` and split the text after every match of `heading_break`.
///
/// Each separator stays at the end of the segment before it, so the segments
/// concatenate back to the formatted text:
///
/// ```
/// use chrono::NaiveDate;
/// use paper_date_picker::{HeadingBreak, MonthCalendar, split_heading_date};
///
/// let date = NaiveDate::from_ymd_opt(2015, 4, 20).unwrap();
/// let calendar = MonthCalendar::new(date, date);
/// let segments =
///     split_heading_date(&calendar, date, "ddd, MMM D", "en", &HeadingBreak::default());
/// assert_eq!(segments, ["Mon,", " Apr 20"]);
/// ```
pub fn split_heading_date(
    calendar: &dyn CalendarView,
    date: NaiveDate,
    format: &str,
    locale: &str,
    heading_break: &HeadingBreak,
) -> Vec<String> {
    heading_break.split(&calendar.date_format(date, format, locale))
}

// ----------------------------------------------------------------------------

/// A compiled separator pattern for [`split_heading_date`].
#[derive(Clone, Debug)]
pub struct HeadingBreak {
    regex: Regex,
}

impl HeadingBreak {
    /// # Errors
    /// If `pattern` is not a valid regular expression.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
        })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Split `text` after each separator match.
    ///
    /// Text without any match comes back as a single segment.
    /// Text ending in a separator gets a trailing empty segment.
    /// Empty matches at the very start or end of `text` are ignored.
    pub fn split(&self, text: &str) -> Vec<String> {
        let mut segments = vec![];
        let mut start = 0;
        for separator in self.regex.find_iter(text) {
            let at_edge = separator.start() == 0 || separator.start() == text.len();
            if separator.is_empty() && at_edge {
                continue;
            }
            segments.push(text[start..separator.end()].to_owned());
            start = separator.end();
        }
        if segments.is_empty() {
            return vec![text.to_owned()];
        }
        segments.push(text[start..].to_owned());
        segments
    }
}

impl Default for HeadingBreak {
    #[allow(clippy::unwrap_used)] // constant pattern
    fn default() -> Self {
        Self {
            regex: Regex::new(DEFAULT_HEADING_BREAK).unwrap(),
        }
    }
}

impl PartialEq for HeadingBreak {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl fmt::Display for HeadingBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HeadingBreak {
    type Err = regex::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MonthCalendar, Resizable, date_format};

    fn april_20() -> NaiveDate {
        NaiveDate::from_ymd_opt(2015, 4, 20).unwrap_or_default()
    }

    fn calendar() -> MonthCalendar {
        MonthCalendar::new(april_20(), april_20())
    }

    /// Formats every date as the pattern, in brackets.
    struct EchoCalendar;

    impl Resizable for EchoCalendar {
        fn notify_resize(&mut self) {}
    }

    impl CalendarView for EchoCalendar {
        fn today(&self) -> NaiveDate {
            NaiveDate::MIN
        }

        fn current_year(&self) -> i32 {
            0
        }

        fn current_month(&self) -> u32 {
            1
        }

        fn show_month(&mut self, _year: i32, _month: u32) {}

        fn date_format(&self, _date: NaiveDate, pattern: &str, locale: &str) -> String {
            format!("<{pattern}|{locale}>")
        }
    }

    fn pattern(pattern: &str) -> HeadingBreak {
        HeadingBreak::new(pattern).unwrap_or_default()
    }

    #[test]
    fn year() {
        assert_eq!(format_year(&calendar(), Some(april_20()), "en"), "2015");
        assert_eq!(format_year(&calendar(), None, "en"), "");
    }

    #[test]
    fn default_heading() {
        let segments = split_heading_date(
            &calendar(),
            april_20(),
            DEFAULT_HEADING_FORMAT,
            "en",
            &HeadingBreak::default(),
        );
        assert_eq!(segments, ["Mon,", " Apr 20"]);
    }

    #[test]
    fn no_separator_gives_whole_text() {
        let calendar = calendar();
        let segments =
            split_heading_date(&calendar, april_20(), "MMMM D", "en", &HeadingBreak::default());
        assert_eq!(segments, ["April 20"]);

        let semicolon = pattern("[;]");
        let segments = split_heading_date(&calendar, april_20(), "ddd, MMM D", "en", &semicolon);
        assert_eq!(segments, ["Mon, Apr 20"]);
    }

    #[test]
    fn separators_stay_with_the_preceding_segment() {
        assert_eq!(pattern(" ").split("Mon, Apr 20"), ["Mon, ", "Apr ", "20"]);
        assert_eq!(pattern("[,.]").split("a,b.c"), ["a,", "b.", "c"]);
        assert_eq!(pattern(",+").split("a,,,b"), ["a,,,", "b"]);
        assert_eq!(pattern(",").split("trailing,"), ["trailing,", ""]);
        assert_eq!(pattern(",").split(",leading"), [",", "leading"]);
    }

    #[test]
    fn empty_matches_at_the_edges_add_no_segments() {
        assert_eq!(pattern("").split("Mon"), ["M", "o", "n"]);
        assert_eq!(pattern(r"\b").split("Mon, Apr"), ["Mon", ", ", "Apr"]);
        assert_eq!(pattern("^").split("Mon"), ["Mon"]);
        assert_eq!(pattern("").split(""), [""]);
    }

    #[test]
    fn heading_text_comes_from_the_calendar() {
        assert_eq!(format_year(&EchoCalendar, Some(april_20()), "de"), "<YYYY|de>");
        assert_eq!(
            split_heading_date(&EchoCalendar, april_20(), "D", "en", &pattern("[|]")),
            ["<D|", "en>"]
        );
    }

    #[test]
    fn segments_concatenate_to_the_formatted_text() {
        let formats = ["ddd, MMM D", "dddd, MMMM Do, YYYY", "D.M.YY", "[week] d", "MMM"];
        let breaks = ["[,]", " ", "[.]", "x", "", "\\s*,\\s*", "[A-Z]"];
        let calendar = calendar();
        for locale in ["en", "fr", "de"] {
            for format in formats {
                for heading_break in breaks {
                    let text = date_format(april_20(), format, locale);
                    let heading_break = pattern(heading_break);
                    let segments =
                        split_heading_date(&calendar, april_20(), format, locale, &heading_break);
                    assert_eq!(
                        segments.concat(),
                        text,
                        "format {format:?} break {heading_break:?} locale {locale:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        assert!(HeadingBreak::new("[,").is_err());
        assert!("(".parse::<HeadingBreak>().is_err());
        assert_eq!(HeadingBreak::default().to_string(), DEFAULT_HEADING_BREAK);
    }
}
