//! Locale-aware date formatting with [Moment.js](https://momentjs.com/docs/#/displaying/format/)-style patterns.
//!
//! | Token  | Output            |
//! |--------|-------------------|
//! | `YYYY` | `2015`            |
//! | `YY`   | `15`              |
//! | `MMMM` | `April`           |
//! | `MMM`  | `Apr`             |
//! | `MM`   | `04`              |
//! | `M`    | `4`               |
//! | `DDDD` | `110` (day of year, padded) |
//! | `DDD`  | `110` (day of year) |
//! | `DD`   | `09`              |
//! | `Do`   | `9th`             |
//! | `D`    | `9`               |
//! | `dddd` | `Monday`          |
//! | `ddd`  | `Mon`             |
//! | `dd`   | `Mo`              |
//! | `d`    | `1` (Sunday is 0) |
//!
//! Text inside `[brackets]` is copied verbatim, as is anything that is not a token.

use std::fmt::Write as _;

use chrono::{Datelike as _, Locale, NaiveDate, NaiveTime};

/// Format `date` according to a Moment.js-style `pattern`, with names from `locale`.
///
/// ```
/// use chrono::NaiveDate;
/// let date = NaiveDate::from_ymd_opt(2015, 4, 20).unwrap();
/// assert_eq!(paper_date_picker::date_format(date, "ddd, MMM D", "en"), "Mon, Apr 20");
/// assert_eq!(paper_date_picker::date_format(date, "YYYY", "en"), "2015");
/// ```
pub fn date_format(date: NaiveDate, pattern: &str, locale: &str) -> String {
    let locale = resolve_locale(locale);
    let mut out = String::with_capacity(pattern.len() + 8);
    for token in tokenize(pattern) {
        match token {
            Token::Literal(text) => out.push_str(text),
            Token::Field(field) => field.render(date, locale, &mut out),
        }
    }
    out
}

/// Map a locale tag such as `"en"`, `"fr-CA"` or `"de_DE"` onto one of chrono's locales.
///
/// Unknown tags fall back to [`Locale::POSIX`], which uses English names.
pub fn resolve_locale(tag: &str) -> Locale {
    let tag = tag.trim().replace('-', "_");
    if let Ok(locale) = Locale::try_from(tag.as_str()) {
        return locale;
    }

    let (language, region) = match tag.split_once('_') {
        Some((language, region)) => (
            language.to_ascii_lowercase(),
            Some(region.to_ascii_uppercase()),
        ),
        None => (tag.to_ascii_lowercase(), None),
    };

    let candidates = match region {
        Some(region) => vec![format!("{language}_{region}")],
        None => default_region(&language)
            .map(|region| format!("{language}_{region}"))
            .into_iter()
            .chain(std::iter::once(format!(
                "{language}_{}",
                language.to_ascii_uppercase()
            )))
            .collect(),
    };
    for candidate in &candidates {
        if let Ok(locale) = Locale::try_from(candidate.as_str()) {
            return locale;
        }
    }

    if !tag.is_empty() {
        log::warn!("Unknown locale {tag:?}, falling back to POSIX");
    }
    Locale::POSIX
}

/// Languages whose most common region is not the upper-cased language code.
fn default_region(language: &str) -> Option<&'static str> {
    Some(match language {
        "en" => "US",
        "ja" => "JP",
        "ko" => "KR",
        "zh" => "CN",
        "sv" => "SE",
        "da" => "DK",
        "nb" | "nn" => "NO",
        "cs" => "CZ",
        "el" => "GR",
        "uk" => "UA",
        "he" => "IL",
        "ar" => "SA",
        "hi" => "IN",
        "vi" => "VN",
        "ca" => "ES",
        "et" => "EE",
        "sl" => "SI",
        _ => return None,
    })
}

// ----------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Token<'a> {
    Literal(&'a str),
    Field(Field),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Field {
    Year,
    ShortYear,
    MonthName,
    ShortMonthName,
    PaddedMonth,
    Month,
    PaddedDayOfYear,
    DayOfYear,
    PaddedDay,
    OrdinalDay,
    Day,
    WeekdayName,
    ShortWeekdayName,
    MinWeekdayName,
    WeekdayNumber,
}

/// Longest token first, so that `MMMM` wins over `MM`.
const FIELDS: &[(&str, Field)] = &[
    ("YYYY", Field::Year),
    ("YY", Field::ShortYear),
    ("MMMM", Field::MonthName),
    ("MMM", Field::ShortMonthName),
    ("MM", Field::PaddedMonth),
    ("M", Field::Month),
    ("DDDD", Field::PaddedDayOfYear),
    ("DDD", Field::DayOfYear),
    ("DD", Field::PaddedDay),
    ("Do", Field::OrdinalDay),
    ("D", Field::Day),
    ("dddd", Field::WeekdayName),
    ("ddd", Field::ShortWeekdayName),
    ("dd", Field::MinWeekdayName),
    ("d", Field::WeekdayNumber),
];

fn tokenize(pattern: &str) -> Vec<Token<'_>> {
    let mut tokens = vec![];
    let mut rest = pattern;
    let mut literal_start: Option<usize> = None;
    let offset = |rest: &str| pattern.len() - rest.len();

    while !rest.is_empty() {
        if let Some(inner) = rest.strip_prefix('[') {
            if let Some(start) = literal_start.take() {
                tokens.push(Token::Literal(&pattern[start..offset(rest)]));
            }
            let (text, after) = inner.split_once(']').unwrap_or((inner, ""));
            tokens.push(Token::Literal(text));
            rest = after;
            continue;
        }

        if let Some((name, field)) = FIELDS.iter().find(|(name, _)| rest.starts_with(name)) {
            if let Some(start) = literal_start.take() {
                tokens.push(Token::Literal(&pattern[start..offset(rest)]));
            }
            tokens.push(Token::Field(*field));
            rest = &rest[name.len()..];
            continue;
        }

        literal_start.get_or_insert(offset(rest));
        let width = rest.chars().next().map_or(1, char::len_utf8);
        rest = &rest[width..];
    }

    if let Some(start) = literal_start {
        tokens.push(Token::Literal(&pattern[start..]));
    }
    tokens.retain(|token| *token != Token::Literal(""));
    tokens
}

impl Field {
    fn render(self, date: NaiveDate, locale: Locale, out: &mut String) {
        match self {
            Self::Year => push_localized(date, "%Y", locale, out),
            Self::ShortYear => push_localized(date, "%y", locale, out),
            Self::MonthName => push_localized(date, "%B", locale, out),
            Self::ShortMonthName => push_localized(date, "%b", locale, out),
            Self::PaddedMonth => push_localized(date, "%m", locale, out),
            Self::Month => push_localized(date, "%-m", locale, out),
            Self::PaddedDayOfYear => push_localized(date, "%j", locale, out),
            Self::DayOfYear => push_localized(date, "%-j", locale, out),
            Self::PaddedDay => push_localized(date, "%d", locale, out),
            Self::Day => push_localized(date, "%-d", locale, out),
            Self::OrdinalDay => push_ordinal(date.day(), locale, out),
            Self::WeekdayName => push_localized(date, "%A", locale, out),
            Self::ShortWeekdayName => push_localized(date, "%a", locale, out),
            Self::MinWeekdayName => {
                let mut name = String::new();
                push_localized(date, "%a", locale, &mut name);
                out.extend(name.chars().take(2));
            }
            Self::WeekdayNumber => push_localized(date, "%w", locale, out),
        }
    }
}

fn push_localized(date: NaiveDate, spec: &str, locale: Locale, out: &mut String) {
    let date_time = date.and_time(NaiveTime::MIN).and_utc();
    if write!(out, "{}", date_time.format_localized(spec, locale)).is_err() {
        log::debug!("Failed to format {date} with {spec:?}");
    }
}

fn push_ordinal(day: u32, locale: Locale, out: &mut String) {
    let english = matches!(locale, Locale::POSIX) || format!("{locale:?}").starts_with("en_");
    if !english {
        let _ = write!(out, "{day}.");
        return;
    }
    let suffix = match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    let _ = write!(out, "{day}{suffix}");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
    }

    #[test]
    fn english_heading() {
        let date = ymd(2015, 4, 20);
        assert_eq!(date_format(date, "ddd, MMM D", "en"), "Mon, Apr 20");
        assert_eq!(date_format(date, "dddd, MMMM Do YYYY", "en"), "Monday, April 20th 2015");
        assert_eq!(date_format(date, "YY-MM-DD", "en"), "15-04-20");
        assert_eq!(date_format(date, "dd d", "en"), "Mo 1");
        assert_eq!(date_format(ymd(2015, 1, 9), "M/D DDD DDDD", "en"), "1/9 9 009");
    }

    #[test]
    fn ordinals() {
        let ordinal = |day| date_format(ymd(2015, 3, day), "Do", "en");
        assert_eq!(ordinal(1), "1st");
        assert_eq!(ordinal(2), "2nd");
        assert_eq!(ordinal(3), "3rd");
        assert_eq!(ordinal(4), "4th");
        assert_eq!(ordinal(11), "11th");
        assert_eq!(ordinal(12), "12th");
        assert_eq!(ordinal(13), "13th");
        assert_eq!(ordinal(21), "21st");
        assert_eq!(ordinal(22), "22nd");
        assert_eq!(ordinal(31), "31st");
    }

    #[test]
    fn bracketed_text_is_literal() {
        let date = ymd(2015, 4, 20);
        assert_eq!(date_format(date, "[Day] D [of] MMMM", "en"), "Day 20 of April");
        assert_eq!(date_format(date, "[unterminated D", "en"), "unterminated D");
        assert_eq!(date_format(date, "%Y %d", "en"), "%Y %d");
    }

    #[test]
    fn non_token_characters_pass_through() {
        let date = ymd(2015, 4, 20);
        assert_eq!(date_format(date, "xyz", "en"), "xyz");
        assert_eq!(date_format(date, "", "en"), "");
        assert_eq!(date_format(date, "ü D ü", "en"), "ü 20 ü");
    }

    #[test]
    fn localized_names() {
        let date = ymd(2015, 4, 20);
        assert_eq!(date_format(date, "dddd D MMMM", "fr"), "lundi 20 avril");
        assert_eq!(date_format(date, "dddd, D. MMMM", "de-DE"), "Montag, 20. April");
        assert_eq!(date_format(date, "Do", "de"), "20.");
    }

    #[test]
    fn locale_resolution() {
        assert_eq!(resolve_locale("en"), Locale::en_US);
        assert_eq!(resolve_locale("en-GB"), Locale::en_GB);
        assert_eq!(resolve_locale("fr"), Locale::fr_FR);
        assert_eq!(resolve_locale("ja"), Locale::ja_JP);
        assert_eq!(resolve_locale("pt_br"), Locale::pt_BR);
        assert_eq!(resolve_locale("klingon"), Locale::POSIX);
        assert_eq!(resolve_locale(""), Locale::POSIX);
    }

    #[test]
    fn tokenizer_merges_literals() {
        assert_eq!(
            tokenize("ddd, MMM D"),
            vec![
                Token::Field(Field::ShortWeekdayName),
                Token::Literal(", "),
                Token::Field(Field::ShortMonthName),
                Token::Literal(" "),
                Token::Field(Field::Day),
            ]
        );
    }
}
