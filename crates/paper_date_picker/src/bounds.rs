use chrono::{Datelike as _, NaiveDate};

/// Optional inclusive limits on the selectable dates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct DateBounds {
    pub min: Option<NaiveDate>,
    pub max: Option<NaiveDate>,
}

impl DateBounds {
    pub const UNBOUNDED: Self = Self {
        min: None,
        max: None,
    };

    pub fn new(min: Option<NaiveDate>, max: Option<NaiveDate>) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.min.is_none_or(|min| min <= date) && self.max.is_none_or(|max| date <= max)
    }

    /// The closest date to `date` within the bounds.
    ///
    /// If `min > max` the lower bound wins.
    pub fn clamp(&self, date: NaiveDate) -> NaiveDate {
        let date = self.max.map_or(date, |max| date.min(max));
        self.min.map_or(date, |min| date.max(min))
    }

    /// Year of the lower bound.
    pub fn min_year(&self) -> Option<i32> {
        self.min.map(|date| date.year())
    }

    /// Year of the upper bound.
    pub fn max_year(&self) -> Option<i32> {
        self.max.map(|date| date.year())
    }

    /// Does any day of the given month fall within the bounds?
    pub fn overlaps_month(&self, year: i32, month: u32) -> bool {
        let (Some(first), Some(last)) = (first_of_month(year, month), last_of_month(year, month))
        else {
            return false;
        };
        self.min.is_none_or(|min| min <= last) && self.max.is_none_or(|max| first <= max)
    }
}

pub(crate) fn first_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

pub(crate) fn last_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    first_of_month(next_year, next_month)?.pred_opt()
}

/// `date` moved to `year`, keeping month and day. February 29th becomes the 28th in common years.
pub(crate) fn with_year(date: NaiveDate, year: i32) -> Option<NaiveDate> {
    date.with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, date.month(), 28))
}
