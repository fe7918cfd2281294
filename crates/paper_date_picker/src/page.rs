use chrono::{Datelike as _, NaiveDate};

use crate::{CalendarView, YearListView};

/// The two pages of the picker. Exactly one is shown at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Page {
    /// The month calendar.
    #[default]
    ChooseDate,

    /// The list of years.
    ChooseYear,
}

impl Page {
    /// Stable identifier, e.g. for persisting or styling.
    pub fn id(self) -> &'static str {
        match self {
            Self::ChooseDate => "chooseDate",
            Self::ChooseYear => "chooseYear",
        }
    }

    /// Presentation token for the heading of this page: `pg-chooseDate` or `pg-chooseYear`.
    pub fn class_token(self) -> &'static str {
        match self {
            Self::ChooseDate => "pg-chooseDate",
            Self::ChooseYear => "pg-chooseYear",
        }
    }
}

/// Emitted every time the [`PageSelector`] changes page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageSelected {
    pub page: Page,
}

/// Tracks which [`Page`] is active, and reacts to taps on the heading.
#[derive(Clone, Debug, Default)]
pub struct PageSelector {
    page: Page,
}

impl PageSelector {
    #[inline]
    pub fn page(&self) -> Page {
        self.page
    }

    /// The year was tapped.
    ///
    /// Switches to [`Page::ChooseYear`] and centers the year list on the selected year.
    /// Does nothing if the year list is already showing.
    pub fn tap_heading_year(&mut self, year_list: &mut dyn YearListView) -> Option<PageSelected> {
        if self.page == Page::ChooseYear {
            return None;
        }
        let selected = self.select(Page::ChooseYear);
        year_list.center_selected();
        Some(selected)
    }

    /// The date was tapped.
    ///
    /// Switches back to [`Page::ChooseDate`].
    /// If the calendar is already showing, it jumps back to the month of `date` instead.
    pub fn tap_heading_date(
        &mut self,
        date: NaiveDate,
        calendar: &mut dyn CalendarView,
    ) -> Option<PageSelected> {
        if self.page == Page::ChooseDate {
            calendar.show_month(date.year(), date.month());
            return None;
        }
        Some(self.select(Page::ChooseDate))
    }

    fn select(&mut self, page: Page) -> PageSelected {
        log::debug!("Page {} -> {}", self.page.id(), page.id());
        self.page = page;
        PageSelected { page }
    }
}
