//! A responsive Material Design date picker for [`egui`](https://github.com/emilk/egui).
//!
//! Keep a [`DatePickerState`] in your app and show it with [`DatePicker`]:
//!
//! ```
//! # egui::__run_test_ui(|ui| {
//! # let mut state = paper_date_picker::DatePickerState::default();
//! ui.add(paper_date_picker::DatePicker::new(&mut state));
//! # });
//! ```
//!
//! The picker has a heading with the selected year and date, and two pages:
//! a month calendar ([`Page::ChooseDate`]) and a list of years ([`Page::ChooseYear`]).
//! Clicking the year shows the year list, clicking the date goes back to the calendar.
//!
//! When the screen is at most [`DatePickerState::responsive_width`] wide, or if
//! [`DatePickerState::set_force_narrow`] is set, the heading is put above the page
//! instead of beside it.
//!
//! Use [`DatePickerState::subscribe`] to be told about date, layout and page changes.
//!
//! ## Feature flags
#![cfg_attr(feature = "document-features", doc = document_features::document_features!())]
//!

#![allow(clippy::float_cmp)]
#![forbid(unsafe_code)]

mod bounds;
mod calendar;
mod format;
mod heading;
mod layout;
mod page;
mod resize;
mod state;
mod widget;
mod year_list;

pub use crate::{
    bounds::DateBounds,
    calendar::{CalendarView, MonthCalendar},
    format::{date_format, resolve_locale},
    heading::{
        DEFAULT_HEADING_BREAK, DEFAULT_HEADING_FORMAT, HeadingBreak, YEAR_FORMAT, format_year,
        split_heading_date,
    },
    layout::{CssLength, LayoutMode, MediaQuery, POINTS_PER_EM, ParseLengthError, resolve_layout},
    page::{Page, PageSelected, PageSelector},
    resize::{Resizable, ResizeCoordinator},
    state::{ConfigError, DatePickerConfig, DatePickerState, ListenerId, Notification},
    widget::{
        DatePicker, NARROW_HEADING_HEIGHT, NARROW_SIZE, PAGE_FADE_TIME, WIDE_HEADING_WIDTH,
        WIDE_SIZE,
    },
    year_list::{DEFAULT_MAX_YEAR, DEFAULT_MIN_YEAR, YearList, YearListView},
};
