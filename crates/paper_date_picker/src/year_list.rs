//! The scrolling list of years shown on [`crate::Page::ChooseYear`].

use std::ops::RangeInclusive;

use chrono::{Datelike as _, NaiveDate};
use egui::{Align, Layout, RichText, ScrollArea, Ui, scroll_area::ScrollBarVisibility};

use crate::{DateBounds, Resizable, bounds::with_year};

/// First year shown when there is no lower date bound.
pub const DEFAULT_MIN_YEAR: i32 = 1900;

/// Last year shown when there is no upper date bound.
pub const DEFAULT_MAX_YEAR: i32 = 2100;

const ROW_HEIGHT: f32 = 36.0;

/// A year list page the picker can drive.
pub trait YearListView: Resizable {
    /// Scroll so that the selected year is in the middle of the list.
    fn center_selected(&mut self);

    /// Limit the listed years. `None` means the default limit.
    fn set_year_bounds(&mut self, min: Option<i32>, max: Option<i32>);
}

/// Default [`YearListView`].
#[derive(Clone, Debug)]
pub struct YearList {
    min: Option<i32>,
    max: Option<i32>,
    center_pending: bool,
    hide_scroll_bar: bool,
    resizes: u64,
}

impl Default for YearList {
    fn default() -> Self {
        Self {
            min: None,
            max: None,
            center_pending: true,
            hide_scroll_bar: false,
            resizes: 0,
        }
    }
}

impl YearList {
    /// The years shown, lowest first.
    pub fn years(&self) -> RangeInclusive<i32> {
        let min = self.min.unwrap_or(DEFAULT_MIN_YEAR);
        let max = self.max.unwrap_or(DEFAULT_MAX_YEAR).max(min);
        min..=max
    }

    /// Hide the scroll bar, e.g. on touch screens. (Default: false)
    #[inline]
    pub fn set_hide_scroll_bar(&mut self, hide: bool) {
        self.hide_scroll_bar = hide;
    }

    #[inline]
    pub fn hides_scroll_bar(&self) -> bool {
        self.hide_scroll_bar
    }

    /// Is a [`YearListView::center_selected`] waiting for the next frame?
    #[inline]
    pub fn is_center_pending(&self) -> bool {
        self.center_pending
    }

    /// Number of times the list was asked to lay itself out again.
    #[inline]
    pub fn resize_count(&self) -> u64 {
        self.resizes
    }

    /// `selected` moved to `year`, then clamped to `bounds`.
    pub fn date_in_year(selected: NaiveDate, year: i32, bounds: DateBounds) -> NaiveDate {
        with_year(selected, year).map_or(selected, |date| bounds.clamp(date))
    }

    /// Show the list.
    ///
    /// Returns the new date if the user clicked a year.
    pub fn ui(
        &mut self,
        ui: &mut Ui,
        selected: NaiveDate,
        bounds: DateBounds,
    ) -> Option<NaiveDate> {
        let mut picked = None;
        let visibility = if self.hide_scroll_bar {
            ScrollBarVisibility::AlwaysHidden
        } else {
            ScrollBarVisibility::VisibleWhenNeeded
        };

        ScrollArea::vertical()
            .id_salt("paper_year_list")
            .auto_shrink([false, false])
            .animated(false)
            .scroll_bar_visibility(visibility)
            .show(ui, |ui| {
                ui.with_layout(Layout::top_down_justified(Align::Center), |ui| {
                    for year in self.years() {
                        let is_selected = year == selected.year();
                        let mut text = RichText::new(year.to_string());
                        text = if is_selected {
                            text.heading().strong().color(ui.visuals().selection.stroke.color)
                        } else {
                            text.size(16.0)
                        };
                        let response = ui.add_sized(
                            [ui.available_width(), ROW_HEIGHT],
                            egui::Button::new(text).frame(false),
                        );
                        if is_selected && self.center_pending {
                            response.scroll_to_me(Some(Align::Center));
                            self.center_pending = false;
                        }
                        if response.clicked() {
                            picked = Some(Self::date_in_year(selected, year, bounds));
                        }
                    }
                });
            });

        // The selected year may be outside the list, in which case there is nothing to center.
        self.center_pending = false;
        picked
    }
}

impl Resizable for YearList {
    fn notify_resize(&mut self) {
        self.resizes += 1;
        // The viewport changed, center again on the next frame.
        self.center_pending = true;
    }
}

impl YearListView for YearList {
    fn center_selected(&mut self) {
        self.center_pending = true;
    }

    fn set_year_bounds(&mut self, min: Option<i32>, max: Option<i32>) {
        self.min = min;
        self.max = max;
    }
}
