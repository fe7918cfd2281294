//! The month calendar shown on [`crate::Page::ChooseDate`].

use chrono::{Datelike as _, Duration, NaiveDate, Weekday};
use egui::{Align, Layout, RichText, Ui, Vec2};

use crate::{DateBounds, Resizable, bounds::first_of_month, format::date_format};

/// A calendar page the picker can drive.
pub trait CalendarView: Resizable {
    fn today(&self) -> NaiveDate;

    /// Year of the month being shown.
    fn current_year(&self) -> i32;

    /// Month being shown, `1..=12`.
    fn current_month(&self) -> u32;

    /// Jump to the given month.
    fn show_month(&mut self, year: i32, month: u32);

    /// Format a date for display. See [`crate::date_format`] for the pattern syntax.
    fn date_format(&self, date: NaiveDate, pattern: &str, locale: &str) -> String {
        date_format(date, pattern, locale)
    }
}

#[derive(Debug)]
pub(crate) struct Week {
    pub number: u8,
    pub days: Vec<NaiveDate>,
}

/// Whole Monday-to-Sunday weeks covering the given month.
pub(crate) fn month_data(year: i32, month: u32) -> Vec<Week> {
    let Some(first) = first_of_month(year, month) else {
        return vec![];
    };
    let mut start = first - Duration::days(first.weekday().num_days_from_monday().into());
    let mut weeks = vec![];
    let mut week = vec![];
    while start < first || start.month() == first.month() || start.weekday() != Weekday::Mon {
        week.push(start);

        if start.weekday() == Weekday::Sun {
            weeks.push(Week {
                number: start.iso_week().week() as u8,
                days: std::mem::take(&mut week),
            });
        }
        let Some(next) = start.succ_opt() else {
            break;
        };
        start = next;
    }

    weeks
}

// ----------------------------------------------------------------------------

const MIN_CELL_SIZE: f32 = 24.0;
const MAX_CELL_SIZE: f32 = 40.0;

/// Navigation row, weekday names, and up to six weeks.
const ROWS: f32 = 8.0;

/// Default [`CalendarView`]: a month grid with previous/next month buttons.
#[derive(Clone, Debug)]
pub struct MonthCalendar {
    today: NaiveDate,
    year: i32,
    month: u32,
    calendar_week: bool,

    /// Space available to the calendar the last time it was shown.
    available: Vec2,
    cell_size: f32,
    resizes: u64,
}

impl MonthCalendar {
    /// Start on the month of `date`.
    pub fn new(today: NaiveDate, date: NaiveDate) -> Self {
        Self {
            today,
            year: date.year(),
            month: date.month(),
            calendar_week: false,
            available: Vec2::new(8.0, ROWS) * MAX_CELL_SIZE,
            cell_size: MAX_CELL_SIZE,
            resizes: 0,
        }
    }

    /// Show ISO week numbers in front of each week. (Default: false)
    #[inline]
    pub fn set_calendar_week(&mut self, calendar_week: bool) {
        self.calendar_week = calendar_week;
    }

    #[inline]
    pub fn shows_calendar_week(&self) -> bool {
        self.calendar_week
    }

    /// Side of a day cell, recomputed by [`Resizable::notify_resize`].
    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Number of times the calendar was asked to lay itself out again.
    #[inline]
    pub fn resize_count(&self) -> u64 {
        self.resizes
    }

    fn step_month(&mut self, delta: i32) {
        let index = self.year * 12 + self.month as i32 - 1 + delta;
        self.year = index.div_euclid(12);
        self.month = index.rem_euclid(12) as u32 + 1;
    }

    fn month_after(&self, delta: i32) -> (i32, u32) {
        let mut copy = self.clone();
        copy.step_month(delta);
        (copy.year, copy.month)
    }

    /// Show the current month.
    ///
    /// Returns the day the user clicked, if any. Days outside `bounds` are disabled.
    pub fn ui(
        &mut self,
        ui: &mut Ui,
        selected: NaiveDate,
        bounds: DateBounds,
        locale: &str,
    ) -> Option<NaiveDate> {
        let available = ui.available_size();
        if available.x > 0.0 && available.y > 0.0 {
            self.available = available;
        }

        let mut picked = None;
        let cell = Vec2::splat(self.cell_size);
        let columns = if self.calendar_week { 8.0 } else { 7.0 };

        ui.vertical(|ui| {
            ui.spacing_mut().item_spacing = Vec2::ZERO;

            ui.horizontal(|ui| {
                let (prev_year, prev_month) = self.month_after(-1);
                if ui
                    .add_enabled(
                        bounds.overlaps_month(prev_year, prev_month),
                        egui::Button::new("⏴").frame(false),
                    )
                    .on_hover_text("Previous month")
                    .clicked()
                {
                    self.step_month(-1);
                }

                let title = first_of_month(self.year, self.month)
                    .map(|first| self.date_format(first, "MMMM YYYY", locale))
                    .unwrap_or_default();
                let arrow_width = cell.x;
                ui.allocate_ui_with_layout(
                    Vec2::new((columns * cell.x - 2.0 * arrow_width).max(0.0), cell.y),
                    Layout::centered_and_justified(egui::Direction::LeftToRight),
                    |ui| ui.strong(title),
                );

                let (next_year, next_month) = self.month_after(1);
                if ui
                    .add_enabled(
                        bounds.overlaps_month(next_year, next_month),
                        egui::Button::new("⏵").frame(false),
                    )
                    .on_hover_text("Next month")
                    .clicked()
                {
                    self.step_month(1);
                }
            });

            let weeks = month_data(self.year, self.month);

            egui::Grid::new(ui.id().with("calendar_grid"))
                .min_col_width(cell.x)
                .max_col_width(cell.x)
                .min_row_height(cell.y)
                .spacing(Vec2::ZERO)
                .show(ui, |ui| {
                    if let Some(week) = weeks.first() {
                        if self.calendar_week {
                            ui.label("");
                        }
                        for day in &week.days {
                            let name = self.date_format(*day, "dd", locale);
                            ui.with_layout(Layout::top_down(Align::Center), |ui| {
                                ui.weak(name);
                            });
                        }
                        ui.end_row();
                    }

                    for week in &weeks {
                        if self.calendar_week {
                            ui.weak(week.number.to_string());
                        }
                        for &day in &week.days {
                            if day.month() != self.month {
                                ui.label("");
                                continue;
                            }
                            let mut text = RichText::new(day.day().to_string());
                            if day == self.today {
                                text = text.strong().color(ui.visuals().hyperlink_color);
                            }
                            let button = egui::Button::selectable(day == selected, text);
                            let enabled = bounds.contains(day);
                            let response = ui
                                .add_enabled_ui(enabled, |ui| ui.add_sized(cell, button))
                                .inner;
                            if response.clicked() {
                                picked = Some(day);
                            }
                        }
                        ui.end_row();
                    }
                });
        });

        if let Some(day) = picked {
            self.year = day.year();
            self.month = day.month();
        }
        picked
    }
}

impl Resizable for MonthCalendar {
    fn notify_resize(&mut self) {
        self.resizes += 1;
        let columns = if self.calendar_week { 8.0 } else { 7.0 };
        let fit = (self.available.x / columns).min(self.available.y / ROWS);
        self.cell_size = fit.clamp(MIN_CELL_SIZE, MAX_CELL_SIZE);
    }
}

impl CalendarView for MonthCalendar {
    fn today(&self) -> NaiveDate {
        self.today
    }

    fn current_year(&self) -> i32 {
        self.year
    }

    fn current_month(&self) -> u32 {
        self.month
    }

    fn show_month(&mut self, year: i32, month: u32) {
        if (1..=12).contains(&month) {
            self.year = year;
            self.month = month;
        } else {
            log::debug!("Ignoring invalid month {month}");
        }
    }
}
