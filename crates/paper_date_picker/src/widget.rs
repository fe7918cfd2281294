use egui::{Align, Color32, Frame, Layout, Margin, Response, RichText, Sense, Ui, Vec2, Widget};

use crate::{DatePickerState, Page, format_year, split_heading_date};

/// Size of the whole picker in the wide layout.
pub const WIDE_SIZE: Vec2 = Vec2::new(512.0, 248.0);

/// Size of the whole picker in the narrow layout.
pub const NARROW_SIZE: Vec2 = Vec2::new(328.0, 428.0);

/// Width of the heading in the wide layout.
pub const WIDE_HEADING_WIDTH: f32 = 168.0;

/// Height of the heading in the narrow layout.
pub const NARROW_HEADING_HEIGHT: f32 = 96.0;

/// Seconds it takes a page to fade in after a page change.
pub const PAGE_FADE_TIME: f32 = 0.2;

const YEAR_SIZE: f32 = 16.0;
const DATE_SIZE: f32 = 34.0;

/// A date picker: a heading with the selected year and date, above or beside either a
/// month calendar or a list of years.
///
/// Click the year to choose a year, click the date to go back to the calendar.
/// The response is marked as changed when the user selects a date.
///
/// ```
/// # egui::__run_test_ui(|ui| {
/// # let mut state = paper_date_picker::DatePickerState::default();
/// let response = ui.add(paper_date_picker::DatePicker::new(&mut state));
/// if response.changed() {
///     println!("Selected {}", state.date());
/// }
/// # });
/// ```
#[must_use = "You should put this widget in a ui with `ui.add(widget);`"]
pub struct DatePicker<'a> {
    state: &'a mut DatePickerState,
    heading_fill: Option<Color32>,
}

impl<'a> DatePicker<'a> {
    pub fn new(state: &'a mut DatePickerState) -> Self {
        Self {
            state,
            heading_fill: None,
        }
    }

    /// Background of the heading. (Default: the selection color of the current visuals)
    #[inline]
    pub fn heading_fill(mut self, fill: Color32) -> Self {
        self.heading_fill = Some(fill);
        self
    }
}

impl Widget for DatePicker<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        let Self {
            state,
            heading_fill,
        } = self;

        state.detect_touch(ui.input(|i| i.any_touches()));
        state.set_viewport_width(ui.ctx().screen_rect().width());

        let narrow = state.narrow();
        let (size, layout) = if narrow {
            (NARROW_SIZE, Layout::top_down(Align::Min))
        } else {
            (WIDE_SIZE, Layout::left_to_right(Align::Min))
        };
        let heading_fill = heading_fill.unwrap_or(ui.visuals().selection.bg_fill);
        let date_before = state.date();

        let mut response = ui
            .allocate_ui_with_layout(size, layout, |ui| {
                ui.set_min_size(size);
                ui.spacing_mut().item_spacing = Vec2::ZERO;
                heading_ui(ui, state, narrow, heading_fill);
                page_ui(ui, state);
            })
            .response;

        if state.observe_container(response.rect.size()) && state.handle_resize() {
            ui.ctx().request_repaint();
        }
        if state.date() != date_before {
            response.mark_changed();
        }
        response
    }
}

fn heading_ui(ui: &mut Ui, state: &mut DatePickerState, narrow: bool, fill: Color32) {
    let (size, margin) = if narrow {
        (
            Vec2::new(ui.available_width(), NARROW_HEADING_HEIGHT),
            Margin::symmetric(24, 16),
        )
    } else {
        (
            Vec2::new(WIDE_HEADING_WIDTH, ui.available_height()),
            Margin::same(16),
        )
    };
    let inner_size = size - margin.sum();

    let page = state.page();
    let visuals = ui.visuals();
    let (active, inactive) = (visuals.strong_text_color(), visuals.weak_text_color());
    let (year_color, date_color) = match page {
        Page::ChooseDate => (inactive, active),
        Page::ChooseYear => (active, inactive),
    };

    let calendar = state.calendar();
    let year = format_year(calendar, Some(state.date()), state.locale());
    let segments = split_heading_date(
        calendar,
        state.date(),
        state.heading_format(),
        state.locale(),
        state.heading_break(),
    );

    let (mut year_tapped, mut date_tapped) = (false, false);
    Frame::new().fill(fill).inner_margin(margin).show(ui, |ui| {
        ui.set_min_size(inner_size);
        ui.set_max_size(inner_size);
        ui.vertical(|ui| {
            let year = egui::Label::new(RichText::new(year).size(YEAR_SIZE).color(year_color))
                .sense(Sense::click())
                .selectable(false);
            year_tapped = ui.add(year).clicked();

            ui.add_space(2.0);
            ui.horizontal_wrapped(|ui| {
                for segment in segments {
                    let segment = egui::Label::new(
                        RichText::new(segment)
                            .size(DATE_SIZE)
                            .strong()
                            .color(date_color),
                    )
                    .sense(Sense::click())
                    .selectable(false)
                    .wrap_mode(egui::TextWrapMode::Extend);
                    date_tapped |= ui.add(segment).clicked();
                }
            });
        });
    });

    if year_tapped {
        state.tap_heading_year();
    }
    if date_tapped {
        state.tap_heading_date();
    }
}

fn page_ui(ui: &mut Ui, state: &mut DatePickerState) {
    let (date, bounds) = (state.date(), state.bounds());
    Frame::new()
        .fill(ui.visuals().extreme_bg_color)
        .inner_margin(Margin::same(8))
        .show(ui, |ui| {
            ui.set_min_size(ui.available_size());
            let opacity = page_opacity(ui, state.page());
            ui.set_opacity(opacity);
            match state.page() {
                Page::ChooseDate => {
                    let locale = state.locale().to_owned();
                    if let Some(picked) = state.calendar_mut().ui(ui, date, bounds, &locale) {
                        state.set_date(picked);
                    }
                }
                Page::ChooseYear => {
                    if let Some(picked) = state.year_list_mut().ui(ui, date, bounds) {
                        state.set_date(picked);
                        state.tap_heading_date();
                    }
                }
            }
        });
}

/// Opacity of the `active` page, from 0 to 1.
///
/// Both pages are animated every frame so that a newly selected page fades in.
fn page_opacity(ui: &Ui, active: Page) -> f32 {
    let mut opacity = 1.0;
    for page in [Page::ChooseDate, Page::ChooseYear] {
        let id = ui.id().with("paper_page").with(page.id());
        let shown = ui.ctx().animate_bool_with_time(id, page == active, PAGE_FADE_TIME);
        if page == active {
            opacity = shown;
        }
    }
    opacity
}
