//! The picker state, its host-settable properties, and change notifications.

use std::fmt;

use chrono::{Datelike as _, NaiveDate};

use crate::{
    CalendarView as _, CssLength, DateBounds, HeadingBreak, LayoutMode, MediaQuery,
    MonthCalendar, Page, PageSelected, PageSelector, ParseLengthError, Resizable,
    ResizeCoordinator, YearList, YearListView as _,
    heading::{DEFAULT_HEADING_BREAK, DEFAULT_HEADING_FORMAT},
    resolve_layout,
};

/// Everything a host can set on a picker, as plain data.
///
/// ```
/// use paper_date_picker::{DatePickerConfig, DatePickerState};
///
/// let config = DatePickerConfig {
///     responsive_width: "40em".to_owned(),
///     ..Default::default()
/// };
/// let today = chrono::NaiveDate::from_ymd_opt(2015, 4, 20).unwrap();
/// let state = DatePickerState::from_config(&config, today).unwrap();
/// assert_eq!(state.responsive_width().points(), 640.0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DatePickerConfig {
    /// Earliest selectable date.
    pub min_date: Option<NaiveDate>,

    /// Latest selectable date.
    pub max_date: Option<NaiveDate>,

    /// Locale used for all month and weekday names, e.g. `"en"` or `"fr-CA"`.
    pub locale: String,

    /// Pattern for the heading date. See [`crate::date_format`].
    pub heading_format: String,

    /// Regular expression the heading date is split after.
    pub heading_break: String,

    /// Screen width at or below which the narrow layout is used, e.g. `"560px"`.
    pub responsive_width: String,

    /// Always use the narrow layout.
    pub force_narrow: bool,

    /// Show ISO week numbers in the calendar.
    pub calendar_week: bool,
}

impl Default for DatePickerConfig {
    fn default() -> Self {
        Self {
            min_date: None,
            max_date: None,
            locale: "en".to_owned(),
            heading_format: DEFAULT_HEADING_FORMAT.to_owned(),
            heading_break: DEFAULT_HEADING_BREAK.to_owned(),
            responsive_width: CssLength::default().to_string(),
            force_narrow: false,
            calendar_week: false,
        }
    }
}

/// A [`DatePickerConfig`] could not be applied.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    InvalidLength(#[from] ParseLengthError),

    #[error("invalid heading break pattern: {0}")]
    InvalidHeadingBreak(#[from] regex::Error),
}

/// Sent to listeners registered with [`DatePickerState::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notification {
    /// The selected date changed, by the user or by [`DatePickerState::set_date`].
    DateChanged(NaiveDate),

    /// The layout switched between narrow (`true`) and wide (`false`).
    NarrowChanged(bool),

    /// The picker switched to another page.
    PageSelected(Page),
}

/// Handle for removing a listener again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&Notification)>;

/// State of one date picker.
///
/// Setters update the derived values ([`Self::narrow`], [`Self::min_year`], …)
/// before returning, and notify listeners of the changes.
pub struct DatePickerState {
    today: NaiveDate,
    date: NaiveDate,
    bounds: DateBounds,
    locale: String,
    heading_format: String,
    heading_break: HeadingBreak,
    responsive_width: CssLength,
    force_narrow: bool,

    viewport_width: Option<f32>,
    query_matches: bool,
    narrow: bool,
    is_touch: bool,

    pages: PageSelector,
    calendar: MonthCalendar,
    year_list: YearList,
    resize: ResizeCoordinator,
    restyles: u64,
    container_size: Option<egui::Vec2>,

    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

impl Default for DatePickerState {
    /// Selects today's date.
    fn default() -> Self {
        Self::new(chrono::Local::now().date_naive())
    }
}

impl fmt::Debug for DatePickerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatePickerState")
            .field("date", &self.date)
            .field("bounds", &self.bounds)
            .field("locale", &self.locale)
            .field("heading_format", &self.heading_format)
            .field("heading_break", &self.heading_break.as_str())
            .field("responsive_width", &self.responsive_width)
            .field("force_narrow", &self.force_narrow)
            .field("narrow", &self.narrow)
            .field("page", &self.pages.page())
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl DatePickerState {
    /// A picker with `today` selected and the default configuration.
    pub fn new(today: NaiveDate) -> Self {
        let config = DatePickerConfig::default();
        Self {
            today,
            date: today,
            bounds: DateBounds::UNBOUNDED,
            locale: config.locale,
            heading_format: config.heading_format,
            heading_break: HeadingBreak::default(),
            responsive_width: CssLength::default(),
            force_narrow: false,

            viewport_width: None,
            query_matches: false,
            narrow: false,
            is_touch: false,

            pages: PageSelector::default(),
            calendar: MonthCalendar::new(today, today),
            year_list: YearList::default(),
            resize: ResizeCoordinator::default(),
            restyles: 0,
            container_size: None,

            listeners: vec![],
            next_listener: 0,
        }
    }

    /// # Errors
    /// If the responsive width or the heading break in `config` cannot be parsed.
    pub fn from_config(config: &DatePickerConfig, today: NaiveDate) -> Result<Self, ConfigError> {
        let mut state = Self::new(today);
        state.apply_config(config)?;
        Ok(state)
    }

    /// Set every property in `config`.
    ///
    /// # Errors
    /// If the responsive width or the heading break cannot be parsed.
    /// Nothing is changed in that case.
    pub fn apply_config(&mut self, config: &DatePickerConfig) -> Result<(), ConfigError> {
        let responsive_width = config.responsive_width.parse::<CssLength>()?;
        let heading_break = HeadingBreak::new(&config.heading_break)?;

        self.set_min_date(config.min_date);
        self.set_max_date(config.max_date);
        self.set_locale(config.locale.clone());
        self.set_heading_format(config.heading_format.clone());
        self.heading_break = heading_break;
        self.responsive_width = responsive_width;
        self.force_narrow = config.force_narrow;
        self.set_calendar_week(config.calendar_week);
        self.update_layout();
        Ok(())
    }

    /// The current properties as a [`DatePickerConfig`].
    pub fn config(&self) -> DatePickerConfig {
        DatePickerConfig {
            min_date: self.bounds.min,
            max_date: self.bounds.max,
            locale: self.locale.clone(),
            heading_format: self.heading_format.clone(),
            heading_break: self.heading_break.to_string(),
            responsive_width: self.responsive_width.to_string(),
            force_narrow: self.force_narrow,
            calendar_week: self.calendar.shows_calendar_week(),
        }
    }

    // ------------------------------------------------------------------------
    // Properties

    #[inline]
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// The selected date.
    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Select `date`, and show its month in the calendar.
    ///
    /// The date is not checked against the bounds.
    pub fn set_date(&mut self, date: NaiveDate) {
        if date == self.date {
            return;
        }
        self.date = date;
        self.calendar.show_month(date.year(), date.month());
        self.emit(Notification::DateChanged(date));
    }

    #[inline]
    pub fn bounds(&self) -> DateBounds {
        self.bounds
    }

    #[inline]
    pub fn min_date(&self) -> Option<NaiveDate> {
        self.bounds.min
    }

    pub fn set_min_date(&mut self, min_date: Option<NaiveDate>) {
        self.bounds.min = min_date;
        self.year_list
            .set_year_bounds(self.bounds.min_year(), self.bounds.max_year());
    }

    #[inline]
    pub fn max_date(&self) -> Option<NaiveDate> {
        self.bounds.max
    }

    pub fn set_max_date(&mut self, max_date: Option<NaiveDate>) {
        self.bounds.max = max_date;
        self.year_list
            .set_year_bounds(self.bounds.min_year(), self.bounds.max_year());
    }

    /// Year of [`Self::min_date`].
    #[inline]
    pub fn min_year(&self) -> Option<i32> {
        self.bounds.min_year()
    }

    /// Year of [`Self::max_date`].
    #[inline]
    pub fn max_year(&self) -> Option<i32> {
        self.bounds.max_year()
    }

    #[inline]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn set_locale(&mut self, locale: impl Into<String>) {
        self.locale = locale.into();
    }

    #[inline]
    pub fn heading_format(&self) -> &str {
        &self.heading_format
    }

    pub fn set_heading_format(&mut self, heading_format: impl Into<String>) {
        self.heading_format = heading_format.into();
    }

    #[inline]
    pub fn heading_break(&self) -> &HeadingBreak {
        &self.heading_break
    }

    /// # Errors
    /// If `pattern` is not a valid regular expression. The previous pattern is kept.
    pub fn set_heading_break(&mut self, pattern: &str) -> Result<(), regex::Error> {
        self.heading_break = HeadingBreak::new(pattern)?;
        Ok(())
    }

    #[inline]
    pub fn responsive_width(&self) -> CssLength {
        self.responsive_width
    }

    /// # Errors
    /// If `width` is not a CSS length such as `"560px"`. The previous width is kept.
    pub fn set_responsive_width(&mut self, width: &str) -> Result<(), ParseLengthError> {
        self.responsive_width = width.parse()?;
        self.update_layout();
        Ok(())
    }

    #[inline]
    pub fn force_narrow(&self) -> bool {
        self.force_narrow
    }

    pub fn set_force_narrow(&mut self, force_narrow: bool) {
        self.force_narrow = force_narrow;
        self.update_layout();
    }

    #[inline]
    pub fn calendar_week(&self) -> bool {
        self.calendar.shows_calendar_week()
    }

    /// Show ISO week numbers in front of each calendar week.
    pub fn set_calendar_week(&mut self, calendar_week: bool) {
        if calendar_week != self.calendar.shows_calendar_week() {
            self.calendar.set_calendar_week(calendar_week);
            // The cells must shrink or grow to fit the extra column.
            self.container_size = None;
        }
    }

    /// Width of the screen, in points. Unknown until the picker is first shown.
    #[inline]
    pub fn viewport_width(&self) -> Option<f32> {
        self.viewport_width
    }

    pub fn set_viewport_width(&mut self, width: f32) {
        if self.viewport_width != Some(width) {
            self.viewport_width = Some(width);
            self.update_layout();
        }
    }

    /// The query deciding the layout from the viewport width.
    pub fn media_query(&self) -> MediaQuery {
        MediaQuery::new(self.force_narrow, self.responsive_width)
    }

    /// Does the viewport match [`Self::media_query`]?
    #[inline]
    pub fn query_matches(&self) -> bool {
        self.query_matches
    }

    /// Is the narrow layout in use?
    #[inline]
    pub fn narrow(&self) -> bool {
        self.narrow
    }

    #[inline]
    pub fn layout_mode(&self) -> LayoutMode {
        LayoutMode::from(self.narrow)
    }

    /// Has a touch screen been used with this picker?
    #[inline]
    pub fn is_touch(&self) -> bool {
        self.is_touch
    }

    /// Record whether a touch device is in use.
    ///
    /// Once a touch device has been seen the picker stays in touch mode,
    /// and the year list hides its scroll bar.
    pub fn detect_touch(&mut self, touching: bool) {
        if touching && !self.is_touch {
            log::debug!("Touch screen detected");
            self.is_touch = true;
            self.year_list.set_hide_scroll_bar(true);
        }
    }

    fn update_layout(&mut self) {
        let query = self.media_query();
        self.query_matches = match self.viewport_width {
            Some(width) => query.matches(width),
            None => query == MediaQuery::Always,
        };

        let narrow = resolve_layout(self.force_narrow, self.query_matches).is_narrow();
        if narrow != self.narrow {
            self.narrow = narrow;
            self.emit(Notification::NarrowChanged(narrow));
        }
    }

    // ------------------------------------------------------------------------
    // Pages

    #[inline]
    pub fn page(&self) -> Page {
        self.pages.page()
    }

    #[inline]
    pub fn calendar(&self) -> &MonthCalendar {
        &self.calendar
    }

    #[inline]
    pub fn calendar_mut(&mut self) -> &mut MonthCalendar {
        &mut self.calendar
    }

    #[inline]
    pub fn year_list(&self) -> &YearList {
        &self.year_list
    }

    #[inline]
    pub fn year_list_mut(&mut self) -> &mut YearList {
        &mut self.year_list
    }

    /// The heading year was tapped. See [`PageSelector::tap_heading_year`].
    pub fn tap_heading_year(&mut self) {
        let selected = self.pages.tap_heading_year(&mut self.year_list);
        self.page_selected(selected);
    }

    /// The heading date was tapped. See [`PageSelector::tap_heading_date`].
    pub fn tap_heading_date(&mut self) {
        let selected = self.pages.tap_heading_date(self.date, &mut self.calendar);
        self.page_selected(selected);
    }

    fn page_selected(&mut self, selected: Option<PageSelected>) {
        if let Some(PageSelected { page }) = selected {
            self.emit(Notification::PageSelected(page));
            self.handle_resize();
        }
    }

    // ------------------------------------------------------------------------
    // Resizing

    /// Ask the active page to lay itself out again.
    ///
    /// Returns `false` if a resize was already being handled.
    pub fn handle_resize(&mut self) -> bool {
        let active: &mut dyn Resizable = match self.pages.page() {
            Page::ChooseDate => &mut self.calendar,
            Page::ChooseYear => &mut self.year_list,
        };
        let restyles = &mut self.restyles;
        self.resize.handle_resize(active, || *restyles += 1)
    }

    /// Number of completed resize passes.
    #[inline]
    pub fn resize_passes(&self) -> u64 {
        self.resize.passes()
    }

    /// Number of times the host was asked to restyle after a resize.
    #[inline]
    pub fn restyle_count(&self) -> u64 {
        self.restyles
    }

    /// Remember the size the picker was given. Returns `true` if it changed.
    pub(crate) fn observe_container(&mut self, size: egui::Vec2) -> bool {
        let changed = self.container_size != Some(size);
        self.container_size = Some(size);
        changed
    }

    // ------------------------------------------------------------------------
    // Listeners

    /// Call `listener` on every [`Notification`].
    pub fn subscribe(&mut self, listener: impl FnMut(&Notification) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `false` if there was no such listener.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    fn emit(&mut self, notification: Notification) {
        for (_, listener) in &mut self.listeners {
            listener(&notification);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::CalendarView as _;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
    }

    fn recorded(state: &mut DatePickerState) -> Rc<RefCell<Vec<Notification>>> {
        let log = Rc::new(RefCell::new(vec![]));
        let sink = Rc::clone(&log);
        state.subscribe(move |notification| sink.borrow_mut().push(*notification));
        log
    }

    #[test]
    fn defaults() {
        let state = DatePickerState::new(ymd(2015, 4, 20));
        assert_eq!(state.date(), ymd(2015, 4, 20));
        assert_eq!(state.locale(), "en");
        assert_eq!(state.heading_format(), "ddd, MMM D");
        assert_eq!(state.heading_break().as_str(), "[,]");
        assert_eq!(state.responsive_width().points(), 560.0);
        assert!(!state.force_narrow());
        assert!(!state.narrow());
        assert!(!state.is_touch());
        assert_eq!(state.page(), Page::ChooseDate);
        assert_eq!(state.config(), DatePickerConfig::default());
    }

    #[test]
    fn narrow_viewport() {
        let mut state = DatePickerState::new(ymd(2015, 4, 20));
        let log = recorded(&mut state);

        state.set_viewport_width(400.0);
        assert!(state.query_matches());
        assert!(state.narrow());
        assert_eq!(state.layout_mode(), LayoutMode::Narrow);

        state.set_viewport_width(1024.0);
        assert!(!state.narrow());

        assert_eq!(
            *log.borrow(),
            [
                Notification::NarrowChanged(true),
                Notification::NarrowChanged(false)
            ]
        );
    }

    #[test]
    fn force_narrow_ignores_the_viewport() {
        let mut state = DatePickerState::new(ymd(2015, 4, 20));
        state.set_force_narrow(true);
        assert!(state.narrow(), "forced before the viewport is known");

        state.set_viewport_width(4000.0);
        assert!(state.narrow());
        assert_eq!(state.media_query(), MediaQuery::Always);

        state.set_force_narrow(false);
        assert!(!state.narrow());
    }

    #[test]
    fn responsive_width_changes_the_layout() {
        let mut state = DatePickerState::new(ymd(2015, 4, 20));
        state.set_viewport_width(700.0);
        assert!(!state.narrow());

        assert!(state.set_responsive_width("800px").is_ok());
        assert!(state.narrow());

        assert!(state.set_responsive_width("0px").is_ok());
        assert!(!state.narrow());

        assert!(state.set_responsive_width("big").is_err());
        assert_eq!(state.responsive_width().points(), 0.0);
    }

    #[test]
    fn year_bounds_follow_the_date_bounds() {
        let mut state = DatePickerState::new(ymd(2015, 4, 20));
        state.set_min_date(Some(ymd(2015, 4, 1)));
        state.set_max_date(Some(ymd(2015, 6, 30)));
        assert_eq!(state.min_year(), Some(2015));
        assert_eq!(state.max_year(), Some(2015));
        assert_eq!(state.year_list().years(), 2015..=2015);

        state.set_max_date(None);
        assert_eq!(state.max_year(), None);
        assert_eq!(state.year_list().years(), 2015..=crate::DEFAULT_MAX_YEAR);
    }

    #[test]
    fn date_changes_are_notified_once() {
        let mut state = DatePickerState::new(ymd(2015, 4, 20));
        let log = recorded(&mut state);

        state.set_date(ymd(2016, 1, 2));
        state.set_date(ymd(2016, 1, 2));

        assert_eq!(*log.borrow(), [Notification::DateChanged(ymd(2016, 1, 2))]);
        assert_eq!(
            (state.calendar().current_year(), state.calendar().current_month()),
            (2016, 1)
        );
    }

    #[test]
    fn page_transitions_resize_the_new_page() {
        let mut state = DatePickerState::new(ymd(2015, 4, 20));
        let log = recorded(&mut state);

        state.tap_heading_year();
        assert_eq!(state.page(), Page::ChooseYear);
        assert_eq!(state.year_list().resize_count(), 1);
        assert!(state.year_list().is_center_pending());

        state.tap_heading_year();
        state.tap_heading_date();
        assert_eq!(state.page(), Page::ChooseDate);
        assert_eq!(state.calendar().resize_count(), 1);

        assert_eq!(state.resize_passes(), 2);
        assert_eq!(state.restyle_count(), 2);
        assert_eq!(
            *log.borrow(),
            [
                Notification::PageSelected(Page::ChooseYear),
                Notification::PageSelected(Page::ChooseDate)
            ]
        );
    }

    #[test]
    fn date_tap_on_calendar_recenters_without_notifying() {
        let mut state = DatePickerState::new(ymd(2015, 4, 20));
        let log = recorded(&mut state);
        state.calendar_mut().show_month(2010, 1);

        state.tap_heading_date();
        assert_eq!(state.page(), Page::ChooseDate);
        assert_eq!(state.calendar().current_year(), 2015);
        assert_eq!(state.calendar().current_month(), 4);
        assert!(log.borrow().is_empty());
        assert_eq!(state.resize_passes(), 0);
    }

    #[test]
    fn unsubscribe() {
        let mut state = DatePickerState::new(ymd(2015, 4, 20));
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        let id = state.subscribe(move |_| *sink.borrow_mut() += 1);

        state.set_date(ymd(2015, 4, 21));
        assert!(state.unsubscribe(id));
        assert!(!state.unsubscribe(id));
        state.set_date(ymd(2015, 4, 22));

        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn touch_mode_is_sticky() {
        let mut state = DatePickerState::new(ymd(2015, 4, 20));
        state.detect_touch(false);
        assert!(!state.is_touch());
        assert!(!state.year_list().hides_scroll_bar());

        state.detect_touch(true);
        state.detect_touch(false);
        assert!(state.is_touch());
        assert!(state.year_list().hides_scroll_bar());
    }

    #[test]
    fn calendar_week_toggles_the_week_column() {
        let mut state = DatePickerState::new(ymd(2015, 4, 20));
        assert!(state.observe_container(egui::Vec2::new(512.0, 248.0)));
        assert!(!state.observe_container(egui::Vec2::new(512.0, 248.0)));

        state.set_calendar_week(true);
        assert!(state.calendar_week());
        assert!(state.config().calendar_week);
        assert!(
            state.observe_container(egui::Vec2::new(512.0, 248.0)),
            "the next frame should lay the calendar out again"
        );
    }

    #[test]
    fn config_round_trip_and_errors() {
        let config = DatePickerConfig {
            min_date: Some(ymd(2015, 4, 1)),
            max_date: Some(ymd(2015, 6, 30)),
            locale: "fr".to_owned(),
            heading_format: "dddd D MMMM".to_owned(),
            heading_break: " ".to_owned(),
            responsive_width: "35em".to_owned(),
            force_narrow: true,
            calendar_week: true,
        };
        let state = DatePickerState::from_config(&config, ymd(2015, 4, 20));
        let state = state.unwrap_or_else(|_| DatePickerState::new(ymd(2000, 1, 1)));
        assert_eq!(state.config(), config);
        assert!(state.narrow());

        let bad_width = DatePickerConfig {
            responsive_width: "wide".to_owned(),
            ..Default::default()
        };
        assert!(matches!(
            DatePickerState::from_config(&bad_width, ymd(2015, 4, 20)),
            Err(ConfigError::InvalidLength(_))
        ));

        let bad_break = DatePickerConfig {
            heading_break: "[".to_owned(),
            ..Default::default()
        };
        let mut state = DatePickerState::new(ymd(2015, 4, 20));
        assert!(matches!(
            state.apply_config(&bad_break),
            Err(ConfigError::InvalidHeadingBreak(_))
        ));
        assert_eq!(state.config(), DatePickerConfig::default());
    }
}
