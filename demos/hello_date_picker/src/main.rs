#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release
#![allow(rustdoc::missing_crate_level_docs)] // it's an example

use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use chrono::NaiveDate;
use eframe::egui;
use paper_date_picker::{DatePicker, DatePickerConfig, DatePickerState, Notification};

const MAX_EVENTS: usize = 12;

fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([900.0, 520.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Date picker",
        options,
        Box::new(|_cc| Ok(Box::<MyApp>::default())),
    )
}

/// The config fields as the user is typing them.
struct ConfigForm {
    min_date: String,
    max_date: String,
    config: DatePickerConfig,
    error: Option<String>,
}

impl ConfigForm {
    fn new(config: DatePickerConfig) -> Self {
        Self {
            min_date: config.min_date.map(|d| d.to_string()).unwrap_or_default(),
            max_date: config.max_date.map(|d| d.to_string()).unwrap_or_default(),
            config,
            error: None,
        }
    }

    fn parsed(&self) -> Result<DatePickerConfig, String> {
        let parse = |text: &str| -> Result<Option<NaiveDate>, String> {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .map(Some)
                .map_err(|err| format!("{text:?}: {err}"))
        };
        Ok(DatePickerConfig {
            min_date: parse(&self.min_date)?,
            max_date: parse(&self.max_date)?,
            ..self.config.clone()
        })
    }
}

struct MyApp {
    picker: DatePickerState,
    form: ConfigForm,

    /// Filled in by the picker listener.
    events: Rc<RefCell<VecDeque<String>>>,
}

impl Default for MyApp {
    fn default() -> Self {
        let mut picker = DatePickerState::default();
        let events = Rc::new(RefCell::new(VecDeque::new()));

        let sink = Rc::clone(&events);
        picker.subscribe(move |notification| {
            let text = match notification {
                Notification::DateChanged(date) => format!("date = {date}"),
                Notification::NarrowChanged(narrow) => format!("narrow = {narrow}"),
                Notification::PageSelected(page) => format!("page = {}", page.id()),
            };
            log::debug!("{text}");
            let mut events = sink.borrow_mut();
            events.push_front(text);
            events.truncate(MAX_EVENTS);
        });

        Self {
            form: ConfigForm::new(picker.config()),
            picker,
            events,
        }
    }
}

impl eframe::App for MyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::right("config").show(ctx, |ui| {
            ui.heading("Config");
            self.config_ui(ui);

            ui.separator();
            ui.heading("Events");
            for event in self.events.borrow().iter() {
                ui.monospace(event);
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.label(format!("Selected: {}", self.picker.date()));
            ui.add_space(8.0);
            ui.add(DatePicker::new(&mut self.picker));
        });
    }
}

impl MyApp {
    fn config_ui(&mut self, ui: &mut egui::Ui) {
        let form = &mut self.form;
        egui::Grid::new("config_grid").num_columns(2).show(ui, |ui| {
            ui.label("Min date");
            ui.text_edit_singleline(&mut form.min_date);
            ui.end_row();

            ui.label("Max date");
            ui.text_edit_singleline(&mut form.max_date);
            ui.end_row();

            ui.label("Locale");
            ui.text_edit_singleline(&mut form.config.locale);
            ui.end_row();

            ui.label("Heading format");
            ui.text_edit_singleline(&mut form.config.heading_format);
            ui.end_row();

            ui.label("Heading break");
            ui.text_edit_singleline(&mut form.config.heading_break);
            ui.end_row();

            ui.label("Responsive width");
            ui.text_edit_singleline(&mut form.config.responsive_width);
            ui.end_row();

            ui.label("Force narrow");
            ui.checkbox(&mut form.config.force_narrow, "");
            ui.end_row();

            ui.label("Week numbers");
            ui.checkbox(&mut form.config.calendar_week, "");
            ui.end_row();
        });

        if ui.button("Apply").clicked() {
            form.error = match form.parsed() {
                Ok(config) => self.picker.apply_config(&config).err().map(|err| err.to_string()),
                Err(err) => Some(err),
            };
        }
        if let Some(error) = &form.error {
            ui.colored_label(ui.visuals().error_fg_color, error);
        }
    }
}
