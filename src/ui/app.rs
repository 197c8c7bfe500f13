use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::{DateTime, Local};
use eframe::egui::{self, Align, Color32, Layout, RichText, ScrollArea, TextEdit, Ui};

use crate::clock::{Ticker, WallClock};
use crate::format::{DATE_PLACEHOLDER, TIME_PLACEHOLDER, format_date, format_time};
use crate::offset::{DayPolicy, DurationFields, Slot, apply_offset};
use crate::settings::Settings;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ViewKind {
    Single,
    Multi,
}

pub fn run_gui(clock: Box<dyn WallClock>, settings: Settings, view: ViewKind) -> Result<()> {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("OffsetClock")
            .with_inner_size([980.0, 700.0])
            .with_min_inner_size([720.0, 520.0]),
        ..Default::default()
    };

    let app = OffsetApp::new(clock, settings, view);

    eframe::run_native(
        "OffsetClock",
        native_options,
        Box::new(move |cc| {
            configure_theme(&cc.egui_ctx);
            Ok(Box::new(app))
        }),
    )
    .map_err(|err| anyhow::anyhow!("failed to launch OffsetClock GUI: {err}"))?;

    Ok(())
}

fn configure_theme(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::dark();
    visuals.override_text_color = Some(Color32::from_rgb(222, 232, 240));
    visuals.panel_fill = Color32::from_rgb(13, 17, 26);
    visuals.window_fill = Color32::from_rgb(17, 22, 33);
    visuals.widgets.noninteractive.bg_fill = Color32::from_rgb(15, 20, 30);
    visuals.widgets.inactive.bg_fill = Color32::from_rgb(22, 28, 42);
    visuals.widgets.hovered.bg_fill = Color32::from_rgb(33, 46, 66);
    visuals.widgets.active.bg_fill = Color32::from_rgb(44, 66, 94);
    visuals.selection.bg_fill = Color32::from_rgb(58, 134, 183);
    ctx.set_visuals(visuals);
}

pub struct OffsetApp {
    clock: Box<dyn WallClock>,
    ticker: Ticker,
    settings: Settings,
    view: ViewKind,
    now: Option<DateTime<Local>>,
    single: DurationFields,
    slots: Vec<Slot>,
}

impl OffsetApp {
    pub fn new(clock: Box<dyn WallClock>, settings: Settings, view: ViewKind) -> Self {
        let ticker = Ticker::new(Duration::from_millis(settings.tick_interval_ms));
        let slots = vec![Slot::default(); settings.slot_count];
        Self {
            clock,
            ticker,
            settings,
            view,
            now: None,
            single: DurationFields::default(),
            slots,
        }
    }

    /// One cooperative step: the first call takes the initial sample, later
    /// calls resample only when the ticker deadline has passed. Returns
    /// whether "now" was refreshed.
    pub fn advance(&mut self, at: Instant) -> bool {
        if self.now.is_none() || self.ticker.poll(at) {
            self.now = Some(self.clock.now());
            return true;
        }
        false
    }

    /// Entering a view discards the other view's entered state; nothing
    /// survives navigation.
    pub fn switch_view(&mut self, next: ViewKind) {
        if next == self.view {
            return;
        }
        match self.view {
            ViewKind::Single => self.single = DurationFields::default(),
            ViewKind::Multi => {
                self.slots = vec![Slot::default(); self.settings.slot_count];
            }
        }
        self.view = next;
    }

    pub fn display_time(&self) -> String {
        match &self.now {
            Some(now) => format_time(now),
            None => TIME_PLACEHOLDER.to_string(),
        }
    }

    pub fn display_date(&self) -> String {
        match &self.now {
            Some(now) => format_date(now),
            None => DATE_PLACEHOLDER.to_string(),
        }
    }

    pub fn single_result(&self) -> Option<DateTime<Local>> {
        let now = self.now?;
        Some(apply_offset(
            now,
            self.single.duration_ms(DayPolicy::IncludeDays),
        ))
    }

    /// All slot results for the current frame, derived from the one shared
    /// "now" sample so slots never skew within a tick.
    pub fn slot_results(&self) -> Vec<Option<DateTime<Local>>> {
        let now = self.now;
        let policy = self.settings.slot_day_policy();
        self.slots
            .iter()
            .map(|slot| now.map(|now| apply_offset(now, slot.slot_ms(policy))))
            .collect()
    }

    fn show_header(&mut self, ui: &mut Ui) {
        ui.horizontal_wrapped(|ui| {
            ui.label(
                RichText::new("OffsetClock")
                    .size(24.0)
                    .color(Color32::from_rgb(96, 228, 206))
                    .strong(),
            );
            ui.separator();
            if ui
                .selectable_label(self.view == ViewKind::Single, "Single")
                .clicked()
            {
                self.switch_view(ViewKind::Single);
            }
            if ui
                .selectable_label(self.view == ViewKind::Multi, "Multi Slots")
                .clicked()
            {
                self.switch_view(ViewKind::Multi);
            }
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                ui.label(
                    RichText::new(self.display_time())
                        .size(20.0)
                        .monospace()
                        .color(Color32::from_rgb(255, 214, 117))
                        .strong(),
                );
                ui.label(
                    RichText::new("Current Time")
                        .size(12.0)
                        .color(Color32::from_rgb(161, 180, 201)),
                );
            });
        });
    }

    fn show_single_view(&mut self, ui: &mut Ui) {
        ui.heading(
            RichText::new("Current Time")
                .color(Color32::from_rgb(104, 221, 205))
                .strong(),
        );
        ui.label(
            RichText::new(self.display_time())
                .size(48.0)
                .monospace()
                .strong(),
        );
        ui.label(
            RichText::new(self.display_date())
                .monospace()
                .color(Color32::from_rgb(161, 180, 201)),
        );
        ui.add_space(12.0);

        ui.heading(
            RichText::new("Duration")
                .color(Color32::from_rgb(104, 221, 205))
                .strong(),
        );
        ui.horizontal(|ui| {
            duration_field(ui, "Days", &mut self.single.days);
            duration_field(ui, "Hours", &mut self.single.hours);
            duration_field(ui, "Minutes", &mut self.single.minutes);
            duration_field(ui, "Seconds", &mut self.single.seconds);
        });
        ui.add_space(12.0);

        let result = self.single_result();
        ui.heading(
            RichText::new("Result")
                .color(Color32::from_rgb(104, 221, 205))
                .strong(),
        );
        ui.label(
            RichText::new(match &result {
                Some(result) => format_time(result),
                None => TIME_PLACEHOLDER.to_string(),
            })
            .size(48.0)
            .monospace()
            .color(Color32::from_rgb(255, 214, 117))
            .strong(),
        );
        ui.label(
            RichText::new(match &result {
                Some(result) => format_date(result),
                None => DATE_PLACEHOLDER.to_string(),
            })
            .monospace()
            .color(Color32::from_rgb(161, 180, 201)),
        );
    }

    fn show_multi_view(&mut self, ui: &mut Ui) {
        ui.horizontal_wrapped(|ui| {
            ui.heading(
                RichText::new("Multi Slots")
                    .color(Color32::from_rgb(104, 221, 205))
                    .strong(),
            );
            ui.label(
                RichText::new("Each slot: result = now + (duration x multiplier)")
                    .color(Color32::from_rgb(161, 180, 201)),
            );
        });
        ui.add_space(6.0);

        // One snapshot for the whole frame; every slot renders from it.
        let results = self.slot_results();
        let policy = self.settings.slot_day_policy();
        let show_days = policy == DayPolicy::IncludeDays;
        let multiplier_choices = self.settings.multiplier_choices();

        ScrollArea::vertical()
            .id_salt("slots_scroll")
            .show(ui, |ui| {
                for (index, slot) in self.slots.iter_mut().enumerate() {
                    ui.group(|ui| {
                        ui.label(
                            RichText::new(format!("Slot {}", index + 1))
                                .color(Color32::from_rgb(96, 228, 206))
                                .strong(),
                        );
                        ui.horizontal(|ui| {
                            for choice in multiplier_choices.clone() {
                                if ui
                                    .selectable_label(
                                        slot.multiplier == choice,
                                        format!("x{choice}"),
                                    )
                                    .clicked()
                                {
                                    slot.multiplier = choice;
                                }
                            }
                        });
                        ui.horizontal(|ui| {
                            if show_days {
                                duration_field(ui, "Days", &mut slot.fields.days);
                            }
                            duration_field(ui, "Hours", &mut slot.fields.hours);
                            duration_field(ui, "Minutes", &mut slot.fields.minutes);
                            duration_field(ui, "Seconds", &mut slot.fields.seconds);
                        });

                        let result = results[index];
                        ui.label(
                            RichText::new(match &result {
                                Some(result) => format_time(result),
                                None => TIME_PLACEHOLDER.to_string(),
                            })
                            .size(22.0)
                            .monospace()
                            .color(Color32::from_rgb(255, 214, 117))
                            .strong(),
                        );
                        ui.label(
                            RichText::new(match &result {
                                Some(result) => format_date(result),
                                None => DATE_PLACEHOLDER.to_string(),
                            })
                            .monospace()
                            .color(Color32::from_rgb(161, 180, 201)),
                        );
                        ui.label(
                            RichText::new(slot.added_seconds_label(policy))
                                .color(Color32::from_rgb(120, 205, 192)),
                        );
                    });
                    ui.add_space(6.0);
                }
            });
    }
}

impl eframe::App for OffsetApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.advance(Instant::now());

        egui::TopBottomPanel::top("header")
            .resizable(false)
            .show(ctx, |ui| self.show_header(ui));

        egui::CentralPanel::default().show(ctx, |ui| match self.view {
            ViewKind::Single => self.show_single_view(ui),
            ViewKind::Multi => self.show_multi_view(ui),
        });

        ctx.request_repaint_after(self.ticker.until_next(Instant::now()));
    }
}

fn duration_field(ui: &mut Ui, label: &str, value: &mut String) {
    ui.vertical(|ui| {
        ui.label(
            RichText::new(label)
                .size(12.0)
                .color(Color32::from_rgb(161, 180, 201)),
        );
        ui.add(TextEdit::singleline(value).desired_width(72.0));
    });
}
