//! Desktop preview app for screen-lamp
//!
//! The whole window is the lamp surface. Drag vertically to dim, drag
//! horizontally to walk the palette. All changes go through the
//! `IntentChannel`, the session is ticked once per frame.

use std::time::Instant as StdInstant;

use eframe::egui::{self};
use screen_lamp::color::wheel_color;
use screen_lamp::preferences::MemoryPreferences;
use screen_lamp::timer::TimerEvent;
use screen_lamp::{
    DEFAULT_SESSION_CONFIG, DisplayOutput, Drag, Instant, IntentChannel, IntentSender,
    LampIntent, LampSession, Rgb, SceneId, TimerOption,
};

/// Intent channel size
const INTENT_CHANNEL_SIZE: usize = 16;

/// Side length of the color wheel in pixels
const WHEEL_SIZE: f32 = 120.0;

/// Static intent channel for communication between UI and session
static INTENTS_CHANNEL: IntentChannel<INTENT_CHANNEL_SIZE> =
    IntentChannel::<INTENT_CHANNEL_SIZE>::new();

/// Display double: the window paints whatever was last written here
#[derive(Debug)]
struct WindowDisplay {
    brightness: f32,
    color: Rgb,
}

impl DisplayOutput for WindowDisplay {
    fn write_brightness(&mut self, brightness: f32) {
        self.brightness = brightness;
    }

    fn write_color(&mut self, color: Rgb) {
        self.color = color;
    }
}

type PreviewSession = LampSession<'static, WindowDisplay, MemoryPreferences<4>, INTENT_CHANNEL_SIZE>;

fn main() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([480.0, 800.0])
            .with_title("Screen Lamp Preview"),
        ..Default::default()
    };

    eframe::run_native(
        "screen-lamp-preview",
        options,
        Box::new(|_cc| Ok(Box::new(PreviewApp::new()))),
    )
}

struct PreviewApp {
    session: PreviewSession,
    intent_sender: IntentSender<'static, INTENT_CHANNEL_SIZE>,

    /// Wall-clock reference for session time
    started: StdInstant,
    /// Minutes for the custom countdown
    custom_minutes: u32,
    /// Last thing the timer reported
    status: Option<&'static str>,
}

impl PreviewApp {
    fn new() -> Self {
        let display = WindowDisplay {
            brightness: DEFAULT_SESSION_CONFIG.lamp.brightness,
            color: DEFAULT_SESSION_CONFIG.lamp.color,
        };
        let session = LampSession::new(
            INTENTS_CHANNEL.receiver(),
            display,
            MemoryPreferences::new(),
            &DEFAULT_SESSION_CONFIG,
        );

        Self {
            session,
            intent_sender: INTENTS_CHANNEL.sender(),
            started: StdInstant::now(),
            custom_minutes: 5,
            status: None,
        }
    }

    fn send(&self, intent: LampIntent) {
        let _ = self.intent_sender.try_send(intent);
    }

    fn now(&self) -> Instant {
        #[allow(clippy::cast_possible_truncation)]
        let ms = self.started.elapsed().as_millis() as u64;
        Instant::from_millis(ms)
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn surface_color(&self) -> egui::Color32 {
        let display = self.session.lamp().output();
        let dim = |channel: u8| (f32::from(channel) * display.brightness).round() as u8;
        egui::Color32::from_rgb(
            dim(display.color.r),
            dim(display.color.g),
            dim(display.color.b),
        )
    }

    fn scene_controls(&self, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            let current = self.session.scenes().current().map(|scene| scene.id);
            for id in SceneId::ALL {
                let scene = id.scene();
                let selected = current == Some(scene.id);
                if ui.selectable_label(selected, scene.name).clicked() {
                    self.send(if selected {
                        LampIntent::StopScene
                    } else {
                        LampIntent::ActivateScene(id)
                    });
                }
            }
        });
    }

    fn timer_controls(&mut self, ui: &mut egui::Ui) {
        let sender = &self.intent_sender;
        let custom_minutes = &mut self.custom_minutes;
        ui.horizontal_wrapped(|ui| {
            for option in TimerOption::PRESETS {
                if ui.button(option.to_string()).clicked() {
                    let _ = sender.try_send(LampIntent::SelectTimer(option));
                }
            }

            ui.add(
                egui::DragValue::new(custom_minutes)
                    .range(1u32..=600u32)
                    .suffix(" min"),
            );
            if ui.button("Start").clicked() {
                let _ = sender.try_send(LampIntent::StartTimer {
                    minutes: *custom_minutes,
                });
            }
        });

        if let Some(countdown) = self.session.timer().state().countdown() {
            ui.horizontal(|ui| {
                ui.label(countdown.remaining_time().to_string());
                ui.add(egui::ProgressBar::new(countdown.progress()));
                if ui.button("Cancel").clicked() {
                    self.send(LampIntent::CancelTimer);
                }
            });
        } else if let Some(status) = self.status {
            ui.label(status);
        }
    }

    fn color_wheel(&self, ui: &mut egui::Ui) {
        let (response, painter) =
            ui.allocate_painter(egui::vec2(WHEEL_SIZE, WHEEL_SIZE), egui::Sense::click_and_drag());
        let center = response.rect.center();
        let radius = WHEEL_SIZE / 2.0;

        let step = 6.0;
        let mut y = -radius;
        while y < radius {
            let mut x = -radius;
            while x < radius {
                if let Some(color) = wheel_color(x, y, radius) {
                    let rect = egui::Rect::from_min_size(
                        center + egui::vec2(x, y),
                        egui::vec2(step, step),
                    );
                    painter.rect_filled(rect, 0.0, egui::Color32::from_rgb(color.r, color.g, color.b));
                }
                x += step;
            }
            y += step;
        }

        if let Some(pos) = response.interact_pointer_pos() {
            let offset = pos - center;
            if let Some(color) = wheel_color(offset.x, offset.y, radius) {
                self.send(LampIntent::SetColor(color));
            }
        }
    }

    fn tutorial_window(&self, ctx: &egui::Context) {
        if !self.session.tutorial().should_show() {
            return;
        }
        egui::Window::new("How to use")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label("Swipe up or down to change brightness.");
                ui.label("Swipe left or right to change color.");
                if ui.button("Got it").clicked() {
                    self.send(LampIntent::CompleteTutorial);
                }
            });
    }
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let result = self.session.tick(self.now());
        for event in &result.timer_events {
            match event {
                TimerEvent::Finished => self.status = Some("Timer finished"),
                TimerEvent::Cancelled => self.status = Some("Timer cancelled"),
                TimerEvent::Started(_) | TimerEvent::Tick(_) => self.status = None,
            }
        }

        let fill = self.surface_color();
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(fill))
            .show(ctx, |ui| {
                egui::Frame::new()
                    .fill(egui::Color32::from_black_alpha(160))
                    .inner_margin(8.0)
                    .show(ui, |ui| {
                        self.scene_controls(ui);
                        ui.add_space(4.0);
                        self.timer_controls(ui);
                        ui.add_space(4.0);
                        if ui.button("Show tutorial").clicked() {
                            self.send(LampIntent::ResetTutorial);
                        }
                    });

                ui.add_space(8.0);
                self.color_wheel(ui);

                let size = ui.available_size();
                let (response, painter) = ui.allocate_painter(size, egui::Sense::drag());
                if response.dragged() {
                    let delta = response.drag_delta();
                    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                    let container_height = response.rect.height().max(0.0) as u32;
                    self.send(LampIntent::Drag(Drag {
                        dx: delta.x,
                        dy: delta.y,
                        container_height,
                    }));
                }

                let lamp = self.session.lamp();
                if lamp.shows_brightness_label() {
                    let label = lamp.label_color();
                    painter.text(
                        response.rect.center(),
                        egui::Align2::CENTER_CENTER,
                        format!("{}%", lamp.brightness_percent()),
                        egui::FontId::proportional(48.0),
                        egui::Color32::from_rgb(label.r, label.g, label.b),
                    );
                }
            });

        self.tutorial_window(ctx);

        // Intents sent this frame are drained on the next one
        if !INTENTS_CHANNEL.is_empty() {
            ctx.request_repaint();
        } else if let Some(sleep) = result.sleep_duration {
            ctx.request_repaint_after(std::time::Duration::from_millis(sleep.as_millis()));
        }
    }
}
