//! morse-rs - Morse Code Trainer
//!
//! This application converts typed text into Morse code and plays it
//! back as timed 600 Hz tone bursts, highlighting the symbol that is
//! currently sounding.

use eframe::egui;

mod audio;
mod morse;
mod playback;

use playback::{sequence_duration, Scheduler};

fn main() -> eframe::Result<()> {
    env_logger::init();
    log::info!("Starting morse-rs");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([720.0, 520.0])
            .with_title("morse-rs"),
        ..Default::default()
    };

    eframe::run_native(
        "morse-rs",
        options,
        Box::new(|cc| Ok(Box::new(MorseApp::new(cc)))),
    )
}

/// Main application state
struct MorseApp {
    /// Text as typed by the user
    input: String,

    /// Encoded symbol sequence, rebuilt on every input change
    encoded: String,

    /// Playback engine; owns all playback state
    scheduler: Scheduler,

    show_reference: bool,
}

impl MorseApp {
    fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            input: String::new(),
            encoded: String::new(),
            scheduler: Scheduler::new(),
            show_reference: false,
        }
    }

    fn status_text(&self) -> String {
        if let Some(index) = self.scheduler.position() {
            format!("Playing {}/{}", index + 1, self.encoded.chars().count())
        } else if self.encoded.is_empty() {
            "Idle".to_string()
        } else {
            format!(
                "Idle - {:.1} s",
                sequence_duration(&self.encoded).as_secs_f32()
            )
        }
    }
}

impl eframe::App for MorseApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Keep the highlight moving while a run is in flight
        if self.scheduler.is_playing() {
            ctx.request_repaint();
        }

        // Top panel
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("morse-rs");
                ui.separator();

                // Play/Stop button
                let button_text = if self.scheduler.is_playing() {
                    "⏹ Stop"
                } else {
                    "▶ Play"
                };

                if ui.button(button_text).clicked() {
                    self.scheduler.toggle(&self.encoded);
                }

                let mute_text = if self.scheduler.is_muted() {
                    "🔇 Muted"
                } else {
                    "🔊 Sound"
                };
                if ui.button(mute_text).clicked() {
                    self.scheduler.toggle_mute();
                }

                ui.separator();
                ui.toggle_value(&mut self.show_reference, "Reference");
                ui.separator();
                ui.label(self.status_text());
            });
        });

        // Reference table panel (display only)
        if self.show_reference {
            egui::SidePanel::right("reference_panel")
                .min_width(200.0)
                .show(ctx, |ui| {
                    ui.heading("Reference");
                    ui.separator();

                    egui::ScrollArea::vertical().show(ui, |ui| {
                        egui::Grid::new("reference_grid")
                            .striped(true)
                            .show(ui, |ui| {
                                for &(c, code) in morse::MORSE_TABLE {
                                    let shown = if c == ' ' {
                                        "space".to_string()
                                    } else {
                                        c.to_string()
                                    };
                                    ui.label(shown);
                                    ui.monospace(code);
                                    ui.end_row();
                                }
                            });
                    });
                });
        }

        // Input and encoded output
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.label("Text:");
            let response = ui.add(
                egui::TextEdit::multiline(&mut self.input)
                    .desired_rows(3)
                    .desired_width(f32::INFINITY)
                    .hint_text("Type something, e.g. SOS"),
            );

            // New input cancels any running playback and re-encodes
            if response.changed() {
                self.scheduler.stop();
                self.encoded = morse::encode(&self.input);
            }

            ui.separator();
            ui.label("Morse:");

            let position = self.scheduler.position();
            ui.horizontal_wrapped(|ui| {
                ui.spacing_mut().item_spacing.x = 2.0;
                for (index, c) in self.encoded.chars().enumerate() {
                    let mut text = egui::RichText::new(c.to_string()).monospace().size(22.0);
                    if position == Some(index) {
                        text = text
                            .background_color(egui::Color32::from_rgb(255, 176, 0))
                            .color(egui::Color32::BLACK);
                    }
                    ui.label(text);
                }
            });

            ui.with_layout(egui::Layout::bottom_up(egui::Align::LEFT), |ui| {
                ui.horizontal(|ui| {
                    ui.small(format!("Symbols: {}", self.encoded.chars().count()));
                    ui.separator();
                    ui.small("dot 100 ms · dash 300 ms · 600 Hz");
                });
            });
        });
    }
}
