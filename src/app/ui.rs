use super::{ServerHealth, UiState, UploadWidget};
use crate::upload::{accepted_extensions, Converter};
use crate::utils::color::Palette;
use eframe::egui::{self, Align, RichText, Stroke};
use rfd::FileDialog;
use std::path::Path;
use tracing::warn;

enum Action {
    Pick,
    Remove,
    Convert,
    Reset,
    Open(std::path::PathBuf),
}

impl<C: Converter> UploadWidget<C> {
    pub fn render(&mut self, ctx: &egui::Context) {
        let mut action = None;

        egui::CentralPanel::default().show(ctx, |ui| {
            let footer_height = 40.0;
            let content_height = ui.available_height() - footer_height;

            egui::ScrollArea::vertical()
                .max_height(content_height)
                .show(ui, |ui| {
                    ui.add_space(20.0);
                    ui.vertical_centered(|ui| {
                        ui.heading("Document to PDF Converter");
                        ui.add_space(5.0);
                        ui.label(
                            RichText::new("Convert Excel, PowerPoint, Word and text files to PDF")
                                .color(ui.visuals().text_color().gamma_multiply(0.7)),
                        );
                    });
                    ui.add_space(20.0);

                    action = match &self.state.ui {
                        UiState::Idle => self.render_drop_zone(ui),
                        UiState::FileSelected => self.render_selected(ui),
                        UiState::Converting => {
                            self.render_converting(ui);
                            None
                        }
                        UiState::Success { saved_to } => render_success(ui, saved_to),
                        UiState::Error(message) => render_error(ui, message),
                    };
                });

            ui.with_layout(egui::Layout::bottom_up(Align::Center), |ui| {
                ui.add_space(10.0);
                self.render_footer(ui);
            });
        });

        if let Some(action) = action {
            self.apply(action);
        }
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::Pick => {
                let extensions = accepted_extensions();
                if let Some(path) = FileDialog::new()
                    .add_filter("Documents", extensions.as_slice())
                    .add_filter("All files", &["*"])
                    .pick_file()
                {
                    self.select_path(&path);
                }
            }
            Action::Remove | Action::Reset => self.reset(),
            Action::Convert => self.convert(),
            Action::Open(path) => {
                if let Err(e) = open::that(&path) {
                    warn!("Failed to open {}: {}", path.display(), e);
                }
            }
        }
    }

    fn render_drop_zone(&self, ui: &mut egui::Ui) -> Option<Action> {
        let stroke = if self.state.drag_hover {
            Stroke::new(2.0, Palette::color(Palette::ACCENT))
        } else {
            Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color)
        };

        let response = egui::Frame::none()
            .stroke(stroke)
            .rounding(8.0)
            .inner_margin(30.0)
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("📁").size(32.0));
                    ui.add_space(8.0);
                    ui.label(RichText::new("Click to choose a file or drag it here").strong());
                    ui.add_space(4.0);
                    ui.label(
                        RichText::new(".xlsx .xls .xlsm .pptx .ppt .docx .doc .txt (max 16MB)")
                            .color(Palette::color(Palette::MUTED)),
                    );
                });
            })
            .response
            .interact(egui::Sense::click());

        response.clicked().then_some(Action::Pick)
    }

    fn render_selected(&self, ui: &mut egui::Ui) -> Option<Action> {
        let mut action = None;
        ui.group(|ui| {
            ui.horizontal(|ui| {
                ui.label("📄");
                ui.vertical(|ui| {
                    ui.label(RichText::new(self.state.file_name().unwrap_or_default()).strong());
                    ui.label(
                        RichText::new(self.state.file_size_text().unwrap_or_default())
                            .color(Palette::color(Palette::MUTED)),
                    );
                });
                ui.with_layout(egui::Layout::right_to_left(Align::Center), |ui| {
                    if ui.button("✖").on_hover_text("Remove file").clicked() {
                        action = Some(Action::Remove);
                    }
                });
            });
        });

        ui.add_space(20.0);
        ui.vertical_centered(|ui| {
            let button = egui::Button::new("📤 Convert to PDF").min_size(egui::vec2(200.0, 40.0));
            if ui.add(button).clicked() {
                action = Some(Action::Convert);
            }
        });
        action
    }

    fn render_converting(&self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add(egui::Spinner::new().size(32.0));
            ui.add_space(8.0);
            ui.label(format!(
                "Converting {}...",
                self.state.file_name().unwrap_or("file")
            ));
        });
    }

    fn render_footer(&self, ui: &mut egui::Ui) {
        let (text, color) = match self.state.server_health {
            ServerHealth::Unknown => ("Checking server...", Palette::MUTED),
            ServerHealth::Online => ("● Server online", Palette::SUCCESS),
            ServerHealth::Unreachable => ("● Server unreachable", Palette::ERROR),
        };
        ui.colored_label(Palette::color(color), text);
    }
}

fn render_success(ui: &mut egui::Ui, saved_to: &Path) -> Option<Action> {
    let mut action = None;
    ui.vertical_centered(|ui| {
        ui.colored_label(
            Palette::color(Palette::SUCCESS),
            RichText::new("✅ Conversion successful!").size(18.0),
        );
        ui.add_space(5.0);
        ui.label(format!("Saved to {}", saved_to.display()));
        ui.add_space(15.0);

        if ui.button("📂 Open PDF").clicked() {
            action = Some(Action::Open(saved_to.to_path_buf()));
        }
        if let Some(folder) = saved_to.parent() {
            if ui.button("Show folder").clicked() {
                action = Some(Action::Open(folder.to_path_buf()));
            }
        }
        ui.add_space(5.0);
        if ui.button("🔄 Convert another").clicked() {
            action = Some(Action::Reset);
        }
    });
    action
}

fn render_error(ui: &mut egui::Ui, message: &str) -> Option<Action> {
    let mut action = None;
    ui.vertical_centered(|ui| {
        ui.colored_label(Palette::color(Palette::ERROR), RichText::new("❌ Error").size(18.0));
        ui.add_space(5.0);
        ui.colored_label(Palette::color(Palette::ERROR), message);
        ui.add_space(15.0);
        if ui.button("Try again").clicked() {
            action = Some(Action::Reset);
        }
    });
    action
}
