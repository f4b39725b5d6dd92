use crossbeam_channel::Receiver;
use eframe::egui;

use client_core::form::{FormView, CAPTIONS_HEADING, SONGS_HEADING};

use crate::controller::{events::UiEvent, FormController};
use crate::ui::dialogs::{pick_image, APP_TITLE};

const ERROR_COLOR: egui::Color32 = egui::Color32::from_rgb(220, 50, 47);

pub struct CaptionApp {
    controller: FormController,
    ui_rx: Receiver<UiEvent>,
}

impl CaptionApp {
    pub fn new(controller: FormController, ui_rx: Receiver<UiEvent>) -> Self {
        Self { controller, ui_rx }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.controller.handle_event(event);
        }
    }

    fn show_form(&mut self, ui: &mut egui::Ui, view: &FormView) {
        ui.horizontal(|ui| {
            if ui.button("Choose image…").clicked() {
                if let Some(path) = pick_image() {
                    self.controller.select_path(&path);
                }
            }
            ui.label(view.selected_file_label.as_str());
        });

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            if ui.button("Upload").clicked() {
                self.controller.submit();
            }
            if view.uploading {
                ui.spinner();
                ui.label("Uploading…");
            }
        });
    }

    fn show_outcome(ui: &mut egui::Ui, view: &FormView) {
        if let Some(error) = &view.error_line {
            ui.add_space(8.0);
            ui.colored_label(ERROR_COLOR, error.as_str());
        }

        if let Some(results) = &view.results {
            ui.add_space(8.0);
            ui.heading(CAPTIONS_HEADING);
            for caption in &results.captions {
                ui.label(format!("• {caption}"));
            }
            ui.add_space(8.0);
            ui.heading(SONGS_HEADING);
            for song in &results.songs {
                ui.label(format!("• {song}"));
            }
        }
    }
}

impl eframe::App for CaptionApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.small(self.controller.status());
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(APP_TITLE);
            ui.add_space(10.0);

            let view = self.controller.view();
            self.show_form(ui, &view);

            // Re-render after the form's actions so this frame reflects them.
            let view = self.controller.view();
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| Self::show_outcome(ui, &view));
        });

        if self.controller.state().is_uploading() {
            ctx.request_repaint_after(std::time::Duration::from_millis(33));
        } else {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}
