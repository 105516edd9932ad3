use crate::backend_gateway::interface::Verdict;
use crate::display::interface::{Display, Screen};
use crate::selected_image::{mime_for_name, SelectedImage};
use crate::user_input::interface::UserAction;
use eframe::egui;
use std::error::Error;
use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

#[derive(Default)]
struct Shared {
    screen: Screen,
    clear_input: bool,
    ctx: Option<egui::Context>,
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// The session side of the window: receives screens from the runtime.
pub struct DisplayGui {
    shared: Arc<Mutex<Shared>>,
}

/// The eframe side of the window: draws the latest screen and turns clicks and drops into actions.
pub struct GuiWindow {
    shared: Arc<Mutex<Shared>>,
    actions: Sender<UserAction>,
    path_input: String,
}

impl DisplayGui {
    pub fn new(actions: Sender<UserAction>) -> (Self, GuiWindow) {
        let shared = Arc::new(Mutex::new(Shared::default()));
        (
            Self {
                shared: shared.clone(),
            },
            GuiWindow {
                shared,
                actions,
                path_input: String::new(),
            },
        )
    }
}

impl Display for DisplayGui {
    fn show(&mut self, screen: &Screen) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut shared = lock(&self.shared);
        if shared.screen != *screen {
            shared.screen = screen.clone();
            if let Some(ctx) = &shared.ctx {
                ctx.request_repaint();
            }
        }
        Ok(())
    }

    fn clear_input(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        lock(&self.shared).clear_input = true;
        Ok(())
    }
}

impl GuiWindow {
    /// Blocks until the window closes, then asks the session to quit.
    pub fn run(self) -> Result<(), eframe::Error> {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default().with_inner_size([520.0, 460.0]),
            ..Default::default()
        };
        let actions = self.actions.clone();

        let result = eframe::run_native(
            "Gender Classifier",
            options,
            Box::new(move |cc| {
                lock(&self.shared).ctx = Some(cc.egui_ctx.clone());
                Box::new(self) as Box<dyn eframe::App>
            }),
        );

        let _ = actions.send(UserAction::Quit);
        result
    }

    fn send(&self, action: UserAction) {
        let _ = self.actions.send(action);
    }
}

/// Extensions offered by the native picker.
const PICKER_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

fn pick_image() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .add_filter("Images", &PICKER_EXTENSIONS)
        .pick_file()
}

fn dropped_file_action(file: &egui::DroppedFile) -> Option<UserAction> {
    if let Some(path) = &file.path {
        return Some(UserAction::select_path(path));
    }
    let bytes = file.bytes.as_ref()?;
    Some(UserAction::SelectImage(SelectedImage::new(
        file.name.clone(),
        mime_for_name(&file.name),
        bytes.to_vec(),
    )))
}

impl eframe::App for GuiWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        for file in &dropped {
            if let Some(action) = dropped_file_action(file) {
                self.send(action);
            }
        }

        let screen = {
            let mut shared = lock(&self.shared);
            if shared.clear_input {
                self.path_input.clear();
                shared.clear_input = false;
            }
            shared.screen.clone()
        };
        let actions = &screen.actions;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Gender Classifier");
            ui.label("AI-Powered Photo Analysis");
            ui.separator();

            for line in &screen.lines {
                ui.label(line);
            }

            ui.separator();
            ui.horizontal(|ui| {
                ui.label("Image:");
                ui.text_edit_singleline(&mut self.path_input);
                let can_open = actions.can_select && !self.path_input.trim().is_empty();
                if ui.add_enabled(can_open, egui::Button::new("Open")).clicked() {
                    let path = PathBuf::from(self.path_input.trim());
                    self.send(UserAction::select_path(&path));
                }
                if ui
                    .add_enabled(actions.can_select, egui::Button::new("Browse..."))
                    .clicked()
                {
                    if let Some(path) = pick_image() {
                        self.path_input = path.display().to_string();
                        self.send(UserAction::select_path(&path));
                    }
                }
            });
            ui.small("or drop a PNG, JPG or JPEG (up to 10MB) onto this window");

            ui.horizontal(|ui| {
                if ui
                    .add_enabled(actions.can_analyze, egui::Button::new("Analyze Image"))
                    .clicked()
                {
                    self.send(UserAction::Analyze);
                }
                if actions.can_give_feedback {
                    if ui.button("✓ Yes, Correct").clicked() {
                        self.send(UserAction::GiveFeedback(Verdict::Correct));
                    }
                    if let Some(label) = actions.incorrect_label {
                        if ui.button(format!("✗ No, It's {}", label)).clicked() {
                            self.send(UserAction::GiveFeedback(Verdict::Incorrect));
                        }
                    }
                }
                if ui
                    .add_enabled(actions.can_reset, egui::Button::new("Try Another Image"))
                    .clicked()
                {
                    self.send(UserAction::Reset);
                }
            });

            if actions.awaiting_save_confirmation {
                ui.separator();
                ui.label("Save the current model state? This will create a backup.");
                ui.horizontal(|ui| {
                    if ui.button("Save").clicked() {
                        self.send(UserAction::ConfirmSave);
                    }
                    if ui.button("Cancel").clicked() {
                        self.send(UserAction::CancelSave);
                    }
                });
            } else if actions.can_save && ui.button("💾 Save Model Progress").clicked() {
                self.send(UserAction::RequestSave);
            }
        });

        ctx.request_repaint_after(Duration::from_millis(200));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picker_only_offers_images() {
        for extension in PICKER_EXTENSIONS {
            let name = format!("photo.{}", extension);
            assert!(mime_for_name(&name).starts_with("image/"), "{}", name);
        }
    }

    #[test]
    fn dropped_bytes_become_selection() {
        let file = egui::DroppedFile {
            name: "cat.png".to_string(),
            bytes: Some(vec![137, 80, 78, 71].into()),
            ..Default::default()
        };

        match dropped_file_action(&file) {
            Some(UserAction::SelectImage(image)) => {
                assert_eq!(image.name, "cat.png");
                assert_eq!(image.mime, "image/png");
                assert_eq!(image.byte_len(), 4);
            }
            other => panic!("Unexpected action: {:?}", other),
        }
    }
}
