use crate::config::Config;
use crate::display::interface::{Actions, Display, Screen};
use crate::preview_store::interface::PreviewStore;
use crate::session::core::{Model, SaveState, Selection, Session};
use std::sync::{Arc, Mutex};
use std::time::Instant;

const UPLOAD_HINT: &str = "Drop your image here or open one (PNG, JPG, JPEG up to 10MB)";
const FEEDBACK_DONE_DEFAULT: &str =
    "AI learned from your feedback instantly. Your image was processed but not saved.";

#[derive(Clone)]
pub struct Render {
    display: Arc<Mutex<dyn Display + Send + Sync>>,
    preview_store: Arc<dyn PreviewStore + Send + Sync>,
    config: Config,
}

impl Render {
    pub fn new(
        display: Arc<Mutex<dyn Display + Send + Sync>>,
        preview_store: Arc<dyn PreviewStore + Send + Sync>,
        config: Config,
    ) -> Self {
        Self {
            display,
            preview_store,
            config,
        }
    }

    pub fn render(&self, model: &Model) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let screen = self.screen(model, Instant::now());
        let mut display = self
            .display
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        display.show(&screen)
    }

    pub fn screen(&self, model: &Model, now: Instant) -> Screen {
        let mut lines = vec![];

        match &model.session {
            Session::Idle => lines.push(UPLOAD_HINT.to_string()),
            Session::Previewing { selection } => {
                lines.push(self.preview_line(selection));
                lines.push("Ready to analyze".to_string());
            }
            Session::Predicting { selection } => {
                lines.push(self.preview_line(selection));
                lines.push("Analyzing...".to_string());
            }
            Session::ResultReady { selection, result } => {
                lines.push(self.preview_line(selection));
                lines.push(format!(
                    "Result: {} ({}% confidence)",
                    result.gender, result.confidence
                ));
                lines.push("Is this prediction correct?".to_string());
            }
            Session::SubmittingFeedback { selection, result } => {
                lines.push(self.preview_line(selection));
                lines.push(format!(
                    "Result: {} ({}% confidence)",
                    result.gender, result.confidence
                ));
                lines.push("Submitting feedback...".to_string());
            }
            Session::FeedbackDone { done_at, .. } => {
                lines.push("Model Updated!".to_string());
                let message = model
                    .last_feedback
                    .as_ref()
                    .and_then(|receipt| receipt.message.clone())
                    .unwrap_or_else(|| FEEDBACK_DONE_DEFAULT.to_string());
                lines.push(message);
                let remaining = self
                    .config
                    .auto_reset_delay
                    .saturating_sub(now.saturating_duration_since(*done_at));
                lines.push(format!(
                    "Starting over in {:.1}s",
                    remaining.as_secs_f64()
                ));
            }
        }

        if let Some(error) = &model.error {
            lines.push(format!("Error: {}", error));
        }
        if let Some(notice) = &model.notice {
            lines.push(notice.clone());
        }

        if let Some(stats) = &model.stats {
            lines.push(format!(
                "Learning stats: {} feedback | {}% accuracy | {} correct | {} trainings",
                stats.total_feedback,
                stats.accuracy,
                stats.correct_predictions,
                stats.online_training_count
            ));
        }

        match model.save {
            SaveState::AwaitingConfirmation => lines
                .push("Save the current model state? This will create a backup.".to_string()),
            SaveState::Saving => lines.push("Saving...".to_string()),
            SaveState::Idle => {}
        }

        if let Some(health) = &model.health {
            let loaded = if health.model_loaded {
                "model loaded"
            } else {
                "model not loaded"
            };
            lines.push(format!("Backend: {} ({})", health.status, loaded));
        }

        Screen {
            lines,
            actions: self.actions(model),
        }
    }

    fn actions(&self, model: &Model) -> Actions {
        let can_give_feedback = model.can_give_feedback();
        Actions {
            can_select: model.can_select(),
            can_analyze: model.can_analyze(),
            can_give_feedback,
            incorrect_label: model
                .result()
                .filter(|_| can_give_feedback)
                .map(|result| result.gender.complement()),
            can_reset: model.selection().is_some()
                || model.error.is_some()
                || model.notice.is_some(),
            can_save: model.can_save(&self.config),
            awaiting_save_confirmation: model.save == SaveState::AwaitingConfirmation,
        }
    }

    fn preview_line(&self, selection: &Selection) -> String {
        match self.preview_store.resolve(selection.preview) {
            Some(image) => format!(
                "Preview: {} ({}, {:.1} KB)",
                image.name,
                image.mime,
                image.byte_len() as f64 / 1024.0
            ),
            None => format!("Preview: {} (loading)", selection.image.name),
        }
    }
}
