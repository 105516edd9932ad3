use crate::backend_gateway::error::GatewayError;
use crate::backend_gateway::interface::{
    FeedbackReceipt, FeedbackRecord, Health, PredictionResult, Stats,
};
use crate::config::Config;
use crate::preview_store::interface::Preview;
use crate::selected_image::SelectedImage;
use crate::user_input::interface::UserAction;
use std::time::Instant;

pub const INVALID_IMAGE_MESSAGE: &str = "Please select a valid image file";
pub const MISSING_IMAGE_MESSAGE: &str = "Please select an image first";
pub const FEEDBACK_FAILED_MESSAGE: &str = "Failed to submit feedback";
pub const SAVE_FAILED_MESSAGE: &str = "Failed to save model";

/// The picked image and its preview always travel together.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub image: SelectedImage,
    pub preview: Preview,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Session {
    #[default]
    Idle,
    Previewing {
        selection: Selection,
    },
    Predicting {
        selection: Selection,
    },
    ResultReady {
        selection: Selection,
        result: PredictionResult,
    },
    SubmittingFeedback {
        selection: Selection,
        result: PredictionResult,
    },
    FeedbackDone {
        selection: Selection,
        result: PredictionResult,
        done_at: Instant,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Previewing,
    Predicting,
    ResultReady,
    SubmittingFeedback,
    FeedbackDone,
    Error,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SaveState {
    #[default]
    Idle,
    AwaitingConfirmation,
    Saving,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Model {
    pub session: Session,
    pub error: Option<String>,
    pub notice: Option<String>,
    pub stats: Option<Stats>,
    pub health: Option<Health>,
    pub save: SaveState,
    pub last_feedback: Option<FeedbackReceipt>,
    /// Predict and feedback completions from another generation are dropped.
    pub generation: u64,
    pub next_preview: u64,
}

impl Model {
    pub fn phase(&self) -> Phase {
        if self.error.is_some() {
            return Phase::Error;
        }
        match self.session {
            Session::Idle => Phase::Idle,
            Session::Previewing { .. } => Phase::Previewing,
            Session::Predicting { .. } => Phase::Predicting,
            Session::ResultReady { .. } => Phase::ResultReady,
            Session::SubmittingFeedback { .. } => Phase::SubmittingFeedback,
            Session::FeedbackDone { .. } => Phase::FeedbackDone,
        }
    }

    pub fn selection(&self) -> Option<&Selection> {
        match &self.session {
            Session::Idle => None,
            Session::Previewing { selection }
            | Session::Predicting { selection }
            | Session::ResultReady { selection, .. }
            | Session::SubmittingFeedback { selection, .. }
            | Session::FeedbackDone { selection, .. } => Some(selection),
        }
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        match &self.session {
            Session::ResultReady { result, .. }
            | Session::SubmittingFeedback { result, .. }
            | Session::FeedbackDone { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn feedback_submitted(&self) -> bool {
        matches!(self.session, Session::FeedbackDone { .. })
    }

    /// True while a predict, feedback or save call is outstanding.
    pub fn is_busy(&self) -> bool {
        matches!(
            self.session,
            Session::Predicting { .. } | Session::SubmittingFeedback { .. }
        ) || self.save == SaveState::Saving
    }

    pub fn can_select(&self) -> bool {
        !matches!(
            self.session,
            Session::Predicting { .. } | Session::SubmittingFeedback { .. }
        )
    }

    pub fn can_analyze(&self) -> bool {
        matches!(self.session, Session::Previewing { .. }) && !self.is_busy()
    }

    pub fn can_give_feedback(&self) -> bool {
        matches!(self.session, Session::ResultReady { .. }) && !self.is_busy()
    }

    pub fn save_unlocked(&self, config: &Config) -> bool {
        self.stats
            .as_ref()
            .is_some_and(|stats| stats.total_feedback >= config.save_feedback_threshold)
    }

    fn save_allowed(&self, config: &Config) -> bool {
        self.save_unlocked(config)
            && !self.is_busy()
            && matches!(
                self.session,
                Session::Idle | Session::ResultReady { .. } | Session::FeedbackDone { .. }
            )
    }

    pub fn can_save(&self, config: &Config) -> bool {
        self.save == SaveState::Idle && self.save_allowed(config)
    }
}

#[derive(Debug)]
pub enum Event {
    User(UserAction),
    PredictDone {
        generation: u64,
        result: Result<PredictionResult, GatewayError>,
    },
    FeedbackSubmitDone {
        generation: u64,
        result: Result<FeedbackReceipt, GatewayError>,
        /// Starts the auto reset countdown.
        completed_at: Instant,
    },
    StatsFetched(Result<Stats, GatewayError>),
    SaveDone(Result<String, GatewayError>),
    HealthChecked(Result<Health, GatewayError>),
    Tick(Instant),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    SubscribeToUserInput,
    SubscribeTick,
    FetchStats,
    CheckHealth,
    Predict {
        generation: u64,
        image: SelectedImage,
    },
    SubmitFeedback {
        generation: u64,
        feedback: FeedbackRecord,
    },
    SaveModel,
    RegisterPreview {
        preview: Preview,
        image: SelectedImage,
    },
    ReleasePreview {
        preview: Preview,
    },
    ClearImageInput,
}

impl Effect {
    /// Local bookkeeping that must run in order, before the next render.
    pub fn runs_inline(&self) -> bool {
        matches!(
            self,
            Effect::RegisterPreview { .. } | Effect::ReleasePreview { .. } | Effect::ClearImageInput
        )
    }
}

pub fn init() -> (Model, Vec<Effect>) {
    (
        Model::default(),
        vec![
            Effect::SubscribeToUserInput,
            Effect::SubscribeTick,
            Effect::FetchStats,
            Effect::CheckHealth,
        ],
    )
}

pub fn transition(config: &Config, model: Model, event: Event) -> (Model, Vec<Effect>) {
    match (model.session.clone(), event) {
        // Selection
        (_, Event::User(UserAction::SelectImage(_)))
        | (_, Event::User(UserAction::SelectionUnreadable { .. }))
            if !model.can_select() =>
        {
            (model, vec![])
        }
        (_, Event::User(UserAction::SelectImage(image))) => {
            if image.is_image() {
                select_image(model, image)
            } else {
                (
                    Model {
                        error: Some(INVALID_IMAGE_MESSAGE.to_string()),
                        ..model
                    },
                    vec![],
                )
            }
        }
        (_, Event::User(UserAction::SelectionUnreadable { name, reason })) => (
            Model {
                error: Some(format!("Could not read {}: {}", name, reason)),
                ..model
            },
            vec![],
        ),

        // Prediction
        (Session::Idle, Event::User(UserAction::Analyze)) => (
            Model {
                error: Some(MISSING_IMAGE_MESSAGE.to_string()),
                ..model
            },
            vec![],
        ),
        (Session::Previewing { selection }, Event::User(UserAction::Analyze))
            if model.can_analyze() =>
        {
            let generation = model.generation + 1;
            let image = selection.image.clone();
            (
                Model {
                    session: Session::Predicting { selection },
                    error: None,
                    notice: None,
                    generation,
                    ..model
                },
                vec![Effect::Predict { generation, image }],
            )
        }
        (Session::Predicting { selection }, Event::PredictDone { generation, result })
            if generation == model.generation =>
        {
            match result {
                Ok(result) => (
                    Model {
                        session: Session::ResultReady { selection, result },
                        error: None,
                        ..model
                    },
                    vec![],
                ),
                Err(err) => (
                    Model {
                        session: Session::Previewing { selection },
                        error: Some(err.user_message()),
                        ..model
                    },
                    vec![],
                ),
            }
        }

        // Feedback
        (
            Session::ResultReady { selection, result },
            Event::User(UserAction::GiveFeedback(verdict)),
        ) if model.can_give_feedback() => {
            let generation = model.generation + 1;
            let feedback = FeedbackRecord::new(selection.image.clone(), &result, verdict);
            (
                Model {
                    session: Session::SubmittingFeedback { selection, result },
                    error: None,
                    notice: None,
                    generation,
                    ..model
                },
                vec![Effect::SubmitFeedback {
                    generation,
                    feedback,
                }],
            )
        }
        (
            Session::SubmittingFeedback { selection, result },
            Event::FeedbackSubmitDone {
                generation,
                result: outcome,
                completed_at,
            },
        ) if generation == model.generation => match outcome {
            Ok(receipt) => (
                Model {
                    session: Session::FeedbackDone {
                        selection,
                        result,
                        done_at: completed_at,
                    },
                    error: None,
                    last_feedback: Some(receipt),
                    ..model
                },
                vec![Effect::FetchStats],
            ),
            Err(_) => (
                Model {
                    session: Session::ResultReady { selection, result },
                    error: Some(FEEDBACK_FAILED_MESSAGE.to_string()),
                    ..model
                },
                vec![],
            ),
        },
        // The server counted it even though the session moved on
        (_, Event::FeedbackSubmitDone { result: Ok(_), .. }) => (model, vec![Effect::FetchStats]),
        (Session::FeedbackDone { done_at, .. }, Event::Tick(now))
            if now.saturating_duration_since(done_at) >= config.auto_reset_delay =>
        {
            reset(model)
        }

        // Reset
        (_, Event::User(UserAction::Reset)) => reset(model),

        // Stats and health are advisory
        (_, Event::StatsFetched(Ok(stats))) => (
            Model {
                stats: Some(stats),
                ..model
            },
            vec![],
        ),
        (_, Event::HealthChecked(Ok(health))) => (
            Model {
                health: Some(health),
                ..model
            },
            vec![],
        ),

        // Save
        (_, Event::User(UserAction::RequestSave)) if model.can_save(config) => (
            Model {
                save: SaveState::AwaitingConfirmation,
                ..model
            },
            vec![],
        ),
        (_, Event::User(UserAction::ConfirmSave))
            if model.save == SaveState::AwaitingConfirmation =>
        {
            if model.save_allowed(config) {
                (
                    Model {
                        save: SaveState::Saving,
                        error: None,
                        notice: None,
                        ..model
                    },
                    vec![Effect::SaveModel],
                )
            } else {
                (
                    Model {
                        save: SaveState::Idle,
                        ..model
                    },
                    vec![],
                )
            }
        }
        (_, Event::User(UserAction::CancelSave))
            if model.save == SaveState::AwaitingConfirmation =>
        {
            (
                Model {
                    save: SaveState::Idle,
                    ..model
                },
                vec![],
            )
        }
        (_, Event::SaveDone(result)) if model.save == SaveState::Saving => match result {
            Ok(backup) => (
                Model {
                    save: SaveState::Idle,
                    error: None,
                    notice: Some(format!(
                        "Model saved successfully! Backup created: {}",
                        backup
                    )),
                    ..model
                },
                vec![Effect::FetchStats],
            ),
            Err(_) => (
                Model {
                    save: SaveState::Idle,
                    error: Some(SAVE_FAILED_MESSAGE.to_string()),
                    ..model
                },
                vec![],
            ),
        },

        // Stale completions, rejected actions and everything else
        _ => (model, vec![]),
    }
}

fn select_image(model: Model, image: SelectedImage) -> (Model, Vec<Effect>) {
    let mut effects = vec![];
    if let Some(previous) = model.selection() {
        effects.push(Effect::ReleasePreview {
            preview: previous.preview,
        });
    }

    let preview = Preview(model.next_preview);
    effects.push(Effect::RegisterPreview {
        preview,
        image: image.clone(),
    });

    (
        Model {
            session: Session::Previewing {
                selection: Selection { image, preview },
            },
            error: None,
            notice: None,
            last_feedback: None,
            generation: model.generation + 1,
            next_preview: model.next_preview + 1,
            ..model
        },
        effects,
    )
}

/// Lands in `Idle` from anywhere. Stats and the save flow are not session state.
fn reset(model: Model) -> (Model, Vec<Effect>) {
    let mut effects = vec![];
    if let Some(selection) = model.selection() {
        effects.push(Effect::ReleasePreview {
            preview: selection.preview,
        });
    }
    effects.push(Effect::ClearImageInput);

    let generation = match model.session {
        Session::Idle => model.generation,
        _ => model.generation + 1,
    };

    (
        Model {
            session: Session::Idle,
            error: None,
            notice: None,
            last_feedback: None,
            generation,
            ..model
        },
        effects,
    )
}
