use crate::backend_gateway::interface::BackendGateway;
use crate::config::Config;
use crate::display::interface::Display;
use crate::library::logger::interface::Logger;
use crate::preview_store::interface::PreviewStore;
use crate::session::core::{Effect, Event};
use crate::user_input::interface::UserInput;
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::time::Instant;

#[derive(Clone)]
pub struct RunEffect {
    config: Config,
    logger: Arc<dyn Logger + Send + Sync>,
    gateway: Arc<dyn BackendGateway + Send + Sync>,
    preview_store: Arc<dyn PreviewStore + Send + Sync>,
    display: Arc<Mutex<dyn Display + Send + Sync>>,
    user_input: Arc<dyn UserInput + Send + Sync>,
    event_sender: Sender<Event>,
}

impl RunEffect {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        gateway: Arc<dyn BackendGateway + Send + Sync>,
        preview_store: Arc<dyn PreviewStore + Send + Sync>,
        display: Arc<Mutex<dyn Display + Send + Sync>>,
        user_input: Arc<dyn UserInput + Send + Sync>,
        event_sender: Sender<Event>,
    ) -> Self {
        Self {
            config,
            logger: logger.with_namespace("effect"),
            gateway,
            preview_store,
            display,
            user_input,
            event_sender,
        }
    }

    pub fn run_effect(&self, effect: Effect) {
        if !matches!(effect, Effect::SubscribeTick) {
            let _ = self.logger.info(&format!("Running effect: {:?}", effect));
        }

        match effect {
            Effect::SubscribeToUserInput => {
                let events = self.user_input.events();
                while let Ok(action) = events.recv() {
                    if self.event_sender.send(Event::User(action)).is_err() {
                        return;
                    }
                }
            }
            Effect::SubscribeTick => loop {
                std::thread::sleep(self.config.tick_rate);
                if self.event_sender.send(Event::Tick(Instant::now())).is_err() {
                    return;
                }
            },
            Effect::FetchStats => {
                let stats = self.gateway.fetch_stats();
                if let Err(err) = &stats {
                    let _ = self.logger.error(&format!("Failed to fetch stats: {}", err));
                }
                let _ = self.event_sender.send(Event::StatsFetched(stats));
            }
            Effect::CheckHealth => {
                let health = self.gateway.check_health();
                match &health {
                    Ok(health) => {
                        let _ = self.logger.info(&format!(
                            "Backend {} (model loaded: {})",
                            health.status, health.model_loaded
                        ));
                    }
                    Err(err) => {
                        let _ = self
                            .logger
                            .error(&format!("Backend health check failed: {}", err));
                    }
                }
                let _ = self.event_sender.send(Event::HealthChecked(health));
            }
            Effect::Predict { generation, image } => {
                let result = self.gateway.predict(&image);
                let _ = self
                    .event_sender
                    .send(Event::PredictDone { generation, result });
            }
            Effect::SubmitFeedback {
                generation,
                feedback,
            } => {
                let result = self.gateway.submit_feedback(&feedback);
                let _ = self
                    .event_sender
                    .send(Event::FeedbackSubmitDone {
                        generation,
                        result,
                        completed_at: Instant::now(),
                    });
            }
            Effect::SaveModel => {
                let result = self.gateway.save_model();
                let _ = self.event_sender.send(Event::SaveDone(result));
            }
            Effect::RegisterPreview { preview, image } => {
                if let Err(err) = self.preview_store.register(preview, &image) {
                    let _ = self
                        .logger
                        .error(&format!("Failed to register {}: {}", preview, err));
                }
            }
            Effect::ReleasePreview { preview } => {
                if let Err(err) = self.preview_store.release(preview) {
                    let _ = self
                        .logger
                        .error(&format!("Failed to release {}: {}", preview, err));
                }
            }
            Effect::ClearImageInput => {
                let mut display = self
                    .display
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner());
                if let Err(err) = display.clear_input() {
                    let _ = self
                        .logger
                        .error(&format!("Failed to clear image input: {}", err));
                }
            }
        }
    }
}
