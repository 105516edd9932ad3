use crate::backend_gateway::interface::BackendGateway;
use crate::config::Config;
use crate::display::interface::Display;
use crate::library::logger::interface::Logger;
use crate::preview_store::interface::PreviewStore;
use crate::session::core::{init, Event, Model};
use crate::session::render::Render;
use crate::session::run_effect::RunEffect;
use crate::user_input::interface::UserInput;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct ClassifierClient {
    pub model: Arc<Mutex<Model>>,
    pub event_sender: Sender<Event>,
    pub event_receiver: Arc<Mutex<Receiver<Event>>>,
    pub config: Config,
    pub logger: Arc<dyn Logger + Send + Sync>,
    pub run_effect: RunEffect,
    pub render: Render,
}

impl ClassifierClient {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        gateway: Arc<dyn BackendGateway + Send + Sync>,
        preview_store: Arc<dyn PreviewStore + Send + Sync>,
        display: Arc<Mutex<dyn Display + Send + Sync>>,
        user_input: Arc<dyn UserInput + Send + Sync>,
    ) -> Self {
        let (event_sender, event_receiver) = channel();
        let logger = logger.with_namespace("session");

        let run_effect = RunEffect::new(
            config.clone(),
            logger.clone(),
            gateway,
            preview_store.clone(),
            display.clone(),
            user_input,
            event_sender.clone(),
        );
        let render = Render::new(display, preview_store, config.clone());

        Self {
            model: Arc::new(Mutex::new(init().0)),
            event_sender,
            event_receiver: Arc::new(Mutex::new(event_receiver)),
            config,
            logger,
            run_effect,
            render,
        }
    }

    pub fn model(&self) -> Model {
        self.model
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn send(&self, event: Event) {
        let _ = self.event_sender.send(event);
    }
}
