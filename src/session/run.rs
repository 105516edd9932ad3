use crate::session::core::{init, transition, Effect, Event};
use crate::session::main::ClassifierClient;
use crate::user_input::interface::UserAction;

impl ClassifierClient {
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let (mut current_model, effects) = init();
        *self
            .model
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = current_model.clone();

        self.execute_effects(effects);
        self.render.render(&current_model)?;

        let event_receiver = self
            .event_receiver
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        loop {
            let event = event_receiver.recv()?;

            if matches!(event, Event::User(UserAction::Quit)) {
                let _ = self.logger.info("Quit requested");
                return Ok(());
            }

            let is_tick = matches!(event, Event::Tick(_));
            let event_display = format!("{:?}", event);
            let old_model = current_model.clone();

            let (new_model, effects) = transition(&self.config, current_model, event);

            if !is_tick || new_model != old_model || !effects.is_empty() {
                let _ = self.logger.info(&format!(
                    "\nold model:\n\t{:?}\n\nevent:\n\t{}\n\nnew model:\n\t{:?}\n\neffects:\n\t{:?}",
                    old_model, event_display, new_model, effects
                ));
            }

            current_model = new_model.clone();
            *self
                .model
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()) = new_model;

            self.execute_effects(effects);
            self.render.render(&current_model)?;
        }
    }

    /// Preview and input bookkeeping runs in order on this thread; everything else gets its own.
    fn execute_effects(&self, effects: Vec<Effect>) {
        for effect in effects {
            if effect.runs_inline() {
                self.run_effect.run_effect(effect);
            } else {
                let run_effect = self.run_effect.clone();
                std::thread::spawn(move || run_effect.run_effect(effect));
            }
        }
    }
}
