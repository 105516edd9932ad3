use crate::display::interface::{Display, Screen};
use std::error::Error;
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct Recorded {
    screens: Vec<Screen>,
    input_clears: usize,
}

/// Records every screen it is asked to show.
#[derive(Debug, Clone, Default)]
pub struct DisplayFake {
    recorded: Arc<Mutex<Recorded>>,
}

impl DisplayFake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_screen(&self) -> Option<Screen> {
        self.recorded
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .screens
            .last()
            .cloned()
    }

    pub fn input_clears(&self) -> usize {
        self.recorded
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .input_clears
    }
}

impl Display for DisplayFake {
    fn show(&mut self, screen: &Screen) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.recorded
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .screens
            .push(screen.clone());
        Ok(())
    }

    fn clear_input(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.recorded
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .input_clears += 1;
        Ok(())
    }
}
