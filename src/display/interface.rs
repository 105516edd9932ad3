use crate::backend_gateway::interface::Gender;
use std::error::Error;

/// What the user may do right now; surfaces disable everything else.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Actions {
    pub can_select: bool,
    pub can_analyze: bool,
    pub can_give_feedback: bool,
    /// Label the "No" button asserts.
    pub incorrect_label: Option<Gender>,
    pub can_reset: bool,
    pub can_save: bool,
    pub awaiting_save_confirmation: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Screen {
    pub lines: Vec<String>,
    pub actions: Actions,
}

pub trait Display: Send + Sync {
    fn show(&mut self, screen: &Screen) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Empty whatever file-path field the surface keeps.
    fn clear_input(&mut self) -> Result<(), Box<dyn Error + Send + Sync>>;
}
