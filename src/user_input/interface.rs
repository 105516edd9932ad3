use crate::backend_gateway::interface::Verdict;
use crate::selected_image::SelectedImage;
use std::path::Path;
use std::sync::mpsc::Receiver;

#[derive(Debug, Clone, PartialEq)]
pub enum UserAction {
    /// From the file dialog or a drop.
    SelectImage(SelectedImage),
    SelectionUnreadable { name: String, reason: String },
    Analyze,
    GiveFeedback(Verdict),
    Reset,
    RequestSave,
    ConfirmSave,
    CancelSave,
    Quit,
}

impl UserAction {
    pub fn select_path(path: &Path) -> Self {
        match SelectedImage::from_path(path) {
            Ok(image) => UserAction::SelectImage(image),
            Err(err) => UserAction::SelectionUnreadable {
                name: path.display().to_string(),
                reason: err.to_string(),
            },
        }
    }
}

pub trait UserInput: Send + Sync {
    fn events(&self) -> Receiver<UserAction>;
}
