use crate::user_input::interface::{UserAction, UserInput};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Mutex;

/// User input fed by whoever holds the sender, e.g. the GUI window.
pub struct UserInputChannel {
    receiver: Mutex<Option<Receiver<UserAction>>>,
}

impl UserInputChannel {
    pub fn new() -> (Sender<UserAction>, Self) {
        let (sender, receiver) = channel();
        (
            sender,
            Self {
                receiver: Mutex::new(Some(receiver)),
            },
        )
    }
}

impl UserInput for UserInputChannel {
    /// The receiver can be handed out once; later calls get a closed channel.
    fn events(&self) -> Receiver<UserAction> {
        let taken = self
            .receiver
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();

        match taken {
            Some(receiver) => receiver,
            None => channel().1,
        }
    }
}
