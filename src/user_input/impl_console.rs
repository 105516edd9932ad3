use crate::backend_gateway::interface::Verdict;
use crate::library::logger::interface::Logger;
use crate::user_input::interface::{UserAction, UserInput};
use std::io::BufRead;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;

pub const HELP: &str = "open <path> | drop <path> | analyze | yes | no | reset | save | confirm | cancel | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Select(PathBuf),
    Analyze,
    Correct,
    Incorrect,
    Reset,
    Save,
    Confirm,
    Cancel,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "open" | "drop" | "select" => {
            if rest.is_empty() {
                return Err(format!("Usage: {} <path>", word));
            }
            Command::Select(PathBuf::from(rest))
        }
        "analyze" | "a" => Command::Analyze,
        "yes" | "y" | "correct" => Command::Correct,
        "no" | "n" | "incorrect" => Command::Incorrect,
        "reset" | "r" => Command::Reset,
        "save" => Command::Save,
        "confirm" => Command::Confirm,
        "cancel" => Command::Cancel,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(format!("Unknown command: {}", other)),
    };

    Ok(Some(command))
}

impl Command {
    fn into_action(self) -> Option<UserAction> {
        match self {
            Command::Select(path) => Some(UserAction::select_path(&path)),
            Command::Analyze => Some(UserAction::Analyze),
            Command::Correct => Some(UserAction::GiveFeedback(Verdict::Correct)),
            Command::Incorrect => Some(UserAction::GiveFeedback(Verdict::Incorrect)),
            Command::Reset => Some(UserAction::Reset),
            Command::Save => Some(UserAction::RequestSave),
            Command::Confirm => Some(UserAction::ConfirmSave),
            Command::Cancel => Some(UserAction::CancelSave),
            Command::Quit => Some(UserAction::Quit),
            Command::Help => None,
        }
    }
}

pub struct UserInputConsole {
    logger: Arc<dyn Logger + Send + Sync>,
}

impl UserInputConsole {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("input").with_namespace("console"),
        }
    }
}

impl UserInput for UserInputConsole {
    fn events(&self) -> Receiver<UserAction> {
        let (tx, rx) = channel();
        let logger = self.logger.clone();

        std::thread::spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else {
                    break;
                };

                match parse_command(&line) {
                    Ok(Some(command)) => match command.into_action() {
                        Some(action) => {
                            if tx.send(action).is_err() {
                                return;
                            }
                        }
                        None => println!("{}", HELP),
                    },
                    Ok(None) => {}
                    Err(message) => {
                        let _ = logger.error(&message);
                        println!("{}", HELP);
                    }
                }
            }

            let _ = tx.send(UserAction::Quit);
        });

        rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(
            parse_command("open photos/cat.png").unwrap(),
            Some(Command::Select(PathBuf::from("photos/cat.png")))
        );
        assert_eq!(
            parse_command("  drop  my photo.jpg ").unwrap(),
            Some(Command::Select(PathBuf::from("my photo.jpg")))
        );
        assert_eq!(parse_command("Analyze").unwrap(), Some(Command::Analyze));
        assert_eq!(parse_command("y").unwrap(), Some(Command::Correct));
        assert_eq!(parse_command("no").unwrap(), Some(Command::Incorrect));
        assert_eq!(parse_command("quit").unwrap(), Some(Command::Quit));
        assert_eq!(parse_command("   ").unwrap(), None);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_command("open").is_err());
        assert_eq!(
            parse_command("dance").unwrap_err(),
            "Unknown command: dance"
        );
    }

    #[test]
    fn unreadable_path_becomes_selection_failure() {
        let action = Command::Select(PathBuf::from("/no/such/photo.png"))
            .into_action()
            .unwrap();
        assert!(matches!(
            action,
            UserAction::SelectionUnreadable { ref name, .. } if name == "/no/such/photo.png"
        ));
    }
}
