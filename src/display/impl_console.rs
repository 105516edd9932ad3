use crate::display::interface::{Actions, Display, Screen};
use std::error::Error;

const WIDTH: usize = 60;

pub struct DisplayConsole {
    last: Option<Screen>,
}

impl DisplayConsole {
    pub fn new() -> Self {
        Self { last: None }
    }
}

fn frame(screen: &Screen) -> String {
    let mut out = String::new();
    out.push_str(&format!("┌{}┐\n", "─".repeat(WIDTH)));
    out.push_str(&format!("│{:<width$}│\n", " Gender Classifier", width = WIDTH));
    out.push_str(&format!("├{}┤\n", "─".repeat(WIDTH)));
    for line in &screen.lines {
        let text: String = line.chars().take(WIDTH - 1).collect();
        out.push_str(&format!("│ {:<width$}│\n", text, width = WIDTH - 1));
    }
    out.push_str(&format!("└{}┘\n", "─".repeat(WIDTH)));
    out.push_str(&format!("> {}\n", hints(&screen.actions)));
    out
}

fn hints(actions: &Actions) -> String {
    if actions.awaiting_save_confirmation {
        return "confirm | cancel".to_string();
    }

    let mut hints = vec![];
    if actions.can_select {
        hints.push("open <path>".to_string());
    }
    if actions.can_analyze {
        hints.push("analyze".to_string());
    }
    if actions.can_give_feedback {
        hints.push("yes".to_string());
        if let Some(label) = actions.incorrect_label {
            hints.push(format!("no (it's {})", label));
        }
    }
    if actions.can_reset {
        hints.push("reset".to_string());
    }
    if actions.can_save {
        hints.push("save".to_string());
    }
    hints.push("quit".to_string());
    hints.join(" | ")
}

impl Display for DisplayConsole {
    fn show(&mut self, screen: &Screen) -> Result<(), Box<dyn Error + Send + Sync>> {
        // Ticks re-render constantly; only redraw on change.
        if self.last.as_ref() == Some(screen) {
            return Ok(());
        }
        print!("{}", frame(screen));
        self.last = Some(screen.clone());
        Ok(())
    }

    fn clear_input(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        // Commands are one-shot lines; there is no field to clear.
        Ok(())
    }
}
