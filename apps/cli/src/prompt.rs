use std::io::{self, BufRead, Write};

use reports_cell::Prompt;

/// Terminal dialogs. `assume_yes` answers every confirmation without asking.
pub struct TerminalPrompt {
    pub assume_yes: bool,
}

impl Prompt for TerminalPrompt {
    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        print!("{} [y/N] ", message);
        if io::stdout().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }

    fn alert(&self, message: &str) {
        eprintln!("! {}", message);
    }
}

/// Reads one line from stdin after printing `label`.
pub fn ask(label: &str) -> io::Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
