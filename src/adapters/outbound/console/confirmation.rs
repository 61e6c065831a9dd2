use crate::ports::outbound::ConfirmationPrompt;
use std::io::{self, BufRead, BufReader, Stdin, Write};
use std::sync::Mutex;
use tracing::warn;

/// Asks on stderr and reads a yes/no answer from a line source (stdin by default)
///
/// Anything other than an explicit yes counts as a refusal, including EOF.
pub struct StdinConfirmation<In = BufReader<Stdin>> {
    input: Mutex<In>,
}

impl StdinConfirmation {
    pub fn new() -> Self {
        Self {
            input: Mutex::new(BufReader::new(io::stdin())),
        }
    }
}

impl Default for StdinConfirmation {
    fn default() -> Self {
        Self::new()
    }
}

impl<In: BufRead + Send> StdinConfirmation<In> {
    pub fn from_reader(input: In) -> Self {
        Self {
            input: Mutex::new(input),
        }
    }
}

pub(crate) fn is_affirmative(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "s" | "si" | "sí"
    )
}

impl<In: BufRead + Send> ConfirmationPrompt for StdinConfirmation<In> {
    fn confirm(&self, message: &str) -> bool {
        let mut stderr = io::stderr();
        let _ = write!(stderr, "{} [y/N] ", message);
        let _ = stderr.flush();

        let mut answer = String::new();
        let Ok(mut input) = self.input.lock() else {
            warn!("confirmation input unavailable, treating as declined");
            return false;
        };
        match input.read_line(&mut answer) {
            Ok(0) | Err(_) => false,
            Ok(_) => is_affirmative(&answer),
        }
    }
}

/// Confirms everything; backs the `--yes` flag
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl ConfirmationPrompt for AssumeYes {
    fn confirm(&self, _message: &str) -> bool {
        true
    }
}
