use crate::ports::outbound::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// StderrProgressReporter adapter for reporting progress to stderr
///
/// Writes to stderr so rendered budgets and exports on stdout stay clean.
/// Requests in flight are shown with an indicatif spinner.
pub struct StderrProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
    quiet: bool,
}

impl StderrProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
            quiet: false,
        }
    }

    /// Reporter that only prints errors
    pub fn quiet() -> Self {
        Self {
            spinner: Mutex::new(None),
            quiet: true,
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("   {spinner:.green} {msg} ({elapsed})")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn clear_spinner(&self) {
        let mut slot = self.spinner.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(spinner) = slot.take() {
            spinner.finish_and_clear();
        }
    }
}

impl Default for StderrProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for StderrProgressReporter {
    fn report(&self, message: &str) {
        if !self.quiet {
            eprintln!("{}", message);
        }
    }

    fn start_activity(&self, message: &str) {
        if self.quiet {
            return;
        }
        let mut slot = self.spinner.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = slot.take() {
            previous.finish_and_clear();
        }
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(Self::spinner_style());
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));
        *slot = Some(spinner);
    }

    fn finish_activity(&self) {
        self.clear_spinner();
    }

    fn report_error(&self, message: &str) {
        self.clear_spinner();
        eprintln!("{}", message);
    }

    fn report_completion(&self, message: &str) {
        self.clear_spinner();
        if !self.quiet {
            eprintln!("{}", message);
        }
    }
}
