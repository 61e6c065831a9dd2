/// ProgressReporter port for user feedback while the backend works
///
/// Analyses and renders take several seconds; shells show an activity
/// indicator between `start_activity` and `finish_activity`.
pub trait ProgressReporter: Send + Sync {
    /// One-off status line
    fn report(&self, message: &str);

    /// Starts the activity indicator. Only one runs at a time; starting a
    /// new one replaces the previous.
    fn start_activity(&self, message: &str);

    /// Stops the activity indicator, if one is running
    fn finish_activity(&self);

    fn report_error(&self, message: &str);

    fn report_completion(&self, message: &str);
}
