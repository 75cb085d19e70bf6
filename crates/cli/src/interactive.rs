//! Progress indicators

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Create a spinner
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    // The template is a literal, so parsing only fails if it is edited badly.
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Spinner that draws nothing, for output that will be parsed
pub fn hidden_spinner() -> ProgressBar {
    ProgressBar::hidden()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_keeps_message() {
        let pb = spinner("Evaluating...");
        assert_eq!(pb.message(), "Evaluating...");
        pb.finish_and_clear();
    }

    #[test]
    fn test_hidden_spinner_is_hidden() {
        assert!(hidden_spinner().is_hidden());
    }
}
