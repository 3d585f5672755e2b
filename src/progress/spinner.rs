use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

const STEADY_TICK: Duration = Duration::from_millis(80);

/// Create a spinner shown while a one-shot action is in flight.
///
/// Renders to stderr (not stdout) so piped output stays clean.
/// Returns a hidden spinner if quiet mode is active. The message is the
/// presenter's progress text and is updated by the caller.
pub fn create_action_spinner(label: &str, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    pb.set_draw_target(ProgressDrawTarget::stderr());
    // the template is static; keep indicatif's default if it ever fails to parse
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold} {msg}") {
        pb.set_style(style);
    }
    pb.set_prefix(label.to_string());
    pb.enable_steady_tick(STEADY_TICK);
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_spinner_is_hidden() {
        let pb = create_action_spinner("Scan", true);
        assert!(pb.is_hidden());
    }

    #[test]
    fn spinner_carries_label() {
        let pb = create_action_spinner("Dry run", false);
        assert_eq!(pb.prefix(), "Dry run");
        pb.finish_and_clear();
    }
}
