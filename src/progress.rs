//! Progress display for the registry stages of an install
//!
//! Each concurrent stage (resolving, checking types, looking up companions)
//! gets one indicatif bar counting finished reads. The bar draws on stderr and
//! is cleared when the stage ends, before the stage reports anything.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const TICK: Duration = Duration::from_millis(100);
const TEMPLATE: &str = "{spinner:.cyan} {prefix:.bold} [{bar:30.cyan/blue}] {pos}/{len}";

/// Per-stage progress bar; a no-op when disabled (`-q`, tests)
pub struct Progress {
    enabled: bool,
    current: Option<ProgressBar>,
}

impl Progress {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            current: None,
        }
    }

    /// Show a bar for a stage with `reads` registry reads.
    ///
    /// A stage without reads shows nothing.
    pub fn start(&mut self, reads: usize, stage: &str) {
        self.finish_and_clear();
        if !self.enabled || reads == 0 {
            return;
        }

        let style = match ProgressStyle::with_template(TEMPLATE) {
            Ok(style) => style.progress_chars("█▓▒░"),
            Err(e) => {
                tracing::debug!(error = %e, "progress template rejected");
                return;
            }
        };
        let bar = ProgressBar::new(reads as u64)
            .with_style(style)
            .with_prefix(stage.to_string());
        bar.enable_steady_tick(TICK);
        self.current = Some(bar);
    }

    /// Count one finished read
    pub fn inc(&self) {
        if let Some(bar) = &self.current {
            bar.inc(1);
        }
    }

    /// Remove the bar of the current stage
    pub fn finish_and_clear(&mut self) {
        if let Some(bar) = self.current.take() {
            bar.finish_and_clear();
        }
    }

    /// Returns true while a stage bar is shown
    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }
}

impl Drop for Progress {
    fn drop(&mut self) {
        self.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_progress_never_draws() {
        let mut progress = Progress::new(false);
        progress.start(10, "Resolving");
        progress.inc();
        assert!(!progress.is_active());
        progress.finish_and_clear();
    }

    #[test]
    fn test_stage_lifecycle() {
        let mut progress = Progress::new(true);
        progress.start(3, "Resolving");
        assert!(progress.is_active());
        progress.inc();
        progress.inc();
        progress.finish_and_clear();
        assert!(!progress.is_active());
    }

    #[test]
    fn test_next_stage_replaces_bar() {
        let mut progress = Progress::new(true);
        progress.start(2, "Resolving");
        progress.start(2, "Checking types");
        assert!(progress.is_active());
    }

    #[test]
    fn test_stage_without_reads_shows_nothing() {
        let mut progress = Progress::new(true);
        progress.start(0, "Looking up type declarations");
        assert!(!progress.is_active());
    }
}
