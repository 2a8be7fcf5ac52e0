use basepot::engine::progress::{Progress, ProgressCallback};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

const SPINNER_TICK_MS: u64 = 80;

/// Renders engine progress events as an `indicatif` spinner and bar.
///
/// A phase shows a spinner with its name; a task inside the phase turns it
/// into a bar counting structure files. `ProgressBar` is shared state, so
/// the callback can be driven from rayon workers without extra locking.
#[derive(Clone)]
pub struct CliProgressHandler {
    pb: ProgressBar,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        Self::with_target(ProgressDrawTarget::stderr())
    }

    /// A handler that tracks state but never draws, for `--quiet` runs.
    pub fn hidden() -> Self {
        Self::with_target(ProgressDrawTarget::hidden())
    }

    fn with_target(target: ProgressDrawTarget) -> Self {
        let pb = ProgressBar::with_draw_target(Some(0), target).with_style(Self::spinner_style());
        Self { pb }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let pb = self.pb.clone();

        Box::new(move |progress: Progress| match progress {
            Progress::PhaseStart { name } => {
                pb.reset();
                pb.set_style(Self::spinner_style());
                pb.set_message(name);
                pb.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
            }
            Progress::TaskStart { total } => {
                pb.disable_steady_tick();
                pb.set_style(Self::bar_style());
                pb.set_length(total);
                pb.set_position(0);
            }
            Progress::TaskIncrement => pb.inc(1),
            Progress::TaskFinish => pb.set_style(Self::spinner_style()),
            Progress::PhaseFinish => {
                pb.disable_steady_tick();
                let phase = pb.message();
                pb.finish_with_message(format!("✓ {}", phase));
            }
            Progress::Message(msg) => pb.println(format!("  {}", msg)),
        })
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template("{msg:<24} [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-")
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn callback_tracks_a_file_loop() {
        let handler = CliProgressHandler::hidden();
        let callback = handler.get_callback();

        callback(Progress::PhaseStart {
            name: "Reading structures",
        });
        assert_eq!(handler.pb.message(), "Reading structures");
        assert!(!handler.pb.is_finished());

        callback(Progress::TaskStart { total: 3 });
        callback(Progress::TaskIncrement);
        assert_eq!(handler.pb.length(), Some(3));
        assert_eq!(handler.pb.position(), 1);

        callback(Progress::Message("Skipping broken.pdb".to_string()));
        callback(Progress::TaskIncrement);
        callback(Progress::TaskIncrement);
        callback(Progress::TaskFinish);
        assert_eq!(handler.pb.position(), 3);

        callback(Progress::PhaseFinish);
        assert!(handler.pb.is_finished());
        assert_eq!(handler.pb.message(), "✓ Reading structures");
    }

    #[test]
    fn new_phase_restarts_the_count() {
        let handler = CliProgressHandler::hidden();
        let callback = handler.get_callback();

        callback(Progress::PhaseStart { name: "Training" });
        callback(Progress::TaskStart { total: 2 });
        callback(Progress::TaskIncrement);
        callback(Progress::PhaseFinish);

        callback(Progress::PhaseStart { name: "Scoring" });
        callback(Progress::TaskStart { total: 4 });
        assert_eq!(handler.pb.position(), 0);
        assert_eq!(handler.pb.length(), Some(4));
        assert_eq!(handler.pb.message(), "Scoring");
    }

    #[test]
    fn callback_can_be_driven_from_worker_threads() {
        let handler = CliProgressHandler::hidden();
        let callback = handler.get_callback();

        callback(Progress::TaskStart { total: 4 });
        thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| callback(Progress::TaskIncrement));
            }
        });

        assert_eq!(handler.pb.position(), 4);
    }
}
