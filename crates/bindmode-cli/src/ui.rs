use bindmode::engine::progress::{AnalysisStage, Progress, ProgressCallback};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressState, ProgressStyle};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, warn};

const SPINNER_TICK_MS: u64 = 80;

struct AnalysisBar {
    bar: ProgressBar,
    /// Name of the phase currently running, used for the completion and failure lines.
    phase: &'static str,
}

impl AnalysisBar {
    fn apply(&mut self, progress: Progress) {
        match progress {
            Progress::StageReached(AnalysisStage::Failed) => {
                self.bar.disable_steady_tick();
                self.bar
                    .abandon_with_message(format!("✗ {} failed", self.phase));
            }
            Progress::StageReached(stage) => {
                debug!(%stage, "Analysis stage reached.");
                self.bar.set_prefix(format!("[{stage}]"));
            }
            Progress::PhaseStart { name } => {
                self.phase = name;
                self.bar.reset();
                self.bar.set_length(0);
                self.bar.set_style(spinner_style());
                self.bar
                    .enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
                self.bar.set_message(name);
            }
            Progress::TaskStart { total_steps } => {
                self.bar.disable_steady_tick();
                self.bar.reset();
                self.bar.set_length(total_steps);
                self.bar.set_style(classifier_style());
            }
            Progress::TaskIncrement => self.bar.inc(1),
            // Classifier tallies replace the message so the bar shows the latest result.
            Progress::Message(tally) => self.bar.set_message(tally),
            Progress::TaskFinish => {
                if let Some(length) = self.bar.length() {
                    self.bar.set_position(length);
                }
            }
            Progress::PhaseFinish => {
                self.bar.disable_steady_tick();
                self.bar.finish_with_message(format!("✓ {}", self.phase));
            }
        }
    }
}

/// Renders analysis progress on stderr: a spinner while structures load, then one bar
/// tick per interaction classifier.
#[derive(Clone)]
pub struct CliProgressHandler {
    state: Arc<Mutex<AnalysisBar>>,
}

impl CliProgressHandler {
    pub fn new(visible: bool) -> Self {
        let target = if visible {
            ProgressDrawTarget::stderr()
        } else {
            ProgressDrawTarget::hidden()
        };
        let bar = ProgressBar::with_draw_target(Some(0), target).with_style(spinner_style());
        bar.finish_and_clear();

        Self {
            state: Arc::new(Mutex::new(AnalysisBar {
                bar,
                phase: "Analysis",
            })),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let state = Arc::clone(&self.state);
        Box::new(move |progress: Progress| match state.lock() {
            Ok(mut bar) => bar.apply(progress),
            Err(_) => warn!("Progress display lock was poisoned; skipping update."),
        })
    }
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{prefix:.dim} {spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

fn classifier_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "{prefix:.dim} [{bar:30.cyan/blue}] {pos}/{len} classifiers ({elapsed_ms}) {msg}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .with_key(
        "elapsed_ms",
        |state: &ProgressState, w: &mut dyn std::fmt::Write| {
            let _ = write!(w, "{}ms", state.elapsed().as_millis());
        },
    )
    .progress_chars("=> ")
}
