use std::sync::Mutex;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Trait for reporting walk progress.
///
/// The walker notifies the reporter exactly once per visited file,
/// whether or not classification succeeded. All methods have default
/// no-op implementations.
pub trait ProgressReporter: Send + Sync {
    fn on_walk_start(&self, _total_files: Option<usize>) {}
    fn on_file_processed(&self, _file_name: &str, _classified: bool) {}
    fn on_walk_complete(&self, _files_visited: usize, _duration_secs: f64) {}
}

/// No-op progress reporter for silent operation.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {}

/// CLI progress reporter using an indicatif progress bar.
///
/// Uses a sized bar when the selection source can count its files
/// upfront, a spinner otherwise.
pub struct IndicatifReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl IndicatifReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn set_bar(&self, pb: ProgressBar) {
        let mut guard = self.bar.lock().unwrap();
        if let Some(old) = guard.take() {
            old.finish_and_clear();
        }
        *guard = Some(pb);
    }

    fn finish_bar(&self) {
        let mut guard = self.bar.lock().unwrap();
        if let Some(pb) = guard.take() {
            pb.finish_and_clear();
        }
    }
}

impl Default for IndicatifReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for IndicatifReporter {
    fn on_walk_start(&self, total_files: Option<usize>) {
        let pb = match total_files {
            Some(total) => {
                let pb = ProgressBar::new(total as u64);
                pb.set_style(
                    ProgressStyle::with_template(
                        "  {spinner:.cyan} Classifying [{bar:30.cyan/dim}] {pos}/{len} {wide_msg}",
                    )
                    .unwrap()
                    .progress_chars("━╸─")
                    .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
                );
                pb
            }
            None => {
                let pb = ProgressBar::new_spinner();
                pb.set_style(
                    ProgressStyle::with_template("{spinner:.cyan} Classifying... {wide_msg}")
                        .unwrap()
                        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
                );
                pb
            }
        };
        pb.enable_steady_tick(Duration::from_millis(80));
        self.set_bar(pb);
    }

    fn on_file_processed(&self, file_name: &str, _classified: bool) {
        let guard = self.bar.lock().unwrap();
        if let Some(pb) = guard.as_ref() {
            pb.inc(1);
            pb.set_message(file_name.to_string());
        }
    }

    fn on_walk_complete(&self, files_visited: usize, duration_secs: f64) {
        self.finish_bar();
        eprintln!(
            "  \x1b[32m✓\x1b[0m Classification complete: {} files in {:.2}s",
            files_visited, duration_secs
        );
    }
}
