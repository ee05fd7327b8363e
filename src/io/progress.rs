//! Per-run progress display with automatic batching
//!
//! Small batches get one bar per run showing cells filled against the
//! grid area; large batches collapse into a single batch bar so the
//! terminal does not scroll away under dozens of runs.

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static RUN_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:30.cyan/blue}] {prefix}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Runs: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

/// State of one run as shown in its bar
#[derive(Clone, Debug, Default)]
struct RunState {
    label: String,
    filled: usize,
    area: usize,
}

/// Coordinates progress display for a batch of runs
pub struct RunProgress {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    run_bars: Vec<ProgressBar>,
    run_states: Vec<RunState>,
}

impl Default for RunProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl RunProgress {
    /// Create an uninitialized progress display
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            run_bars: Vec::new(),
            run_states: Vec::new(),
        }
    }

    /// Allocate bars for the given number of runs
    pub fn initialize(&mut self, run_count: usize) {
        self.run_states = vec![RunState::default(); run_count];

        // Batch mode avoids terminal spam for large run counts
        if run_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(run_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        for _ in 0..run_count.min(MAX_INDIVIDUAL_PROGRESS_BARS) {
            let bar = ProgressBar::new(0);
            bar.set_style(RUN_STYLE.clone());
            self.run_bars.push(self.multi_progress.add(bar));
        }
    }

    /// Begin displaying a run with the given label and cell count
    pub fn start_run(&mut self, index: usize, label: String, area: usize) {
        if let Some(state) = self.run_states.get_mut(index) {
            *state = RunState {
                label,
                filled: 0,
                area,
            };
        }
        self.redraw();
    }

    /// Report the current fill count of a run
    pub fn update_run(&mut self, index: usize, filled: usize) {
        if let Some(state) = self.run_states.get_mut(index) {
            state.filled = filled;
        }
        self.redraw();
    }

    /// Mark a run finished and advance the batch bar
    pub fn complete_run(&mut self, index: usize) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }
        if let Some(state) = self.run_states.get_mut(index) {
            state.label = format!("✓ {}", state.label);
            state.filled = state.filled.max(state.area);
        }
        self.redraw();
    }

    /// Clear all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All runs complete");
        }
        let _ = self.multi_progress.clear();
    }

    /// Show the most recent window of started runs on the bars
    fn redraw(&self) {
        let started: Vec<&RunState> = self
            .run_states
            .iter()
            .filter(|state| !state.label.is_empty())
            .collect();
        let window_start = started.len().saturating_sub(self.run_bars.len());
        let visible = started.get(window_start..).unwrap_or(&[]);

        for (bar, state) in self.run_bars.iter().zip(visible) {
            bar.set_length(state.area as u64);
            bar.set_position(state.filled.min(state.area) as u64);
            bar.set_message(format!("{}/{}", state.filled.min(state.area), state.area));
            bar.set_prefix(state.label.clone());
        }

        for bar in self.run_bars.iter().skip(visible.len()) {
            bar.set_length(0);
            bar.set_position(0);
            bar.set_message(String::new());
            bar.set_prefix(String::new());
        }
    }
}
