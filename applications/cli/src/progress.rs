//! Terminal progress bar

use indicatif::{ProgressBar, ProgressStyle};
use mediaimport_core::{ImportProgress, ProgressSink};

const TEMPLATE: &str = "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {wide_msg}";

/// Progress sink drawing an indicatif bar on stderr
pub struct ConsoleProgress {
    bar: ProgressBar,
}

impl Default for ConsoleProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleProgress {
    pub fn new() -> Self {
        let bar = ProgressBar::new(0);
        if let Ok(style) = ProgressStyle::with_template(TEMPLATE) {
            bar.set_style(style.progress_chars("#>-"));
        }
        Self { bar }
    }
}

impl ProgressSink for ConsoleProgress {
    fn report(&mut self, progress: &ImportProgress) {
        self.bar.set_length(progress.total_files as u64);
        self.bar.set_position(progress.processed_files as u64);
        if let Some(folder) = &progress.current_folder {
            self.bar.set_message(folder.display().to_string());
        }
    }

    fn finish(&mut self, progress: &ImportProgress) {
        self.bar
            .finish_with_message(format!("{} notes created", progress.created_records));
    }
}
