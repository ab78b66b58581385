//! Progress bar display management and coordination.
//!
//! This module provides the [`ProgressDisplay`] struct that manages the bars
//! of one [`start_downloads`](crate::Downloader::start_downloads) run: a main
//! bar counting finished items and one child bar per running task, counting
//! bytes.
//!
//! # Examples
//!
//! ```rust
//! use rangedl::progress::{ProgressDisplay, StyleOptions};
//!
//! let progress_display = ProgressDisplay::new(StyleOptions::default(), 3, false);
//!
//! // The task sets the length once its probe knows it.
//! let item_progress = progress_display.create_child_progress("file.zip");
//! item_progress.set_length(1024);
//! item_progress.set_position(512);
//!
//! progress_display.finish_child(item_progress);
//! progress_display.increment_main();
//! progress_display.finish();
//! ```

use crate::progress::StyleOptions;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget};
use std::sync::Arc;

/// Progress display manager that coordinates multiple progress bars.
pub struct ProgressDisplay {
    /// The multi-progress instance for coordinating multiple progress bars.
    multi: Arc<MultiProgress>,
    /// The main progress bar for overall progress.
    main: Arc<ProgressBar>,
    /// Style options for progress bars.
    style_options: StyleOptions,
    /// Whether to show the main progress bar.
    show_main_progress: bool,
}

impl ProgressDisplay {
    /// Create a new progress display manager.
    ///
    /// # Arguments
    /// * `style_options` - Style configuration for progress bars
    /// * `total_downloads` - Number of items for the main progress bar
    /// * `single_file_progress` - Whether to hide the main bar when there is a single item
    pub fn new(
        style_options: StyleOptions,
        total_downloads: usize,
        single_file_progress: bool,
    ) -> Self {
        // Prepare the progress bar.
        let multi = match style_options.is_enabled() {
            true => Arc::new(MultiProgress::new()),
            false => Arc::new(MultiProgress::with_draw_target(ProgressDrawTarget::hidden())),
        };

        // Determine if we should show the main progress bar
        let show_main_progress = !single_file_progress || total_downloads > 1;

        let main = if show_main_progress {
            Arc::new(
                multi.add(
                    style_options
                        .main()
                        .clone()
                        .to_progress_bar(total_downloads as u64),
                ),
            )
        } else {
            // Create a completely hidden progress bar that's not added to MultiProgress
            Arc::new(ProgressBar::hidden())
        };

        if show_main_progress {
            main.tick();
        }

        Self {
            multi,
            main,
            style_options,
            show_main_progress,
        }
    }

    /// Get the multi-progress instance for adding child progress bars.
    pub fn multi(&self) -> Arc<MultiProgress> {
        self.multi.clone()
    }

    /// Get the main progress bar.
    pub fn main(&self) -> Arc<ProgressBar> {
        self.main.clone()
    }

    /// Create a child progress bar for one item, labelled with `label`.
    ///
    /// The length starts at zero and is set by the task once known.
    pub fn create_child_progress(&self, label: impl Into<String>) -> ProgressBar {
        self.multi.add(
            self.style_options
                .child()
                .clone()
                .to_progress_bar(0)
                .with_message(label.into()),
        )
    }

    /// Increment the main progress bar by one.
    pub fn increment_main(&self) {
        self.main.inc(1);
    }

    /// Finish the progress display, clearing or keeping bars based on configuration.
    pub fn finish(self) {
        if self.show_main_progress {
            if self.style_options.main().clear {
                self.main.finish_and_clear();
            } else {
                self.main.finish();
            }
        }
    }

    /// Finish a child progress bar based on configuration.
    pub fn finish_child(&self, pb: ProgressBar) {
        if self.style_options.child().clear {
            pb.finish_and_clear();
        } else {
            pb.finish();
        }
    }
}
