//! Looks of the two kinds of bars a [`Downloader`](crate::downloader::Downloader) draws.
//!
//! The main bar counts finished downloads (`3/8 downloads`). Each running
//! task gets a child bar that follows its byte counter, labelled with the
//! item's file name.
//!
//! ```rust
//! use rangedl::progress::{ProgressBarOpts, StyleOptions};
//!
//! // Keep the byte bars, drop the item counter.
//! let style = StyleOptions::new(ProgressBarOpts::hidden(), ProgressBarOpts::bytes());
//! assert!(style.is_enabled());
//! ```

use indicatif::{ProgressBar, ProgressStyle};

/// Options for the main bar and the per-task bars.
///
/// The main bar stays on screen when the run ends; task bars are cleared as
/// soon as their task settles.
#[derive(Debug, Clone)]
pub struct StyleOptions {
    pub(crate) main: ProgressBarOpts,
    pub(crate) child: ProgressBarOpts,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            main: ProgressBarOpts::items(),
            child: ProgressBarOpts::bytes(),
        }
    }
}

impl StyleOptions {
    pub fn new(main: ProgressBarOpts, child: ProgressBarOpts) -> Self {
        Self { main, child }
    }

    pub fn set_main(&mut self, main: ProgressBarOpts) {
        self.main = main;
    }

    pub fn set_child(&mut self, child: ProgressBarOpts) {
        self.child = child;
    }

    /// `false` when both bars are hidden, in which case nothing is drawn.
    pub fn is_enabled(&self) -> bool {
        self.main.enabled || self.child.enabled
    }

    /// Options of the finished-downloads bar.
    pub fn main(&self) -> &ProgressBarOpts {
        &self.main
    }

    /// Options of the per-task byte bars.
    pub fn child(&self) -> &ProgressBarOpts {
        &self.child
    }
}

/// Template and behaviour of one bar.
#[derive(Debug, Clone)]
pub struct ProgressBarOpts {
    template: Option<String>,
    /// At least three characters: done, current and remaining.
    progress_chars: Option<String>,
    pub(crate) enabled: bool,
    /// Remove the bar from the screen once it finishes.
    pub(crate) clear: bool,
}

impl Default for ProgressBarOpts {
    fn default() -> Self {
        Self {
            template: None,
            progress_chars: None,
            enabled: true,
            clear: true,
        }
    }
}

impl ProgressBarOpts {
    /// Finished downloads out of the queued ones.
    ///
    /// `[00:00:04] ########>---------- 3/8 downloads`
    pub const TEMPLATE_ITEMS: &'static str =
        "[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} downloads";
    /// One task's bytes, prefixed with the item's file name.
    ///
    /// `data.bin            ━━━━━━━━━━╾───────── 1.02 MiB/2.00 MiB 4.11 MiB/s eta 0s`
    pub const TEMPLATE_BYTES: &'static str =
        "{msg:20!} {bar:40.green/black} {bytes:>11.green}/{total_bytes:<11.green} {bytes_per_sec:>13.red} eta {eta:.blue}";
    pub const CHARS_ITEMS: &'static str = "#>-";
    pub const CHARS_BYTES: &'static str = "━╾─";

    pub fn new(
        template: Option<String>,
        progress_chars: Option<String>,
        enabled: bool,
        clear: bool,
    ) -> Self {
        Self {
            template,
            progress_chars,
            enabled,
            clear,
        }
    }

    /// The bar counting finished downloads. It is kept on screen.
    pub fn items() -> Self {
        Self::new(
            Some(Self::TEMPLATE_ITEMS.into()),
            Some(Self::CHARS_ITEMS.into()),
            true,
            false,
        )
    }

    /// The bar following one task's byte counter.
    pub fn bytes() -> Self {
        Self::new(
            Some(Self::TEMPLATE_BYTES.into()),
            Some(Self::CHARS_BYTES.into()),
            true,
            true,
        )
    }

    /// A bar that is never drawn.
    pub fn hidden() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn set_clear(&mut self, clear: bool) {
        self.clear = clear;
    }

    /// Build the indicatif style. A template indicatif rejects falls back
    /// to its default bar.
    pub fn to_progress_style(self) -> ProgressStyle {
        let mut style = ProgressStyle::default_bar();
        if let Some(template) = self.template {
            style = style
                .template(&template)
                .unwrap_or_else(|_| ProgressStyle::default_bar());
        }
        if let Some(chars) = self.progress_chars {
            style = style.progress_chars(&chars);
        }
        style
    }

    /// A bar of `len` units, hidden when these options are disabled.
    pub fn to_progress_bar(self, len: u64) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }
        let style = self.to_progress_style();
        ProgressBar::new(len).with_style(style)
    }
}
