//! Terminal progress for a downloader run.
//!
//! A run draws one main bar counting finished downloads and, under it, one
//! bar per running task that follows the task's byte counter. The task bar
//! is labelled with the item's file name and cleared when the task settles.
//!
//! - `style`: templates and options of both bars
//! - `display`: the `MultiProgress` holding them during a run
//!
//! ```rust
//! use rangedl::downloader::DownloaderBuilder;
//! use rangedl::progress::{ProgressBarOpts, StyleOptions};
//!
//! # fn main() -> rangedl::Result<()> {
//! let mut style = StyleOptions::default();
//! style.set_main(ProgressBarOpts::hidden());
//!
//! let downloader = DownloaderBuilder::new().style_options(style).build()?;
//! # Ok(())
//! # }
//! ```

pub mod display;
pub mod style;

pub use display::ProgressDisplay;
pub use style::{ProgressBarOpts, StyleOptions};
