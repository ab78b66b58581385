//! Download items, their observers and per-item outcomes.
//!
//! Each [`DownloadItem`] owns its own [`DownloadObserver`]: progress,
//! success and failure notifications for one item never reach another.
//!
//! - [`item`] - the [`DownloadItem`] struct and URL handling
//! - [`observer`] - the [`DownloadObserver`] trait and closure adapter
//! - [`summary`] - download result tracking and status reporting
//!
//! # Examples
//!
//! ```rust
//! use rangedl::download::{Callbacks, DownloadItem};
//!
//! let item = DownloadItem::try_from("https://example.com/video.mp4")?
//!     .with_observer(
//!         Callbacks::new()
//!             .on_progress(|loaded, total| println!("{loaded}/{total}"))
//!             .on_success(|data| println!("got {} bytes", data.len())),
//!     );
//! assert_eq!(item.filename(), "video.mp4");
//! # Ok::<(), rangedl::Error>(())
//! ```

pub mod item;
pub mod observer;
pub mod summary;

pub use item::DownloadItem;
pub use observer::{Callbacks, DownloadObserver, NoopObserver};
pub use summary::{Status, Summary};
