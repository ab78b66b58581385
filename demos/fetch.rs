//! Download the URLs given on the command line into memory.
//!
//! ```text
//! RUST_LOG=rangedl=debug cargo run --example fetch -- https://example.com/a.bin https://example.com/b.bin
//! ```

use color_eyre::{eyre::eyre, Result};
use rangedl::download::{Callbacks, DownloadItem, Status};
use rangedl::downloader::DownloaderBuilder;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let urls: Vec<String> = std::env::args().skip(1).collect();
    if urls.is_empty() {
        return Err(eyre!("usage: fetch <url>..."));
    }

    let downloader = DownloaderBuilder::new()
        .max_concurrent_downloads(3)
        .max_threads(8)
        .build()?;

    for url in &urls {
        let name = url.clone();
        let callbacks = Callbacks::new()
            .on_success(move |data| println!("{}: {} bytes", name, data.len()));
        downloader.add_download(DownloadItem::try_from(url.as_str())?.with_observer(callbacks));
    }

    // Stop everything on Ctrl-C.
    let handle = downloader.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            handle.cancel_all_downloads();
        }
    });

    let summaries = downloader.start_downloads().await;
    for summary in &summaries {
        match summary.status() {
            Status::Success => {}
            Status::Fail(msg) => eprintln!("{} failed: {}", summary.url(), msg),
            Status::Cancelled => eprintln!("{} cancelled", summary.url()),
            Status::NotStarted => {}
        }
    }

    let failed = summaries.iter().filter(|s| !s.is_success()).count();
    println!("{} of {} downloads succeeded", summaries.len() - failed, summaries.len());
    Ok(())
}
