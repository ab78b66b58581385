//! Tests for the progress module functionality.
//!
//! This file contains tests for progress bar styling, display management,
//! and the bars driven by a running task.

use indicatif::ProgressBar;
use rangedl::progress::{ProgressBarOpts, ProgressDisplay, StyleOptions};
use rangedl::task::{DownloadTask, DownloadTaskOptions};

mod common;
use common::helpers::*;

#[test]
fn test_style_options_default() {
    let style = StyleOptions::default();
    assert!(style.is_enabled());
    assert_eq!(style.child().clone().to_progress_bar(0).position(), 0);
}

#[test]
fn test_style_options_disabled() {
    let style = create_disabled_style_options();
    assert!(!style.is_enabled());
}

#[test]
fn test_style_options_setters() {
    let mut style = create_disabled_style_options();
    style.set_child(ProgressBarOpts::bytes());
    assert!(style.is_enabled());

    style.set_main(ProgressBarOpts::items());
    style.set_child(ProgressBarOpts::hidden());
    assert!(style.is_enabled());
}

#[test]
fn test_progress_bar_opts_lengths() {
    let pb = ProgressBarOpts::items().to_progress_bar(4);
    assert_eq!(pb.length(), Some(4));

    let pb = ProgressBarOpts::bytes().to_progress_bar(100);
    assert_eq!(pb.length(), Some(100));

    let pb = create_custom_progress_opts("{bar:20} {pos}/{len}", "=> ").to_progress_bar(7);
    assert_eq!(pb.length(), Some(7));
}

#[test]
fn test_progress_bar_opts_hidden() {
    let pb = ProgressBarOpts::hidden().to_progress_bar(100);
    assert!(pb.is_hidden());
}

#[test]
fn test_progress_bar_opts_set_clear() {
    let mut opts = ProgressBarOpts::default();
    opts.set_clear(false);
    let pb = opts.clone().to_progress_bar(100);
    assert_eq!(pb.length(), Some(100));

    opts.set_clear(true);
    let pb = opts.to_progress_bar(50);
    assert_eq!(pb.length(), Some(50));
}

#[test]
fn test_progress_display_main_counts_items() {
    let display = ProgressDisplay::new(create_disabled_style_options(), 3, false);
    let initial_position = display.main().position();

    display.increment_main();
    display.increment_main();
    assert_eq!(display.main().position(), initial_position + 2);
    display.finish();
}

#[test]
fn test_progress_display_single_item() {
    let display = ProgressDisplay::new(create_disabled_style_options(), 1, true);
    assert!(display.main().is_hidden());
}

#[test]
fn test_progress_display_child_is_labelled() {
    let display = ProgressDisplay::new(create_disabled_style_options(), 2, false);
    let child = display.create_child_progress("data.bin");

    assert_eq!(child.message(), "data.bin");
    child.set_length(1000);
    child.set_position(500);
    assert_eq!(child.position(), 500);
    display.finish_child(child);
}

#[tokio::test]
async fn test_task_drives_its_progress_bar() {
    let origin = FakeOrigin::new();
    let body = random_body(150_000);
    let url = origin.serve("/bar.bin", body.clone());
    let recorder = Recorder::new();

    let pb = ProgressBar::hidden();
    let task = DownloadTask::new(
        origin.client(),
        recorded_item(&url, &recorder),
        DownloadTaskOptions::default().chunk_size(40_000),
    )
    .with_progress_bar(pb.clone());

    task.download().await.unwrap();

    let len = body.len() as u64;
    assert_eq!(pb.length(), Some(len));
    assert_eq!(pb.position(), len);
    assert_eq!(recorder.last_progress(), Some((len, len)));
}
