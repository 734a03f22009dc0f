//! Multiple event subscribers example
//!
//! This example demonstrates how multiple parts of your application
//! can independently subscribe to download events, here a progress
//! display and a failure log, the way a GUI shell would split them.

use aura_dl::{Config, Event, FrameDownloader, LoginConfig, RunOptions};
use std::path::Path;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing (optional)
    // Uncomment if you add tracing-subscriber to your dependencies:
    // tracing_subscriber::fmt::init();

    let config = Config {
        login: LoginConfig {
            email: "your-email@example.com".to_string(),
            password: "your-password".to_string(),
        },
        ..Default::default()
    };

    let downloader = FrameDownloader::new(config)?;

    // UI subscriber - only cares about progress
    let mut ui_events = downloader.subscribe();
    tokio::spawn(async move {
        println!("[UI] Starting UI event subscriber");
        while let Ok(event) = ui_events.recv().await {
            match event {
                Event::Considering {
                    index,
                    total,
                    filename,
                } => {
                    println!("[UI] {index}/{total}: {filename}");
                }
                Event::Complete { summary } => {
                    println!(
                        "[UI] Finished: {} new, {} already present",
                        summary.downloaded, summary.skipped
                    );
                }
                Event::Cancelled => {
                    println!("[UI] Stopped by user");
                }
                _ => {}
            }
        }
    });

    // Failure-log subscriber - only cares about what went wrong
    let mut log_events = downloader.subscribe();
    tokio::spawn(async move {
        println!("[LOG] Starting failure log subscriber");
        while let Ok(event) = log_events.recv().await {
            if let Event::ItemFailed { index, error } = event {
                eprintln!("[LOG] photo {index} left for the next run: {error}");
            }
        }
    });

    let summary = downloader
        .run(
            "your-frame-id",
            Path::new("./photos"),
            RunOptions::default(),
        )
        .await?;

    println!(
        "Run summary: {}/{} downloaded, {} skipped",
        summary.downloaded, summary.total, summary.skipped
    );

    Ok(())
}
