//! Basic download example
//!
//! This example demonstrates the core functionality of aura-dl:
//! - Building a configuration with credentials
//! - Creating a downloader instance
//! - Subscribing to progress events
//! - Running the pipeline for one frame
//! - Cancelling with Ctrl+C

use aura_dl::{Config, Event, FrameDownloader, LoginConfig, RunOptions, spawn_signal_cancel};
use std::path::Path;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging (optional)
    // Uncomment if you add tracing-subscriber to your dependencies:
    // tracing_subscriber::fmt::init();

    // Build configuration; endpoints and pacing use production defaults
    let config = Config {
        login: LoginConfig {
            email: "your-email@example.com".to_string(),
            password: "your-password".to_string(),
        },
        ..Default::default()
    };

    // Create downloader instance
    let downloader = FrameDownloader::new(config)?;

    // Ctrl+C winds down the run at the next per-photo boundary
    spawn_signal_cancel(&downloader);

    // Subscribe to events
    let mut events = downloader.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                Event::Considering {
                    index,
                    total,
                    filename,
                } => {
                    println!("[{index}/{total}] {filename}");
                }
                Event::Downloaded { filename, .. } => {
                    println!("  ✓ downloaded {filename}");
                }
                Event::Skipped { filename, .. } => {
                    println!("  - already have {filename}");
                }
                Event::ItemFailed { index, error } => {
                    println!("  ✗ photo {index} failed: {error}");
                }
                _ => {}
            }
        }
    });

    // Run the pipeline for one frame
    let summary = downloader
        .run(
            "your-frame-id",
            Path::new("./photos"),
            RunOptions {
                organize_by_year: true,
                ..Default::default()
            },
        )
        .await?;

    println!(
        "Done: {} downloaded, {} skipped, {} total",
        summary.downloaded, summary.skipped, summary.total
    );

    Ok(())
}
