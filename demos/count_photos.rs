//! Count-only example
//!
//! Loads a JSON configuration file with named frames and reports how many
//! photos each frame holds, without fetching or writing anything.

use aura_dl::{Config, FrameDownloader};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Expects a config like:
    // {
    //   "login": {"email": "...", "password": "..."},
    //   "frames": {
    //     "living-room": {"frame_id": "...", "download_dir": "./photos"}
    //   }
    // }
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "aura.json".to_string());

    let config = Config::load_from_file(&config_path)?;
    let downloader = FrameDownloader::new(config.clone())?;

    for name in config.frame_names() {
        let summary = downloader.run_named(name, true).await?;
        println!("{name}: {} photos", summary.total);
    }

    Ok(())
}
