//! The per-asset download loop.
//!
//! One run is strictly sequential: authenticate, list, then walk the listing
//! in server order. Per-asset failures are contained here (logged, emitted
//! as events, followed by a backoff sleep) and never abort the run. Only
//! cancellation and the pre-loop fatal errors (authentication, listing)
//! escape to the caller.

use super::FrameDownloader;
use crate::client::Session;
use crate::error::{Error, Result};
use crate::naming;
use crate::types::{AssetDescriptor, Event, RunOptions, RunSummary};
use std::path::Path;

/// What happened to one asset during an iteration
enum ItemOutcome {
    Downloaded,
    Skipped,
}

impl FrameDownloader {
    /// Run the full pipeline for one frame: authenticate, list assets, then
    /// download each asset in listing order.
    ///
    /// With `options.count_only` the per-asset loop is skipped entirely: no
    /// directory is created, no image is fetched, and the summary carries
    /// only the total.
    pub async fn run(
        &self,
        frame_id: &str,
        target_dir: &Path,
        options: RunOptions,
    ) -> Result<RunSummary> {
        self.emit_event(Event::Authenticating);
        let session = Session::login(&self.config.api, &self.config.login).await?;
        self.emit_event(Event::Authenticated {
            user_id: session.user_id().to_string(),
        });

        self.emit_event(Event::Listing {
            frame_id: frame_id.to_string(),
        });
        let assets = session.list_assets(frame_id).await?;
        self.emit_event(Event::Listed {
            total: assets.len(),
        });

        self.run_assets(&session, &assets, target_dir, options).await
    }

    /// Run the pipeline for a frame named in the configuration's `frames`
    /// map, using that frame's directory and layout settings.
    pub async fn run_named(&self, frame_name: &str, count_only: bool) -> Result<RunSummary> {
        let frame = self.config.frame(frame_name)?.clone();
        self.run(
            &frame.frame_id,
            &frame.download_dir,
            RunOptions {
                organize_by_year: frame.organize_by_year,
                count_only,
            },
        )
        .await
    }

    async fn run_assets(
        &self,
        session: &Session,
        assets: &[serde_json::Value],
        target_dir: &Path,
        options: RunOptions,
    ) -> Result<RunSummary> {
        let total = assets.len();
        tracing::info!(total, "found photos");

        if options.count_only {
            return Ok(RunSummary {
                downloaded: 0,
                skipped: 0,
                total,
            });
        }

        if !target_dir.is_dir() {
            tracing::info!(path = %target_dir.display(), "creating images directory");
        }
        tokio::fs::create_dir_all(target_dir).await?;

        tracing::info!(path = %target_dir.display(), "starting download run");

        let mut summary = RunSummary {
            total,
            ..Default::default()
        };

        for (i, raw) in assets.iter().enumerate() {
            let index = i + 1;

            // Cancellation is polled before any I/O for the item, never
            // mid-write.
            if self.is_cancelled() {
                tracing::info!("download cancelled by user");
                self.emit_event(Event::Cancelled);
                return Err(Error::Cancelled);
            }

            match self
                .process_asset(session, raw, index, total, target_dir, options.organize_by_year)
                .await
            {
                Ok(ItemOutcome::Downloaded) => {
                    summary.downloaded += 1;
                    // Static pacing between fetches, applied only after an
                    // actual download.
                    tokio::time::sleep(self.config.transfer.throttle_delay()).await;
                }
                Ok(ItemOutcome::Skipped) => {
                    summary.skipped += 1;
                }
                Err(error) => {
                    // Counted in neither bucket: the item stays unresolved
                    // and the next full run is its retry.
                    tracing::error!(index, error = %error, "item failed to download");
                    self.emit_event(Event::ItemFailed {
                        index,
                        error: error.to_string(),
                    });
                    tokio::time::sleep(self.config.transfer.failure_backoff()).await;
                }
            }
        }

        tracing::info!(
            downloaded = summary.downloaded,
            skipped = summary.skipped,
            total = summary.total,
            "download run complete"
        );
        self.emit_event(Event::Complete { summary });
        Ok(summary)
    }

    async fn process_asset(
        &self,
        session: &Session,
        raw: &serde_json::Value,
        index: usize,
        total: usize,
        target_dir: &Path,
        organize_by_year: bool,
    ) -> Result<ItemOutcome> {
        let asset = AssetDescriptor::from_value(raw)?;
        let filename = naming::target_filename(&asset);
        let target = naming::target_path(target_dir, &asset, organize_by_year);

        if organize_by_year
            && let Some(year_dir) = target.parent()
            && !year_dir.is_dir()
        {
            tracing::debug!(path = %year_dir.display(), "creating year directory");
            tokio::fs::create_dir_all(year_dir).await?;
        }

        // Fires before the existence check: progress means "now considering",
        // not "now downloaded".
        self.emit_event(Event::Considering {
            index,
            total,
            filename: filename.clone(),
        });

        if tokio::fs::try_exists(&target).await? {
            tracing::info!(index, filename = %filename, "skipping, already downloaded");
            self.emit_event(Event::Skipped { index, filename });
            return Ok(ItemOutcome::Skipped);
        }

        tracing::info!(index, filename = %filename, "downloading");
        let response = session
            .fetch_image(&asset, self.config.transfer.image_timeout())
            .await?;
        write_body(&target, response).await?;

        self.emit_event(Event::Downloaded { index, filename });
        Ok(ItemOutcome::Downloaded)
    }
}

/// Stream a response body to the target file.
///
/// A crash or mid-stream error can leave a partial file behind; that is an
/// accepted risk, matching the dedup model where presence on disk is the
/// whole ledger.
async fn write_body(target: &Path, response: reqwest::Response) -> Result<()> {
    use futures::StreamExt;
    use tokio::io::AsyncWriteExt;

    let mut file = tokio::fs::File::create(target).await?;
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        file.write_all(&chunk?).await?;
    }
    file.flush().await?;
    Ok(())
}
