//! Download demo: drives a simulated download next to an indeterminate
//! loader and prints the button label and notices as they change.
//!
//! Usage: download_progress [--cancel-at PERCENT] [--config FILE]

use anyhow::{bail, Context};
use gallery_sdk::gallery_core::GalleryConfig;
use gallery_sdk::prelude::*;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;

struct Options {
    cancel_at: Option<u8>,
    config: Option<String>,
}

fn parse_args() -> anyhow::Result<Options> {
    let mut options = Options {
        cancel_at: None,
        config: None,
    };
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--cancel-at" => {
                let value = args.next().context("--cancel-at needs a percentage")?;
                let percent: u8 = value
                    .parse()
                    .with_context(|| format!("invalid percentage '{}'", value))?;
                if percent == 0 || percent >= 100 {
                    bail!("--cancel-at must be between 1 and 99");
                }
                options.cancel_at = Some(percent);
            }
            "--config" => {
                options.config = Some(args.next().context("--config needs a file path")?);
            }
            other => bail!("unknown argument '{}'", other),
        }
    }
    Ok(options)
}

/// Print notices until both the download and the loader have finished.
/// Returns the notices in the order they arrived.
async fn drive(
    controller: &ProgressController,
    events: &mut UnboundedReceiver<ProgressEvent>,
    loader_events: &mut UnboundedReceiver<LoadingEvent>,
    cancel_at: Option<u8>,
    poll: Duration,
) -> anyhow::Result<Vec<Notice>> {
    let mut notices = Vec::new();
    let mut download_done = false;
    let mut loading_done = false;

    let mut ticker = tokio::time::interval(poll);
    while !(download_done && loading_done) {
        tokio::select! {
            Some(event) = events.recv(), if !download_done => {
                if let Some(notice) = Notice::for_progress(&event) {
                    println!("notice: {}", notice);
                    notices.push(notice);
                    download_done = true;
                }
            }
            Some(event) = loader_events.recv(), if !loading_done => {
                let notice = Notice::for_loading(&event);
                println!("notice: {}", notice);
                notices.push(notice);
                loading_done = true;
            }
            _ = ticker.tick() => {
                if let (Some(limit), false) = (cancel_at, download_done) {
                    if controller.observe().percent() >= limit {
                        controller.cancel()?;
                    }
                }
            }
        }
    }
    Ok(notices)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let options = parse_args()?;
    let config = match &options.config {
        Some(path) => GalleryConfig::from_file(path)
            .with_context(|| format!("failed to load config from {}", path))?,
        None => GalleryConfig::default(),
    };
    let config = gallery_sdk::init_with_config(config)?;

    let (loader, mut loader_events) = LoadingTask::linear(&config.loading);
    loader.start();

    let controller = ProgressDriver::spawn(ProgressTask::with_config(&config.progress)?);
    let mut events = controller.events()?;
    controller.subscribe(|snapshot| println!("[{}]", snapshot.action_label("Download")));

    println!("[{}]", controller.observe().action_label("Download"));
    controller.start()?;

    drive(
        &controller,
        &mut events,
        &mut loader_events,
        options.cancel_at,
        config.progress.tick_interval() / 2,
    )
    .await?;

    let finished = controller.shutdown().await?;
    println!(
        "final: {:?} at {}%",
        finished.status,
        finished.percent()
    );
    Ok(())
}
