use anyhow::{Context, Result};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use audio_downloader::extractors::youtube::YtDlpFetcher;
use audio_downloader::{gui, utils, Config, Downloader};

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "audio_downloader=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;

    // Check for required external dependencies (non-fatal, the window still opens)
    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let missing_deps = runtime.block_on(utils::check_dependencies(
        &config.app.yt_dlp_path,
        config.app.ffmpeg_location.as_deref(),
    ));
    drop(runtime);
    for dep in missing_deps {
        tracing::warn!("Missing dependency: {}", dep);
    }

    fs_err::create_dir_all(&config.app.output_dir)
        .context("Failed to create output directory")?;

    let fetcher = YtDlpFetcher::new(config.app.yt_dlp_path.clone())
        .with_ffmpeg_location(config.app.ffmpeg_location.clone());
    let downloader = Arc::new(Downloader::new(config.app.output_dir.clone(), Arc::new(fetcher)));

    tracing::info!("Saving downloads to {}", config.app.output_dir.display());

    gui::run(config.window, downloader).context("Window closed with an error")?;

    Ok(())
}
