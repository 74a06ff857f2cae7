use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::extractors::{
    self, AudioFormat, CandidateFilter, DownloadRequest, DurationPolicy, FetchConfig, MediaFetcher,
    Query,
};
use crate::metadata::{self, TrackTags};
use crate::TagWriteError;

/// Result string for a download whose tags (if any) were written
pub const DOWNLOAD_COMPLETED: &str = "Download completed.";

/// First line of every failure result
pub const FAILURE_PREFIX: &str = "Error while downloading";

/// Fetch, transcode and tag pipeline behind the Download button
pub struct Downloader {
    output_dir: PathBuf,
    fetcher: Arc<dyn MediaFetcher>,
    filter: Arc<dyn CandidateFilter>,
}

impl Downloader {
    /// Create a downloader writing into `output_dir` with the default duration policy
    pub fn new(output_dir: impl Into<PathBuf>, fetcher: Arc<dyn MediaFetcher>) -> Self {
        Self {
            output_dir: output_dir.into(),
            fetcher,
            filter: Arc::new(DurationPolicy::default()),
        }
    }

    /// Output path without extension for a request
    pub fn output_stem(&self, request: &DownloadRequest) -> PathBuf {
        self.output_dir.join(request.file_stem())
    }

    /// Run one request to completion and describe the outcome.
    ///
    /// Never fails: every error ends up in the returned message.
    pub async fn download_audio(&self, request: &DownloadRequest) -> String {
        let stem = self.output_stem(request);
        let config = FetchConfig::new(&stem, request, self.filter.clone());
        let query = Query::from_request(request);

        tracing::info!(
            "Starting download for {} as {} ({} kbps, {})",
            query,
            request.format,
            request.bitrate,
            request.channels
        );

        if let Err(err) = self.fetcher.fetch(&query, &config).await {
            tracing::error!("Download failed for {}: {}", query, err);
            return format!("{}\n{}\n{}", FAILURE_PREFIX, query, err);
        }

        tracing::info!("Downloaded {}", config.output_path().display());

        let artist = request.artist.clone();
        let song_name = request.song_name.clone();
        let format = request.format;
        let tagged = tokio::task::spawn_blocking(move || {
            apply_metadata(&stem, &artist, &song_name, format)
        })
        .await
        .unwrap_or_else(|err| Err(TagWriteError::Interrupted(err.to_string())));

        match tagged {
            Ok(()) => DOWNLOAD_COMPLETED.to_string(),
            Err(err) => {
                tracing::warn!("Could not tag {}: {}", config.output_path().display(), err);
                format!("Download completed, but tags could not be written: {}", err)
            }
        }
    }
}

/// Embed artist/title into the produced file, for the formats that carry tags
pub fn apply_metadata(
    file_stem: &Path,
    artist: &str,
    song_name: &str,
    format: AudioFormat,
) -> Result<(), TagWriteError> {
    let path = extractors::output_path(file_stem, format);
    let writer = metadata::writer_for(format);
    tracing::debug!("Tagging {} with {}", path.display(), writer.name());

    writer.write(&path, &TrackTags::new(song_name, artist))
}
