//! Audio Downloader - a small desktop tool for grabbing audio from YouTube
//!
//! This library resolves a URL or an artist/title search to a single video using
//! yt-dlp, transcodes the audio to the requested format and writes artist/title
//! tags into the result for the formats that support it.

pub mod config;
pub mod download;
pub mod extractors;
pub mod gui;
pub mod metadata;
pub mod utils;

pub use config::Config;
pub use download::Downloader;
pub use extractors::{AudioFormat, Bitrate, Channels, DownloadRequest, MediaFetcher, Query};
pub use metadata::TagWriter;

/// Result type used throughout the library
pub type Result<T> = anyhow::Result<T>;

/// Rejected form input, reported before anything is dispatched
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please provide artist and song name or a YouTube URL.")]
    MissingInput,
}

/// Errors raised while resolving, filtering or downloading a candidate
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("{0} is not available. Please install it: https://github.com/yt-dlp/yt-dlp")]
    ToolUnavailable(String),

    #[error("yt-dlp exited with {status}: {stderr}")]
    ProcessFailed { status: String, stderr: String },

    #[error("No matching video found")]
    NoCandidates,

    #[error("{0}")]
    Rejected(String),

    #[error("Could not parse video metadata: {0}")]
    Metadata(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors raised while embedding tags into a finished file
#[derive(thiserror::Error, Debug)]
pub enum TagWriteError {
    #[error("ID3 tag write failed: {0}")]
    Id3(#[from] id3::Error),

    #[error("Vorbis comment write failed: {0}")]
    Lofty(#[from] lofty::error::LoftyError),

    #[error("File has no {0} tag")]
    MissingTag(&'static str),

    #[error("Unsupported FLAC layout: {0}")]
    UnsupportedLayout(&'static str),

    #[error("Tag writer stopped unexpectedly: {0}")]
    Interrupted(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
