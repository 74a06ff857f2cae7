use async_trait::async_trait;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub mod filter;
pub mod youtube;

pub use filter::{CandidateFilter, DurationPolicy};

use crate::FetchError;

/// Prefix yt-dlp uses for "search YouTube and take the best match"
pub const SEARCH_PREFIX: &str = "ytsearch";

/// Output formats offered by the transcoder
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AudioFormat {
    #[default]
    Mp3,
    Wav,
    Flac,
    Vorbis,
    M4a,
    Opus,
    Aac,
    Alac,
}

impl AudioFormat {
    pub const ALL: &'static [AudioFormat] = &[
        AudioFormat::Mp3,
        AudioFormat::Wav,
        AudioFormat::Flac,
        AudioFormat::Vorbis,
        AudioFormat::M4a,
        AudioFormat::Opus,
        AudioFormat::Aac,
        AudioFormat::Alac,
    ];

    /// Codec name as understood by `yt-dlp --audio-format`
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Wav => "wav",
            AudioFormat::Flac => "flac",
            AudioFormat::Vorbis => "vorbis",
            AudioFormat::M4a => "m4a",
            AudioFormat::Opus => "opus",
            AudioFormat::Aac => "aac",
            AudioFormat::Alac => "alac",
        }
    }

    /// File extension of the container the extractor writes for this codec.
    /// aac and alac both end up inside an .m4a container.
    pub fn extension(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Wav => "wav",
            AudioFormat::Flac => "flac",
            AudioFormat::Vorbis => "ogg",
            AudioFormat::M4a | AudioFormat::Aac | AudioFormat::Alac => "m4a",
            AudioFormat::Opus => "opus",
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Target bitrate for lossy codecs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Bitrate {
    Kbps64,
    Kbps128,
    Kbps192,
    Kbps256,
    #[default]
    Kbps320,
}

impl Bitrate {
    pub const ALL: &'static [Bitrate] = &[
        Bitrate::Kbps64,
        Bitrate::Kbps128,
        Bitrate::Kbps192,
        Bitrate::Kbps256,
        Bitrate::Kbps320,
    ];

    pub fn kbps(&self) -> u16 {
        match self {
            Bitrate::Kbps64 => 64,
            Bitrate::Kbps128 => 128,
            Bitrate::Kbps192 => 192,
            Bitrate::Kbps256 => 256,
            Bitrate::Kbps320 => 320,
        }
    }

    /// Value for `yt-dlp --audio-quality`
    pub fn as_quality_arg(&self) -> String {
        format!("{}K", self.kbps())
    }
}

impl fmt::Display for Bitrate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kbps())
    }
}

/// Output channel layout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Channels {
    Mono,
    #[default]
    Stereo,
}

impl Channels {
    pub const ALL: &'static [Channels] = &[Channels::Mono, Channels::Stereo];

    pub fn label(&self) -> &'static str {
        match self {
            Channels::Mono => "Mono",
            Channels::Stereo => "Stereo",
        }
    }

    pub fn count(&self) -> u8 {
        match self {
            Channels::Mono => 1,
            Channels::Stereo => 2,
        }
    }
}

impl fmt::Display for Channels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One validated download, consumed by a single background task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub artist: String,
    pub song_name: String,
    pub url: Option<String>,
    pub format: AudioFormat,
    pub bitrate: Bitrate,
    pub channels: Channels,
}

impl DownloadRequest {
    /// Filename stem shared by the download and the tag writer
    pub fn file_stem(&self) -> String {
        format!("{} - {}", self.artist, self.song_name)
    }
}

/// What the extractor is asked to resolve
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// A direct video URL, passed through verbatim
    Url(String),
    /// Free-text search against the platform, best match wins
    Search(String),
}

impl Query {
    pub fn from_request(request: &DownloadRequest) -> Self {
        match request.url.as_deref() {
            Some(url) if !url.is_empty() => Query::Url(url.to_string()),
            _ => Query::Search(format!("{} {} audio", request.artist, request.song_name)),
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::Url(url) => f.write_str(url),
            Query::Search(terms) => write!(f, "{}:{}", SEARCH_PREFIX, terms),
        }
    }
}

/// Metadata of one item the extractor found for a query
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub title: Option<String>,

    /// Canonical page URL, used to download exactly the candidate that passed the filter
    #[serde(default)]
    pub webpage_url: Option<String>,

    /// Length in seconds, if the platform reports one
    #[serde(default)]
    pub duration: Option<f64>,
}

/// Everything the extractor needs besides the query
#[derive(Clone)]
pub struct FetchConfig {
    /// Output path without extension; the transcoder appends it
    pub output_stem: PathBuf,

    /// Stream selection expression
    pub format_selector: String,

    pub audio_format: AudioFormat,
    pub bitrate: Bitrate,
    pub channels: Channels,

    /// Applied to every candidate before committing to a download
    pub filter: Arc<dyn CandidateFilter>,
}

impl FetchConfig {
    pub fn new(
        output_stem: &Path,
        request: &DownloadRequest,
        filter: Arc<dyn CandidateFilter>,
    ) -> Self {
        Self {
            output_stem: output_stem.to_path_buf(),
            format_selector: format!("bestaudio/best[ext={}]", request.format),
            audio_format: request.format,
            bitrate: request.bitrate,
            channels: request.channels,
            filter,
        }
    }

    /// Path of the file the transcoder produces
    pub fn output_path(&self) -> PathBuf {
        output_path(&self.output_stem, self.audio_format)
    }
}

impl fmt::Debug for FetchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchConfig")
            .field("output_stem", &self.output_stem)
            .field("format_selector", &self.format_selector)
            .field("audio_format", &self.audio_format)
            .field("bitrate", &self.bitrate)
            .field("channels", &self.channels)
            .finish_non_exhaustive()
    }
}

/// Append the container extension without touching dots already in the stem
pub fn output_path(stem: &Path, format: AudioFormat) -> PathBuf {
    let mut path = stem.as_os_str().to_owned();
    path.push(".");
    path.push(format.extension());
    PathBuf::from(path)
}

/// Trait for resolving a query and producing the transcoded file
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaFetcher: Send + Sync {
    /// Resolve, filter, download and transcode. Blocks the calling task until the
    /// file at `config.output_path()` exists or the attempt failed.
    async fn fetch(&self, query: &Query, config: &FetchConfig) -> Result<(), FetchError>;
}

/// Pick the first candidate the filter accepts.
///
/// When every candidate is rejected the last rejection reason is reported.
pub fn select_candidate(
    candidates: Vec<Candidate>,
    filter: &dyn CandidateFilter,
) -> Result<Candidate, FetchError> {
    let mut last_rejection = None;

    for candidate in candidates {
        match filter.check(&candidate) {
            None => return Ok(candidate),
            Some(reason) => {
                tracing::debug!(
                    "Rejected candidate {}: {}",
                    candidate.id.as_deref().unwrap_or("<unknown>"),
                    reason
                );
                last_rejection = Some(reason);
            }
        }
    }

    match last_rejection {
        Some(reason) => Err(FetchError::Rejected(reason)),
        None => Err(FetchError::NoCandidates),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(url: Option<&str>) -> DownloadRequest {
        DownloadRequest {
            artist: "The Beatles".to_string(),
            song_name: "Yesterday".to_string(),
            url: url.map(str::to_string),
            format: AudioFormat::Mp3,
            bitrate: Bitrate::Kbps192,
            channels: Channels::Stereo,
        }
    }

    fn candidate(id: &str, duration: Option<f64>) -> Candidate {
        Candidate {
            id: Some(id.to_string()),
            duration,
            ..Default::default()
        }
    }

    #[test]
    fn test_channel_counts() {
        let counts: Vec<(String, u8)> = Channels::ALL
            .iter()
            .map(|channels| (channels.to_string(), channels.count()))
            .collect();
        assert_eq!(counts, vec![("Mono".to_string(), 1), ("Stereo".to_string(), 2)]);
    }

    #[test]
    fn test_container_extensions() {
        assert_eq!(AudioFormat::Mp3.extension(), "mp3");
        assert_eq!(AudioFormat::Vorbis.extension(), "ogg");
        assert_eq!(AudioFormat::Aac.extension(), "m4a");
        assert_eq!(AudioFormat::Alac.extension(), "m4a");
    }

    #[test]
    fn test_bitrate_quality_arg() {
        assert_eq!(Bitrate::Kbps192.as_quality_arg(), "192K");
        assert_eq!(Bitrate::default(), Bitrate::Kbps320);
    }

    #[test]
    fn test_search_query_from_artist_and_song() {
        let query = Query::from_request(&request(None));
        assert_eq!(query.to_string(), "ytsearch:The Beatles Yesterday audio");
        assert!(query.to_string().ends_with("search:The Beatles Yesterday audio"));
    }

    #[test]
    fn test_url_query_is_verbatim() {
        let query = Query::from_request(&request(Some("https://youtu.be/abc?t=1")));
        assert_eq!(query, Query::Url("https://youtu.be/abc?t=1".to_string()));
        assert_eq!(query.to_string(), "https://youtu.be/abc?t=1");

        let empty = Query::from_request(&request(Some("")));
        assert!(matches!(empty, Query::Search(_)));
    }

    #[test]
    fn test_output_path_keeps_dots_in_stem() {
        let path = output_path(Path::new("out/Mr. Big - To Be With You"), AudioFormat::Flac);
        assert_eq!(path, PathBuf::from("out/Mr. Big - To Be With You.flac"));
    }

    #[test]
    fn test_fetch_config_from_request() {
        let config = FetchConfig::new(
            Path::new("out/The Beatles - Yesterday"),
            &request(None),
            Arc::new(DurationPolicy::default()),
        );
        assert_eq!(config.format_selector, "bestaudio/best[ext=mp3]");
        assert_eq!(config.output_path(), PathBuf::from("out/The Beatles - Yesterday.mp3"));
        assert_eq!(config.channels.count(), 2);
    }

    #[test]
    fn test_select_first_accepted_candidate() {
        let policy = DurationPolicy::default();
        let selected = select_candidate(
            vec![
                candidate("short", Some(5.0)),
                candidate("song", Some(180.0)),
                candidate("later", Some(200.0)),
            ],
            &policy,
        )
        .unwrap();
        assert_eq!(selected.id.as_deref(), Some("song"));
    }

    #[test]
    fn test_select_reports_rejection_reason() {
        let policy = DurationPolicy::default();
        let err = select_candidate(vec![candidate("stream", Some(36_000.0))], &policy).unwrap_err();
        assert!(matches!(err, FetchError::Rejected(ref reason) if reason.contains("too long")));

        let err = select_candidate(Vec::new(), &policy).unwrap_err();
        assert!(matches!(err, FetchError::NoCandidates));
    }
}
