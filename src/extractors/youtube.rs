use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;

use super::{select_candidate, Candidate, FetchConfig, MediaFetcher, Query};
use crate::FetchError;

/// YouTube audio fetcher using yt-dlp
pub struct YtDlpFetcher {
    yt_dlp_path: String,
    ffmpeg_location: Option<String>,
}

impl YtDlpFetcher {
    pub fn new(yt_dlp_path: impl Into<String>) -> Self {
        Self {
            yt_dlp_path: yt_dlp_path.into(),
            ffmpeg_location: None,
        }
    }

    /// Point yt-dlp at a specific ffmpeg binary or directory
    pub fn with_ffmpeg_location(mut self, location: Option<String>) -> Self {
        self.ffmpeg_location = location;
        self
    }

    /// List the candidates yt-dlp resolves the query to, without downloading
    async fn probe(&self, query: &Query) -> Result<Vec<Candidate>, FetchError> {
        tracing::debug!("Probing candidates for: {}", query);

        let output = Command::new(&self.yt_dlp_path)
            .args(["--dump-json", "--no-playlist", "--no-warnings"])
            .arg(query.to_string())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|err| self.spawn_error(err))?;

        if !output.status.success() {
            return Err(process_failed(&output));
        }

        parse_candidates(&String::from_utf8_lossy(&output.stdout))
    }

    /// Download and transcode a single resolved target
    async fn download(&self, target: &str, config: &FetchConfig) -> Result<(), FetchError> {
        let args = download_args(config, target, self.ffmpeg_location.as_deref());
        tracing::debug!("Running {} {}", self.yt_dlp_path, args.join(" "));

        let output = Command::new(&self.yt_dlp_path)
            .args(&args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|err| self.spawn_error(err))?;

        if !output.status.success() {
            return Err(process_failed(&output));
        }

        Ok(())
    }

    fn spawn_error(&self, err: std::io::Error) -> FetchError {
        if err.kind() == std::io::ErrorKind::NotFound {
            FetchError::ToolUnavailable(self.yt_dlp_path.clone())
        } else {
            FetchError::Io(err)
        }
    }
}

#[async_trait]
impl MediaFetcher for YtDlpFetcher {
    async fn fetch(&self, query: &Query, config: &FetchConfig) -> Result<(), FetchError> {
        let candidates = self.probe(query).await?;
        tracing::debug!("{} candidate(s) for {}", candidates.len(), query);

        let selected = select_candidate(candidates, config.filter.as_ref())?;
        tracing::info!(
            "Downloading {} ({})",
            selected.title.as_deref().unwrap_or("untitled"),
            selected.id.as_deref().unwrap_or("no id")
        );

        // Download the page that passed the filter rather than re-running the search
        let query_arg = query.to_string();
        let target = selected.webpage_url.as_deref().unwrap_or(&query_arg);

        self.download(target, config).await
    }
}

/// Parse `--dump-json` output, one JSON document per line
fn parse_candidates(stdout: &str) -> Result<Vec<Candidate>, FetchError> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| serde_json::from_str::<Candidate>(line).map_err(FetchError::from))
        .collect()
}

/// Arguments for the download/extract run
fn download_args(config: &FetchConfig, target: &str, ffmpeg_location: Option<&str>) -> Vec<String> {
    // yt-dlp treats '%' in the template as a field reference
    let stem = config.output_stem.to_string_lossy().replace('%', "%%");

    let mut args = vec![
        "--no-playlist".to_string(),
        "--no-warnings".to_string(),
        "--format".to_string(),
        config.format_selector.clone(),
        "--extract-audio".to_string(),
        "--audio-format".to_string(),
        config.audio_format.as_str().to_string(),
        "--audio-quality".to_string(),
        config.bitrate.as_quality_arg(),
        "--postprocessor-args".to_string(),
        format!("ffmpeg:-ac {}", config.channels.count()),
        "--output".to_string(),
        format!("{}.%(ext)s", stem),
    ];

    if let Some(location) = ffmpeg_location {
        args.push("--ffmpeg-location".to_string());
        args.push(location.to_string());
    }

    args.push(target.to_string());
    args
}

fn process_failed(output: &std::process::Output) -> FetchError {
    FetchError::ProcessFailed {
        status: output.status.to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    }
}
