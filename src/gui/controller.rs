use iced::Size;

use crate::config::WindowConfig;
use crate::extractors::{AudioFormat, Bitrate, Channels, DownloadRequest};
use crate::ValidationError;

pub const INITIAL_STATUS: &str = "Enter a YouTube URL or provide the artist and song name.";
pub const DOWNLOADING_STATUS: &str = "Downloading...";

/// Artist/song used when only a URL was given
pub const PLACEHOLDER_LABEL: &str = "Unknown";

/// Raw contents of the form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub url: String,
    pub artist: String,
    pub song_name: String,
    pub format: AudioFormat,
    pub bitrate: Bitrate,
    pub channels: Channels,
}

impl FormState {
    /// Turn the form into a request, or explain what is missing
    pub fn to_request(&self) -> Result<DownloadRequest, ValidationError> {
        let has_url = !self.url.is_empty();

        if !has_url && (self.artist.is_empty() || self.song_name.is_empty()) {
            return Err(ValidationError::MissingInput);
        }

        let (artist, song_name) = if self.artist.is_empty() && self.song_name.is_empty() {
            (PLACEHOLDER_LABEL.to_string(), PLACEHOLDER_LABEL.to_string())
        } else {
            (self.artist.clone(), self.song_name.clone())
        };

        Ok(DownloadRequest {
            artist,
            song_name,
            url: has_url.then(|| self.url.clone()),
            format: self.format,
            bitrate: self.bitrate,
            channels: self.channels,
        })
    }
}

/// Everything the view renders besides the form values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub advanced_panel_visible: bool,

    /// Artist/song inputs are locked while a URL is entered
    pub search_inputs_enabled: bool,

    pub status: String,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            advanced_panel_visible: false,
            search_inputs_enabled: true,
            status: INITIAL_STATUS.to_string(),
        }
    }
}

/// UI logic behind the window, free of any widget code
#[derive(Debug, Clone, Default)]
pub struct Controller {
    pub form: FormState,
    pub view: ViewState,
}

impl Controller {
    /// Validate the form. On success the status switches to in-progress and the
    /// request is returned for dispatch; on failure only the status changes.
    pub fn submit(&mut self) -> Option<DownloadRequest> {
        match self.form.to_request() {
            Ok(request) => {
                self.view.status = DOWNLOADING_STATUS.to_string();
                Some(request)
            }
            Err(err) => {
                tracing::debug!("Submission rejected: {}", err);
                self.view.status = err.to_string();
                None
            }
        }
    }

    /// URL mode and search mode are mutually exclusive
    pub fn on_url_changed(&mut self, text: String) {
        self.view.search_inputs_enabled = text.is_empty();
        self.form.url = text;
    }

    /// Flip the advanced panel and return the window size that fits it
    pub fn toggle_advanced_panel(&mut self, window: &WindowConfig) -> Size {
        self.view.advanced_panel_visible = !self.view.advanced_panel_visible;
        self.window_size(window)
    }

    pub fn window_size(&self, window: &WindowConfig) -> Size {
        let extra = if self.view.advanced_panel_visible {
            window.advanced_panel_height
        } else {
            0.0
        };
        Size::new(window.width, window.height + extra)
    }

    pub fn advanced_toggle_label(&self) -> &'static str {
        if self.view.advanced_panel_visible {
            "Hide advanced options: -"
        } else {
            "Show advanced options: +"
        }
    }

    pub fn on_task_complete(&mut self, result: String) {
        self.view.status = result;
    }
}
