use crate::extractors::{AudioFormat, Bitrate, Channels};

#[derive(Debug, Clone)]
pub enum Message {
    // Form
    UrlChanged(String),
    ArtistChanged(String),
    SongNameChanged(String),
    FormatSelected(AudioFormat),
    DownloadPressed,

    // Advanced
    ToggleAdvanced,
    BitrateSelected(Bitrate),
    ChannelsSelected(Channels),

    /// Terminal result of one background download
    DownloadFinished(String),
}
