use std::path::Path;

pub mod flac;
pub mod mp3;

pub use flac::VorbisCommentWriter;
pub use mp3::Id3Writer;

use crate::extractors::AudioFormat;
use crate::TagWriteError;

/// Artist/title pair embedded into a finished file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackTags {
    pub title: String,
    pub artist: String,
}

impl TrackTags {
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
        }
    }
}

/// Trait for embedding tags into one kind of container
pub trait TagWriter: Send + Sync {
    fn write(&self, path: &Path, tags: &TrackTags) -> Result<(), TagWriteError>;

    /// Get the name of the tag format this writer produces
    fn name(&self) -> &'static str;
}

/// Writer for formats that get no embedded tags
pub struct NoopWriter;

impl TagWriter for NoopWriter {
    fn write(&self, path: &Path, _tags: &TrackTags) -> Result<(), TagWriteError> {
        tracing::debug!("No tag writer for {}, leaving it untouched", path.display());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "none"
    }
}

/// Formats that carry embedded tags. Anything missing here falls back to [`NoopWriter`].
static TAG_WRITERS: &[(AudioFormat, &dyn TagWriter)] = &[
    (AudioFormat::Mp3, &Id3Writer),
    (AudioFormat::Flac, &VorbisCommentWriter),
];

/// Look up the tag writer for an output format
pub fn writer_for(format: AudioFormat) -> &'static dyn TagWriter {
    TAG_WRITERS
        .iter()
        .find(|(supported, _)| *supported == format)
        .map(|(_, writer)| *writer)
        .unwrap_or(&NoopWriter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writer_table() {
        assert_eq!(writer_for(AudioFormat::Mp3).name(), "ID3v2.4");
        assert_eq!(writer_for(AudioFormat::Flac).name(), "Vorbis comments");

        for format in [
            AudioFormat::Wav,
            AudioFormat::Vorbis,
            AudioFormat::M4a,
            AudioFormat::Opus,
            AudioFormat::Aac,
            AudioFormat::Alac,
        ] {
            assert_eq!(writer_for(format).name(), "none", "{} should not be tagged", format);
        }
    }

    #[test]
    fn test_noop_writer_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Artist - Song.wav");
        let contents = b"RIFF\x24\x00\x00\x00WAVEfmt ".to_vec();
        std::fs::write(&path, &contents).unwrap();

        writer_for(AudioFormat::Wav)
            .write(&path, &TrackTags::new("Song", "Artist"))
            .unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), contents);
    }
}
