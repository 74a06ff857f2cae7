use id3::{Tag, TagLike, Version};
use std::path::Path;

use super::{TagWriter, TrackTags};
use crate::TagWriteError;

/// Writes TIT2/TPE1 frames into an MP3's ID3v2 tag
pub struct Id3Writer;

impl TagWriter for Id3Writer {
    fn write(&self, path: &Path, tags: &TrackTags) -> Result<(), TagWriteError> {
        let mut tag = match Tag::read_from_path(path) {
            Ok(tag) => tag,
            Err(id3::Error {
                kind: id3::ErrorKind::NoTag,
                ..
            }) => Tag::new(),
            Err(err) => return Err(err.into()),
        };

        tag.set_title(tags.title.as_str());
        tag.set_artist(tags.artist.as_str());

        // v2.4 stores text frames as UTF-8
        tag.write_to_path(path, Version::Id3v24)?;
        tracing::debug!("Wrote ID3 tags to {}", path.display());

        Ok(())
    }

    fn name(&self) -> &'static str {
        "ID3v2.4"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake_mp3(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("The Beatles - Yesterday.mp3");
        let mut bytes = vec![0xFF, 0xFB, 0x90, 0x64];
        bytes.extend(std::iter::repeat(0u8).take(413));
        std::fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn test_writes_title_and_artist() {
        let dir = tempfile::tempdir().unwrap();
        let path = fake_mp3(dir.path());

        Id3Writer
            .write(&path, &TrackTags::new("Yesterday", "The Beatles"))
            .unwrap();

        let tag = Tag::read_from_path(&path).unwrap();
        assert_eq!(tag.title(), Some("Yesterday"));
        assert_eq!(tag.artist(), Some("The Beatles"));
        assert!(tag.get("TIT2").is_some());
        assert!(tag.get("TPE1").is_some());
    }

    #[test]
    fn test_updates_existing_tag() {
        let dir = tempfile::tempdir().unwrap();
        let path = fake_mp3(dir.path());

        let mut existing = Tag::new();
        existing.set_title("Old title");
        existing.set_album("Help!");
        existing.write_to_path(&path, Version::Id3v24).unwrap();

        Id3Writer
            .write(&path, &TrackTags::new("Señorita", "Björk"))
            .unwrap();

        let tag = Tag::read_from_path(&path).unwrap();
        assert_eq!(tag.title(), Some("Señorita"));
        assert_eq!(tag.artist(), Some("Björk"));
        assert_eq!(tag.album(), Some("Help!"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Id3Writer
            .write(&dir.path().join("missing.mp3"), &TrackTags::new("a", "b"))
            .unwrap_err();
        assert!(matches!(err, TagWriteError::Id3(_)));
    }
}
