use lofty::config::{ParseOptions, WriteOptions};
use lofty::prelude::*;
use lofty::probe::Probe;
use lofty::tag::{Tag, TagType};
use std::io::Read;
use std::path::Path;

use super::{TagWriter, TrackTags};
use crate::TagWriteError;

const FLAC_MARKER: &[u8; 4] = b"fLaC";
const LAST_BLOCK_FLAG: u8 = 0x80;

/// Writes TITLE/ARTIST Vorbis comments into a FLAC file, keeping other comments
pub struct VorbisCommentWriter;

impl TagWriter for VorbisCommentWriter {
    fn write(&self, path: &Path, tags: &TrackTags) -> Result<(), TagWriteError> {
        if streaminfo_is_last_block(path)? {
            return Err(TagWriteError::UnsupportedLayout(
                "STREAMINFO is the only metadata block",
            ));
        }

        let mut tagged_file = Probe::open(path)?
            .options(ParseOptions::new().read_properties(false))
            .read()?;

        if tagged_file.tag(TagType::VorbisComments).is_none() {
            tagged_file.insert_tag(Tag::new(TagType::VorbisComments));
        }

        let tag = tagged_file
            .tag_mut(TagType::VorbisComments)
            .ok_or(TagWriteError::MissingTag("Vorbis comment"))?;

        tag.set_title(tags.title.clone());
        tag.set_artist(tags.artist.clone());
        tag.save_to_path(path, WriteOptions::default())?;
        tracing::debug!("Wrote Vorbis comments to {}", path.display());

        Ok(())
    }

    fn name(&self) -> &'static str {
        "Vorbis comments"
    }
}

/// lofty cannot insert a comment block behind a STREAMINFO that carries the
/// last-block flag, so that layout is refused up front.
fn streaminfo_is_last_block(path: &Path) -> Result<bool, TagWriteError> {
    let mut header = Vec::with_capacity(5);
    fs_err::File::open(path)?.take(5).read_to_end(&mut header)?;

    // Anything else (ID3-prefixed, truncated, not FLAC) is left to lofty
    Ok(header.len() == 5 && header.starts_with(FLAC_MARKER) && header[4] & LAST_BLOCK_FLAG != 0)
}
