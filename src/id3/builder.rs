// Minimal ID3v2.3 tag construction

use crate::error::{Error, Result};
use crate::id3::frames::{frame_ids, TextFrame};
use crate::id3::synchsafe::{encode_synchsafe, MAX_SYNCHSAFE_U32};
use crate::id3::v2::{HEADER_SIZE, ID3V2_MARKER};

/// Major and minor version written into built tags
pub const WRITTEN_VERSION: (u8, u8) = (3, 0);

/// Assemble `frames` into an ID3v2.3 tag, in the given order.
///
/// The header's size field covers the frame bytes only.
pub fn build_tag(frames: &[TextFrame]) -> Result<Vec<u8>> {
    let mut body = Vec::new();
    for frame in frames {
        body.extend(frame.to_bytes()?);
    }

    let size = u32::try_from(body.len())
        .ok()
        .filter(|&size| size <= MAX_SYNCHSAFE_U32)
        .ok_or_else(|| Error::encoding(format!("tag of {} bytes is too large", body.len())))?;

    let mut tag = Vec::with_capacity(HEADER_SIZE + body.len());
    tag.extend_from_slice(&ID3V2_MARKER);
    tag.extend_from_slice(&[WRITTEN_VERSION.0, WRITTEN_VERSION.1]);
    tag.push(0x00); // flags
    tag.extend(encode_synchsafe(size, 4));
    tag.extend(body);

    Ok(tag)
}

/// Build a tag holding exactly a `TIT2` title and a `TPE1` artist frame
pub fn build_minimal_tag(title: &str, artist: &str) -> Result<Vec<u8>> {
    let frames = [
        TextFrame::new(frame_ids::TITLE, title)?,
        TextFrame::new(frame_ids::ARTIST, artist)?,
    ];

    let tag = build_tag(&frames)?;
    tracing::debug!(bytes = tag.len(), "built minimal ID3v2.3 tag");
    Ok(tag)
}
