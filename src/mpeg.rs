// MPEG audio frame sync detection
//
// Only the first two header bytes are checked. The check exists to find
// where the audio begins when an ID3v2 tag lies about its own size, not
// to validate the frame.

use crate::error::{Error, Result};
use crate::utils::ByteSource;

/// Header byte pairs accepted as the start of the MPEG frame stream:
/// MPEG-1 Layer III with and without CRC protection.
pub const FRAME_SYNC_PATTERNS: [[u8; 2]; 2] = [[0xFF, 0xFB], [0xFF, 0xFA]];

const SCAN_CHUNK: usize = 4096;

/// Whether `bytes` starts with an accepted frame sync pair
pub fn is_frame_sync(bytes: &[u8]) -> bool {
    FRAME_SYNC_PATTERNS
        .iter()
        .any(|pattern| bytes.starts_with(pattern))
}

/// Whether an accepted frame sync pair begins at `offset`.
///
/// Running into the end of the source is not an error here; it yields
/// `false`.
pub fn has_frame_sync_at<S: ByteSource + ?Sized>(source: &S, offset: u64) -> Result<bool> {
    let mut buf = [0u8; 2];
    let n = source.read_at(offset, &mut buf)?;
    Ok(n == buf.len() && is_frame_sync(&buf))
}

/// Find the first frame sync at or after `start`.
///
/// Equivalent to testing [`has_frame_sync_at`] at `start`, `start + 1`, ...
/// but reads the source in chunks. Fails with [`Error::Format`] when the
/// end of the source is reached first.
pub fn scan_for_frame_sync<S: ByteSource + ?Sized>(source: &S, start: u64) -> Result<u64> {
    let mut buf = vec![0u8; SCAN_CHUNK];
    let mut offset = start;

    loop {
        let n = source.read_at(offset, &mut buf)?;
        if n < 2 {
            return Err(Error::format("mpeg frame not found"));
        }

        if let Some(pos) = buf[..n].windows(2).position(is_frame_sync) {
            return Ok(offset + pos as u64);
        }

        // The last byte may be the first half of a sync pair
        offset += (n - 1) as u64;
    }
}
