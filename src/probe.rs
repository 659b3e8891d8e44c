// Locating the MPEG frame region of an MP3 file
//
// +---------------+
// |  ID3v2 tag    |
// |  (optional)   |
// +---------------+ <-- frame_offset
// |               |   |
// |  MPEG frames  |   | frame_size
// |               |   |
// +---------------+ <-+
// |  ID3v1 tag    |
// |  (optional)   |
// +---------------+

use std::fs::File;
use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::id3::v1::{has_id3v1_tag, ID3V1_TAG_SIZE};
use crate::id3::v2::{HeaderOffset, Id3v2Header};
use crate::mpeg::scan_for_frame_sync;
use crate::utils::ByteSource;

/// Where the tags and the audio sit in one probed file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FileStat {
    total_size: u64,
    v1_tag_present: bool,
    v2_tag_present: bool,
    frame_offset: u64,
    frame_size: u64,
}

impl FileStat {
    /// Assemble a stat, failing if the frame region would be negative
    pub fn new(
        total_size: u64,
        v1_tag_present: bool,
        v2_tag_present: bool,
        frame_offset: u64,
    ) -> Result<Self> {
        let trailer = if v1_tag_present { ID3V1_TAG_SIZE } else { 0 };
        let frame_size = total_size
            .checked_sub(frame_offset)
            .and_then(|size| size.checked_sub(trailer))
            .ok_or_else(|| {
                Error::format(format!(
                    "mpeg frame size is negative (file size {total_size}, frame offset {frame_offset}, trailer {trailer})"
                ))
            })?;

        Ok(FileStat {
            total_size,
            v1_tag_present,
            v2_tag_present,
            frame_offset,
            frame_size,
        })
    }

    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    pub fn v1_tag_present(&self) -> bool {
        self.v1_tag_present
    }

    pub fn v2_tag_present(&self) -> bool {
        self.v2_tag_present
    }

    /// Offset of the first MPEG frame
    pub fn frame_offset(&self) -> u64 {
        self.frame_offset
    }

    /// Bytes of MPEG frame data between the tags
    pub fn frame_size(&self) -> u64 {
        self.frame_size
    }
}

/// Probe `source` for tags and locate its MPEG frames.
pub fn probe<S: ByteSource + ?Sized>(source: &S) -> Result<FileStat> {
    let total_size = source.len()?;

    let (v2_tag_present, frame_offset) = locate_frames(source)?;
    let v1_tag_present = has_id3v1_tag(source, total_size)?;

    let stat = FileStat::new(total_size, v1_tag_present, v2_tag_present, frame_offset)?;
    tracing::debug!(?stat, "probed");
    Ok(stat)
}

/// Open `path` read-only and probe it
pub fn probe_path(path: impl AsRef<Path>) -> Result<FileStat> {
    let file = File::open(path.as_ref())?;
    probe(&file)
}

/// Find whether an ID3v2 tag is present and where the audio begins
fn locate_frames<S: ByteSource + ?Sized>(source: &S) -> Result<(bool, u64)> {
    let kind = HeaderOffset::locate(source)?;
    let Some(position) = kind.position() else {
        return Ok((false, 0));
    };

    if kind == HeaderOffset::AtOne {
        tracing::warn!("ignoring one stray byte before the ID3v2 header");
    }

    let header = Id3v2Header::read_at(source, position)?;
    tracing::debug!(
        version = ?header.version,
        declared = header.size,
        ?kind,
        "found ID3v2 header"
    );

    // The declared size is only a lower bound: some encoders pad further
    let declared_end = header.tag_size() + position;
    let frame_offset = scan_for_frame_sync(source, declared_end)?;

    if frame_offset > declared_end {
        tracing::warn!(
            extra = frame_offset - declared_end,
            "ID3v2 padding exceeds its declared size"
        );
    }

    Ok((true, frame_offset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id3::synchsafe::encode_synchsafe;

    const FRAME: [u8; 4] = [0xFF, 0xFB, 0x90, 0x64];

    fn audio(len: usize) -> Vec<u8> {
        let mut data = FRAME.to_vec();
        data.resize(len, 0x55);
        data
    }

    fn v2_tag(declared: u32, actual: usize) -> Vec<u8> {
        let mut tag = b"ID3\x03\x00\x00".to_vec();
        tag.extend(encode_synchsafe(declared, 4));
        tag.resize(10 + actual, 0);
        tag
    }

    fn v1_tag() -> Vec<u8> {
        let mut tag = b"TAG".to_vec();
        tag.resize(128, b' ');
        tag
    }

    #[test]
    fn untagged_file() {
        let data = audio(1000);
        let stat = probe(&data).unwrap();

        assert!(!stat.v1_tag_present());
        assert!(!stat.v2_tag_present());
        assert_eq!(stat.frame_offset(), 0);
        assert_eq!(stat.frame_size(), 1000);
        assert_eq!(stat.total_size(), 1000);
    }

    #[test]
    fn exact_declared_size() {
        let mut data = v2_tag(300, 300);
        data.extend(audio(500));

        let stat = probe(&data).unwrap();
        assert!(stat.v2_tag_present());
        assert_eq!(stat.frame_offset(), 310);
        assert_eq!(stat.frame_size(), 500);
    }

    #[test]
    fn padding_beyond_declared_size() {
        let mut data = v2_tag(300, 300 + 45);
        data.extend(audio(500));

        let stat = probe(&data).unwrap();
        assert_eq!(stat.frame_offset(), 355);
        assert_eq!(stat.frame_size(), 500);
    }

    #[test]
    fn stray_leading_byte() {
        let mut data = vec![0x00];
        data.extend(v2_tag(20, 20));
        data.extend(audio(300));

        let stat = probe(&data).unwrap();
        assert!(stat.v2_tag_present());
        assert_eq!(stat.frame_offset(), 31);
        assert_eq!(stat.frame_size(), 300);
    }

    #[test]
    fn both_tags() {
        let mut data = v2_tag(64, 64);
        data.extend(audio(400));
        data.extend(v1_tag());

        let stat = probe(&data).unwrap();
        assert!(stat.v1_tag_present());
        assert!(stat.v2_tag_present());
        assert_eq!(stat.frame_offset(), 74);
        assert_eq!(stat.frame_size(), 400);
    }

    #[test]
    fn v1_only() {
        let mut data = audio(400);
        data.extend(v1_tag());

        let stat = probe(&data).unwrap();
        assert!(stat.v1_tag_present());
        assert!(!stat.v2_tag_present());
        assert_eq!(stat.frame_offset(), 0);
        assert_eq!(stat.frame_size(), 400);
    }

    #[test]
    fn missing_frame_sync() {
        let mut data = v2_tag(10, 10);
        data.resize(400, 0);

        match probe(&data) {
            Err(Error::Format(msg)) => assert_eq!(msg, "mpeg frame not found"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn declared_size_past_eof() {
        let mut data = v2_tag(5000, 10);
        data.extend(audio(200));

        assert!(matches!(probe(&data), Err(Error::Format(_))));
    }

    #[test]
    fn frame_inside_v1_trailer_is_negative() {
        // Sync found only in the last bytes, which are also taken by a v1 tag
        let mut data = v2_tag(10, 10);
        let mut trailer = v1_tag();
        trailer[126] = 0xFF;
        trailer[127] = 0xFB;
        data.extend(trailer);

        // 20 bytes of tag, sync at 146, file size 148
        let err = probe(&data).unwrap_err();
        assert!(matches!(err, Error::Format(msg) if msg.contains("negative")));
    }

    #[test]
    fn tiny_files_are_io_errors() {
        assert!(matches!(probe(&vec![0xFFu8, 0xFB]), Err(Error::Io(_))));
        assert!(matches!(probe(&audio(100)), Err(Error::Io(_))));
    }

    #[test]
    fn negative_size_is_rejected() {
        assert!(FileStat::new(100, true, false, 0).is_err());
        assert!(FileStat::new(100, false, true, 101).is_err());
        assert_eq!(FileStat::new(128, true, false, 0).unwrap().frame_size(), 0);
    }

    #[test]
    fn frame_size_matches_layout() {
        let stat = FileStat::new(1000, true, true, 10).unwrap();
        assert_eq!(stat.total_size(), 1000);
        assert_eq!(stat.frame_offset(), 10);
        assert!(stat.v1_tag_present() && stat.v2_tag_present());
        assert_eq!(stat.frame_size(), stat.total_size() - stat.frame_offset() - ID3V1_TAG_SIZE);
    }

    #[test]
    fn serializes_frame_size() {
        let stat = FileStat::new(1000, true, true, 10).unwrap();
        let json = serde_json::to_value(stat).unwrap();
        assert_eq!(json["frame_size"], 862);
        assert_eq!(json["v2_tag_present"], true);
    }
}
