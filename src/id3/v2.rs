// ID3v2 header location and tag reading

use crate::error::{Error, Result};
use crate::id3::synchsafe::decode_synchsafe;
use crate::utils::io::read_be_u32;
use crate::utils::{read_exact_at, ByteSource};

/// Marker that opens every ID3v2 header
pub const ID3V2_MARKER: [u8; 3] = *b"ID3";
/// Size of the ID3v2 header and of each v2.3/v2.4 frame header
pub const HEADER_SIZE: usize = 10;

/// Where the ID3v2 header starts, if anywhere.
///
/// Some encoders write one stray byte before the header, so a marker at
/// offset 1 is accepted too.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderOffset {
    None,
    AtZero,
    AtOne,
}

impl HeaderOffset {
    /// Classify the first four bytes of a file
    pub fn detect(lead: &[u8; 4]) -> Self {
        if lead[..3] == ID3V2_MARKER {
            HeaderOffset::AtZero
        } else if lead[1..] == ID3V2_MARKER {
            HeaderOffset::AtOne
        } else {
            HeaderOffset::None
        }
    }

    /// Read the first four bytes of `source` and classify them
    pub fn locate<S: ByteSource + ?Sized>(source: &S) -> Result<Self> {
        let mut lead = [0u8; 4];
        read_exact_at(source, 0, &mut lead, "file is too small to hold an ID3v2 marker")?;
        Ok(Self::detect(&lead))
    }

    /// Byte position of the header
    pub fn position(self) -> Option<u64> {
        match self {
            HeaderOffset::None => None,
            HeaderOffset::AtZero => Some(0),
            HeaderOffset::AtOne => Some(1),
        }
    }
}

/// ID3v2 header structure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Id3v2Header {
    pub version: (u8, u8),
    pub flags: u8,
    /// Declared size of everything after the header
    pub size: u32,
}

impl Id3v2Header {
    /// Parse a header, returning `None` when the marker is missing
    pub fn parse(buffer: &[u8; HEADER_SIZE]) -> Option<Self> {
        if buffer[..3] != ID3V2_MARKER {
            return None;
        }

        Some(Id3v2Header {
            version: (buffer[3], buffer[4]),
            flags: buffer[5],
            size: decode_synchsafe(&buffer[6..10]),
        })
    }

    /// Read the header at `offset`
    pub fn read_at<S: ByteSource + ?Sized>(source: &S, offset: u64) -> Result<Self> {
        let mut buffer = [0u8; HEADER_SIZE];
        read_exact_at(source, offset, &mut buffer, "ID3v2 header is truncated")?;
        Self::parse(&buffer).ok_or_else(|| Error::format("missing ID3v2 marker"))
    }

    /// Declared size including the header itself
    pub fn tag_size(&self) -> u64 {
        u64::from(self.size) + HEADER_SIZE as u64
    }
}

/// ID3v2 frame structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Id3Frame {
    pub frame_id: String,
    pub flags: u16,
    pub data: Vec<u8>,
}

impl Id3Frame {
    /// Parse one frame from the start of `buffer`.
    ///
    /// Returns the frame and the bytes it occupies, or `None` at padding
    /// or when the remaining bytes cannot hold the frame.
    pub fn parse(buffer: &[u8], major_version: u8) -> Option<(Self, usize)> {
        let header = buffer.get(..HEADER_SIZE)?;

        // Padding (all zeros)
        if header[0] == 0 {
            return None;
        }

        let frame_id = String::from_utf8_lossy(&header[..4]).into_owned();

        // ID3v2.4 uses synchsafe frame sizes, ID3v2.3 plain ones
        let size = if major_version >= 4 {
            decode_synchsafe(&header[4..8])
        } else {
            read_be_u32(&header[4..8])?
        };

        let flags = u16::from_be_bytes([header[8], header[9]]);
        let end = HEADER_SIZE.checked_add(usize::try_from(size).ok()?)?;
        let data = buffer.get(HEADER_SIZE..end)?.to_vec();

        Some((
            Id3Frame {
                frame_id,
                flags,
                data,
            },
            end,
        ))
    }
}

/// ID3v2 tag structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Id3v2Tag {
    pub header: Id3v2Header,
    pub frames: Vec<Id3Frame>,
}

impl Id3v2Tag {
    /// Parse a complete tag held in memory
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let header_bytes: &[u8; HEADER_SIZE] = bytes
            .get(..HEADER_SIZE)
            .and_then(|h| h.try_into().ok())
            .ok_or_else(|| Error::short_read("ID3v2 header is truncated"))?;
        let header =
            Id3v2Header::parse(header_bytes).ok_or_else(|| Error::format("missing ID3v2 marker"))?;

        let end = (HEADER_SIZE + header.size as usize).min(bytes.len());
        let mut body = &bytes[HEADER_SIZE..end];

        let mut frames = Vec::new();
        while let Some((frame, used)) = Id3Frame::parse(body, header.version.0) {
            frames.push(frame);
            body = &body[used..];
        }

        Ok(Id3v2Tag { header, frames })
    }

    /// Read the tag whose header starts at `offset`.
    ///
    /// Frames cut off by the end of the source are dropped.
    pub fn read_at<S: ByteSource + ?Sized>(source: &S, offset: u64) -> Result<Self> {
        let header = Id3v2Header::read_at(source, offset)?;

        let available = source.len()?.saturating_sub(offset);
        let wanted = header.tag_size().min(available);

        let mut bytes = vec![0u8; wanted as usize];
        let n = source.read_at(offset, &mut bytes)?;
        bytes.truncate(n);

        Self::parse(&bytes)
    }

    /// Raw payload of the first frame with `id`
    pub fn frame(&self, id: &str) -> Option<&Id3Frame> {
        self.frames.iter().find(|frame| frame.frame_id == id)
    }
}
