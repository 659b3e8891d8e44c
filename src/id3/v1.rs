// ID3v1 trailer detection and parsing

use crate::error::{Error, Result};
use crate::utils::{read_exact_at, ByteSource};

/// Size of an ID3v1 tag
pub const ID3V1_TAG_SIZE: u64 = 128;
/// Marker that opens an ID3v1 tag
pub const ID3V1_MARKER: [u8; 3] = *b"TAG";

const TOO_SMALL: &str = "file is smaller than an ID3v1 tag";

/// Offset of the last 128 bytes, failing for smaller files
fn trailer_offset(total_size: u64) -> Result<u64> {
    total_size
        .checked_sub(ID3V1_TAG_SIZE)
        .ok_or_else(|| Error::short_read(TOO_SMALL))
}

/// Whether the last 128 bytes of a `total_size` byte source begin with `TAG`.
///
/// A source shorter than 128 bytes is an I/O error, not "absent".
pub fn has_id3v1_tag<S: ByteSource + ?Sized>(source: &S, total_size: u64) -> Result<bool> {
    let offset = trailer_offset(total_size)?;

    let mut marker = [0u8; 3];
    read_exact_at(source, offset, &mut marker, TOO_SMALL)?;

    Ok(marker == ID3V1_MARKER)
}

/// ID3v1 tag structure
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Id3v1Tag {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub year: String,
    pub comment: String,
    pub track: Option<u8>,
    pub genre: u8,
}

impl Id3v1Tag {
    /// Read the trailer of `source`, if it has one
    pub fn read<S: ByteSource + ?Sized>(source: &S) -> Result<Option<Self>> {
        let offset = trailer_offset(source.len()?)?;

        let mut buffer = [0u8; ID3V1_TAG_SIZE as usize];
        read_exact_at(source, offset, &mut buffer, TOO_SMALL)?;

        Ok(Self::parse(&buffer))
    }

    /// Parse a 128-byte trailer
    pub fn parse(buffer: &[u8; ID3V1_TAG_SIZE as usize]) -> Option<Self> {
        if buffer[..3] != ID3V1_MARKER {
            return None;
        }

        // ID3v1.1 steals the last two comment bytes for a track number
        let (comment, track) = if buffer[125] == 0 && buffer[126] != 0 {
            (Self::parse_string(&buffer[97..125]), Some(buffer[126]))
        } else {
            (Self::parse_string(&buffer[97..127]), None)
        };

        Some(Id3v1Tag {
            title: Self::parse_string(&buffer[3..33]),
            artist: Self::parse_string(&buffer[33..63]),
            album: Self::parse_string(&buffer[63..93]),
            year: Self::parse_string(&buffer[93..97]),
            comment,
            track,
            genre: buffer[127],
        })
    }

    /// Parse null-terminated, space-padded ISO-8859-1 text
    fn parse_string(bytes: &[u8]) -> String {
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        bytes[..end]
            .iter()
            .map(|&b| char::from(b))
            .collect::<String>()
            .trim_end()
            .to_string()
    }
}
