// ID3v2.3 text frames

use crate::error::{Error, Result};
use crate::id3::v2::Id3Frame;
use crate::utils::encoding::{decode_text, encode_text, TextEncoding};

/// Common ID3v2.3 frame identifiers
pub mod frame_ids {
    pub const TITLE: &str = "TIT2"; // Title/songname/content description
    pub const ARTIST: &str = "TPE1"; // Lead performer(s)/Soloist(s)
}

/// A text information frame ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFrame {
    id: [u8; 4],
    /// Encoding byte followed by BOM, UTF-16BE text and terminator
    payload: Vec<u8>,
}

impl TextFrame {
    /// Create a frame carrying `text`, encoded as UTF-16 with a BOM
    pub fn new(id: &str, text: &str) -> Result<Self> {
        let id: [u8; 4] = id
            .as_bytes()
            .try_into()
            .ok()
            .filter(|id: &[u8; 4]| id.iter().all(|b| b.is_ascii_uppercase() || b.is_ascii_digit()))
            .ok_or_else(|| Error::encoding(format!("invalid frame id {id:?}")))?;

        let encoded = encode_text(text)?;
        let mut payload = Vec::with_capacity(1 + encoded.len());
        payload.push(TextEncoding::Utf16 as u8);
        payload.extend(encoded);

        Ok(TextFrame { id, payload })
    }

    pub fn id(&self) -> &str {
        // Checked to be ASCII on construction
        std::str::from_utf8(&self.id).unwrap_or_default()
    }

    /// Size field value: everything after the 10-byte frame header
    pub fn payload_size(&self) -> usize {
        self.payload.len()
    }

    /// Serialize header and payload.
    ///
    /// The v2.3 frame size is a plain big-endian integer, not synchsafe.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let size = u32::try_from(self.payload.len())
            .map_err(|_| Error::encoding(format!("{} frame is too large", self.id())))?;

        let mut out = Vec::with_capacity(10 + self.payload.len());
        out.extend_from_slice(&self.id);
        out.extend_from_slice(&size.to_be_bytes());
        out.extend_from_slice(&[0x00, 0x00]); // flags
        out.extend_from_slice(&self.payload);
        Ok(out)
    }
}

/// Serialize a text frame for `id` carrying `text`
pub fn build_text_frame(id: &str, text: &str) -> Result<Vec<u8>> {
    TextFrame::new(id, text)?.to_bytes()
}

/// Decode the text of a frame read from a tag
pub fn decode_text_frame(frame: &Id3Frame) -> Option<String> {
    let (&encoding, text) = frame.data.split_first()?;
    let encoding = TextEncoding::from_byte(encoding)?;
    Some(decode_text(text, encoding))
}
