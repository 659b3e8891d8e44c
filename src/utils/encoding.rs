// Text encodings used by ID3v2 text frames

use encoding_rs::{UTF_16BE, UTF_16LE, UTF_8, WINDOWS_1252};

use crate::error::{Error, Result};

/// Byte order mark for UTF-16BE
pub const BOM_BE: [u8; 2] = [0xFE, 0xFF];
/// Byte order mark for UTF-16LE
pub const BOM_LE: [u8; 2] = [0xFF, 0xFE];
/// Terminator of a UTF-16 string
pub const UTF16_NULL: [u8; 2] = [0x00, 0x00];

/// Text encoding flag carried in the first byte of a text frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Iso8859_1 = 0,
    Utf16 = 1,
    Utf16BE = 2,
    Utf8 = 3,
}

impl TextEncoding {
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(TextEncoding::Iso8859_1),
            1 => Some(TextEncoding::Utf16),
            2 => Some(TextEncoding::Utf16BE),
            3 => Some(TextEncoding::Utf8),
            _ => None,
        }
    }

    fn terminator_len(self) -> usize {
        match self {
            TextEncoding::Iso8859_1 | TextEncoding::Utf8 => 1,
            TextEncoding::Utf16 | TextEncoding::Utf16BE => 2,
        }
    }
}

/// Encode `text` as BOM + UTF-16BE code units + null terminator.
///
/// Fails for text containing U+0000, which would end the value early for
/// every reader.
pub fn encode_text(text: &str) -> Result<Vec<u8>> {
    if text.contains('\0') {
        return Err(Error::encoding(format!(
            "text {text:?} contains a NUL character"
        )));
    }

    let mut out = Vec::with_capacity(BOM_BE.len() + text.len() * 2 + UTF16_NULL.len());
    out.extend_from_slice(&BOM_BE);
    for unit in text.encode_utf16() {
        out.extend_from_slice(&unit.to_be_bytes());
    }
    out.extend_from_slice(&UTF16_NULL);

    Ok(out)
}

/// Decode a text payload (without the encoding byte).
///
/// Trailing terminators are dropped. Undecodable sequences are replaced,
/// since this is only used to display existing tags.
pub fn decode_text(data: &[u8], encoding: TextEncoding) -> String {
    let data = strip_terminators(data, encoding.terminator_len());

    match encoding {
        TextEncoding::Iso8859_1 => WINDOWS_1252.decode_without_bom_handling(data).0.into_owned(),
        TextEncoding::Utf16 => match data.get(..2) {
            Some(bom) if bom == BOM_LE => {
                UTF_16LE.decode_without_bom_handling(&data[2..]).0.into_owned()
            }
            Some(bom) if bom == BOM_BE => {
                UTF_16BE.decode_without_bom_handling(&data[2..]).0.into_owned()
            }
            // No BOM; ID3v2.3 readers fall back to little endian
            Some(_) => UTF_16LE.decode_without_bom_handling(data).0.into_owned(),
            None => String::new(),
        },
        TextEncoding::Utf16BE => UTF_16BE.decode_without_bom_handling(data).0.into_owned(),
        TextEncoding::Utf8 => UTF_8.decode_without_bom_handling(data).0.into_owned(),
    }
}

fn strip_terminators(mut data: &[u8], width: usize) -> &[u8] {
    while data.len() >= width && data[data.len() - width..].iter().all(|&b| b == 0) {
        data = &data[..data.len() - width];
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_with_bom_and_terminator() {
        let encoded = encode_text("Test").unwrap();
        assert_eq!(
            encoded,
            [0xFE, 0xFF, 0x00, b'T', 0x00, b'e', 0x00, b's', 0x00, b't', 0x00, 0x00]
        );
    }

    #[test]
    fn encodes_empty_text() {
        assert_eq!(encode_text("").unwrap(), [0xFE, 0xFF, 0x00, 0x00]);
    }

    #[test]
    fn encodes_surrogate_pairs() {
        // U+1F3B5 MUSICAL NOTE
        let encoded = encode_text("\u{1F3B5}").unwrap();
        assert_eq!(encoded, [0xFE, 0xFF, 0xD8, 0x3C, 0xDF, 0xB5, 0x00, 0x00]);
    }

    #[test]
    fn rejects_nul() {
        assert!(matches!(encode_text("a\0b"), Err(Error::Encoding(_))));
    }

    #[test]
    fn decodes_each_encoding() {
        assert_eq!(decode_text(b"Caf\xE9\0", TextEncoding::Iso8859_1), "Café");
        assert_eq!(decode_text("Café\0".as_bytes(), TextEncoding::Utf8), "Café");
        assert_eq!(
            decode_text(&[0xFF, 0xFE, b'h', 0, b'i', 0, 0, 0], TextEncoding::Utf16),
            "hi"
        );
        assert_eq!(
            decode_text(&[0, b'h', 0, b'i'], TextEncoding::Utf16BE),
            "hi"
        );
    }

    #[test]
    fn decode_inverts_encode() {
        for text in ["Test Song", "日本語のタイトル", "Ünïcödé \u{1F3B5}"] {
            let encoded = encode_text(text).unwrap();
            assert_eq!(decode_text(&encoded, TextEncoding::Utf16), text);
        }
    }
}
