// Builders for synthetic MP3 files
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use rmid3tag::id3::synchsafe::encode_synchsafe;

/// One MPEG-1 Layer III frame header followed by filler bytes
pub fn frames(len: usize) -> Vec<u8> {
    let mut data = vec![0xFF, 0xFB, 0x90, 0x64];
    data.extend((0..len.saturating_sub(4)).map(|i| (i % 251) as u8 | 0x01));
    data.truncate(len);
    data
}

/// An ID3v2.3 header declaring `declared` bytes, followed by `actual` zero bytes
pub fn id3v2(declared: u32, actual: usize) -> Vec<u8> {
    let mut tag = b"ID3\x03\x00\x00".to_vec();
    tag.extend(encode_synchsafe(declared, 4));
    tag.resize(10 + actual, 0);
    tag
}

/// An ID3v1 trailer with the given title and artist
pub fn id3v1(title: &str, artist: &str) -> Vec<u8> {
    let mut tag = vec![0u8; 128];
    tag[..3].copy_from_slice(b"TAG");
    tag[3..3 + title.len()].copy_from_slice(title.as_bytes());
    tag[33..33 + artist.len()].copy_from_slice(artist.as_bytes());
    tag
}

/// Write `parts` one after another to `dir/name`
pub fn write_file(dir: &Path, name: &str, parts: &[&[u8]]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, parts.concat()).unwrap();
    path
}
