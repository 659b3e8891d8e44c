// Guessing title and artist from "Artist - Title.mp3" file names

use std::path::Path;

const SEPARATOR: &str = " - ";
/// Placeholder used when a name does not follow the pattern
pub const UNKNOWN: &str = "-";

/// Split a file name of the form `Artist - Title.ext` into `(title, artist)`.
///
/// Only the final extension is removed. Names without a separator, or
/// with nothing on one side of it, give `("-", "-")`.
pub fn guess_from_filename(path: &Path) -> (String, String) {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();
    let stem = match name.rfind('.') {
        Some(dot) => &name[..dot],
        None => &name[..],
    };

    match stem.find(SEPARATOR) {
        Some(index) if index > 0 && index + SEPARATOR.len() < stem.len() => {
            let artist = &stem[..index];
            let title = &stem[index + SEPARATOR.len()..];
            (title.to_string(), artist.to_string())
        }
        _ => (UNKNOWN.to_string(), UNKNOWN.to_string()),
    }
}
