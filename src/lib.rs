// rmid3tag: strip ID3 tags from MP3 files
//
// `probe` finds the MPEG frames between an optional leading ID3v2 tag and
// an optional trailing ID3v1 tag. `build_minimal_tag` produces an ID3v2.3
// tag holding only a title and an artist, which `rewrite::rewrite_file`
// can put in front of the stripped frames.

pub mod error;
pub mod filename;
pub mod id3;
pub mod mpeg;
pub mod probe;
pub mod rewrite;
pub mod utils;

pub use error::{Error, Result};
pub use id3::build_minimal_tag;
pub use probe::{probe, probe_path, FileStat};
pub use utils::ByteSource;
