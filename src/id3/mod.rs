// ID3 tag handling: detection, reading and minimal tag construction
pub mod builder;
pub mod frames;
pub mod synchsafe;
pub mod v1;
pub mod v2;

pub use builder::{build_minimal_tag, build_tag};
pub use v1::Id3v1Tag;
pub use v2::{HeaderOffset, Id3v2Tag};
