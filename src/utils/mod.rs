// Shared helpers for byte access and text encoding
pub mod encoding;
pub mod io;

pub use io::{read_exact_at, ByteSource};
