// CLI module for rmid3tag
//
// Argument parsing, per-file dispatch and report formatting. The library
// crate holds everything that touches tag bytes.

pub mod commands;
pub mod config;
pub mod output;

pub use commands::run;
pub use config::Config;
