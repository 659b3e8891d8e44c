// CLI configuration
use clap::{Args, Parser, Subcommand, ValueEnum};

use rmid3tag::rewrite::RewriteOptions;

/// rmid3tag - delete the ID3 tags contained in MP3 files
///
/// By default the original file is kept as FILE.backup.
#[derive(Parser, Debug)]
#[command(name = "rmid3tag")]
#[command(about = "Delete the ID3 tags contained in MP3 files", long_about = None)]
#[command(version)]
pub struct Config {
    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty", global = true)]
    pub format: OutputFormat,

    /// Quiet mode (suppress progress messages)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human readable lines
    #[default]
    Pretty,
    /// One JSON object per file
    Json,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Change nothing; dump tag and frame information
    Check {
        /// MP3 file path(s)
        #[arg(value_name = "FILE", required = true)]
        files: Vec<String>,
    },

    /// Delete all tags
    Strip {
        #[command(flatten)]
        target: Target,
    },

    /// Delete all tags, then set title and artist
    Set {
        /// Title
        #[arg(short, long)]
        title: String,

        /// Artist
        #[arg(short, long)]
        artist: String,

        #[command(flatten)]
        target: Target,
    },

    /// Delete all tags, then set title and artist guessed from
    /// file names of the form "Artist - Title.mp3"
    Guess {
        #[command(flatten)]
        target: Target,
    },
}

/// Files to rewrite and how to replace them
#[derive(Args, Debug)]
pub struct Target {
    /// Do not keep the original file as FILE.backup
    #[arg(long)]
    pub no_backup: bool,

    /// MP3 file path(s)
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<String>,
}

impl Target {
    pub fn rewrite_options(&self) -> RewriteOptions {
        RewriteOptions::default().with_backup(!self.no_backup)
    }
}
