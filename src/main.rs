// CLI binary entry point for rmid3tag
//
// Deletes the ID3 tags contained in MP3 files, optionally leaving a
// minimal ID3v2.3 title/artist tag in front of the audio.

mod cli;

use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::Config;

fn main() {
    let config = Config::parse();
    init_logging(config.verbose);

    match cli::run(&config) {
        Ok(0) => {}
        Ok(_) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "rmid3tag=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
