// CLI command implementations
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};

use rmid3tag::filename::guess_from_filename;
use rmid3tag::id3::frames::{decode_text_frame, frame_ids};
use rmid3tag::id3::{HeaderOffset, Id3v1Tag, Id3v2Tag};
use rmid3tag::rewrite::{rewrite_file, RewriteOptions};
use rmid3tag::{build_minimal_tag, probe};

use crate::cli::config::{Commands, Config};
use crate::cli::output::{CheckReport, OutputFormatter, TagText};

/// Where new title and artist come from
enum TagSource<'a> {
    None,
    Given { title: &'a str, artist: &'a str },
    FileName,
}

/// Run the configured command over every file.
///
/// Returns the number of files that failed.
pub fn run(config: &Config) -> anyhow::Result<usize> {
    let formatter = OutputFormatter::new(config.format, config.quiet);

    let (files, tags, options) = match &config.command {
        Commands::Check { files } => {
            return for_each_file(files, &formatter, |path| command_check(path, &formatter));
        }
        Commands::Strip { target } => (&target.files, TagSource::None, target.rewrite_options()),
        Commands::Set {
            title,
            artist,
            target,
        } => (
            &target.files,
            TagSource::Given { title, artist },
            target.rewrite_options(),
        ),
        Commands::Guess { target } => (&target.files, TagSource::FileName, target.rewrite_options()),
    };

    for_each_file(files, &formatter, |path| {
        command_rewrite(path, &tags, &options)?;
        formatter.print_success(&path.display().to_string());
        Ok(())
    })
}

/// Expand glob patterns, run `f` on each file and report failures
fn for_each_file<F>(files: &[String], formatter: &OutputFormatter, mut f: F) -> anyhow::Result<usize>
where
    F: FnMut(&Path) -> anyhow::Result<()>,
{
    let (paths, mut failed) = expand_paths(files, formatter)?;

    for path in &paths {
        if let Err(e) = f(path) {
            formatter.print_error(&format!("{}: {:#}", path.display(), e));
            failed += 1;
        }
    }

    Ok(failed)
}

/// Expand arguments containing glob metacharacters; others pass through.
///
/// Entries that cannot be read are reported and counted as failed.
fn expand_paths(files: &[String], formatter: &OutputFormatter) -> anyhow::Result<(Vec<PathBuf>, usize)> {
    let mut paths = Vec::new();
    let mut failed = 0;

    for file in files {
        if !file.contains(['*', '?', '[']) {
            paths.push(PathBuf::from(file));
            continue;
        }

        let before = paths.len();
        for entry in glob::glob(file).with_context(|| format!("invalid glob pattern {file:?}"))? {
            match entry {
                Ok(path) if path.is_file() => paths.push(path),
                Ok(_) => {}
                Err(e) => {
                    formatter.print_error(&format!("{}: {}", e.path().display(), e.error()));
                    failed += 1;
                }
            }
        }

        if paths.len() == before {
            tracing::warn!(pattern = %file, "no files match");
        }
    }

    Ok((paths, failed))
}

/// Dump the frame layout and any existing title/artist
fn command_check(path: &Path, formatter: &OutputFormatter) -> anyhow::Result<()> {
    let file = File::open(path).context("open failed")?;
    let stat = probe(&file)?;

    let v2 = if stat.v2_tag_present() {
        read_v2_text(&file)
    } else {
        None
    };
    let v1 = if stat.v1_tag_present() {
        Id3v1Tag::read(&file).ok().flatten().map(|tag| TagText {
            title: Some(tag.title).filter(|s| !s.is_empty()),
            artist: Some(tag.artist).filter(|s| !s.is_empty()),
        })
    } else {
        None
    };

    let report = CheckReport {
        file: path.display().to_string(),
        stat,
        v2,
        v1,
    };

    formatter.output_report(&report, &mut io::stdout().lock())
}

fn read_v2_text(file: &File) -> Option<TagText> {
    let position = HeaderOffset::locate(file).ok()?.position()?;
    let tag = match Id3v2Tag::read_at(file, position) {
        Ok(tag) => tag,
        Err(e) => {
            tracing::debug!(error = %e, "could not read ID3v2 frames");
            return None;
        }
    };

    let text = |id: &str| tag.frame(id).and_then(decode_text_frame);
    Some(TagText {
        title: text(frame_ids::TITLE),
        artist: text(frame_ids::ARTIST),
    })
}

/// Strip the tags of one file, optionally adding a minimal tag
fn command_rewrite(path: &Path, tags: &TagSource<'_>, options: &RewriteOptions) -> anyhow::Result<()> {
    if !path.is_file() {
        bail!("file not found");
    }

    let tag = match tags {
        TagSource::None => None,
        TagSource::Given { title, artist } => Some(build_minimal_tag(title, artist)?),
        TagSource::FileName => {
            let (title, artist) = guess_from_filename(path);
            tracing::debug!(%title, %artist, "guessed from file name");
            Some(build_minimal_tag(&title, &artist)?)
        }
    };

    rewrite_file(path, tag.as_deref(), options).context("rewrite failed")?;

    Ok(())
}
