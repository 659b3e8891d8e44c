// Output formatting for CLI

use std::io::Write;

use serde::Serialize;

use rmid3tag::FileStat;

use crate::cli::config::OutputFormat;

/// What `check` found in one file
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub file: String,
    #[serde(flatten)]
    pub stat: FileStat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub v2: Option<TagText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub v1: Option<TagText>,
}

/// Title and artist read from an existing tag
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TagText {
    pub title: Option<String>,
    pub artist: Option<String>,
}

/// Format and output data
pub struct OutputFormatter {
    format: OutputFormat,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    /// Output a check report
    pub fn output_report(&self, report: &CheckReport, writer: &mut impl Write) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Pretty => self.output_pretty(report, writer)?,
            OutputFormat::Json => writeln!(writer, "{}", serde_json::to_string(report)?)?,
        }
        Ok(())
    }

    fn output_pretty(&self, report: &CheckReport, writer: &mut impl Write) -> std::io::Result<()> {
        let stat = &report.stat;

        if !self.quiet {
            writeln!(writer, "[rmid3tag] {}", report.file)?;
        }
        writeln!(writer, "[rmid3tag] V1Tag Exist       = {}", stat.v1_tag_present())?;
        writeln!(writer, "[rmid3tag] V2Tag Exist       = {}", stat.v2_tag_present())?;
        writeln!(writer, "[rmid3tag] File Size         = {}", stat.total_size())?;
        writeln!(writer, "[rmid3tag] MPEG Frame Offset = {}", stat.frame_offset())?;
        writeln!(writer, "[rmid3tag] MPEG Frame Size   = {}", stat.frame_size())?;

        for (label, text) in [("V2", &report.v2), ("V1", &report.v1)] {
            if let Some(text) = text {
                writeln!(writer, "[rmid3tag] {label} Title          = {}", display(&text.title))?;
                writeln!(writer, "[rmid3tag] {label} Artist         = {}", display(&text.artist))?;
            }
        }

        Ok(())
    }

    /// Print success message
    pub fn print_success(&self, message: &str) {
        if !self.quiet {
            println!("✓ {}", message);
        }
    }

    /// Print error message
    pub fn print_error(&self, message: &str) {
        eprintln!("✗ {}", message);
    }
}

fn display(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("(none)")
}
