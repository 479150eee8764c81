//! Convert command implementation
//!
//! Renders a decoded loop to WAV and writes its slice metadata.

use anyhow::{Context, Result};
use colored::Colorize;
use loopslice_spec::{BackendError, MetadataFormat};
use std::path::Path;
use std::process::ExitCode;

use crate::export::{export_loop, ArtifactOutcome, ExportReport};
use crate::input::JsonLoopSource;
use crate::paths::OutputPaths;

/// Run the convert command
///
/// # Arguments
/// * `input` - Path to the loop description
/// * `octa` - Write Octatrack `.ot` metadata instead of a `.slices` document
/// * `verbose` - Print tempo codes and the slice table
///
/// # Returns
/// Exit code: 0 once both writes were attempted, 1 on invalid input
pub fn run(input: &str, octa: bool, verbose: bool) -> Result<ExitCode> {
    let input_path = Path::new(input);
    if !input_path.is_file() {
        anyhow::bail!("Cannot open {}", input);
    }

    let format = if octa {
        MetadataFormat::Octatrack
    } else {
        MetadataFormat::Slices
    };

    if verbose {
        println!("{} {}", "Converting:".cyan().bold(), input);
        println!("{} {}", "Metadata:".cyan().bold(), format);
    }

    let mut source = JsonLoopSource::open(input_path)
        .map_err(|e| anyhow::anyhow!("[{}] {}", e.code(), e))
        .with_context(|| format!("Failed to load loop: {}", input))?;

    let paths = OutputPaths::derive(input_path, format);
    let report = export_loop(&mut source, &paths, format)
        .map_err(|e| anyhow::anyhow!("[{}] {}", e.code(), e))
        .with_context(|| format!("Failed to convert loop: {}", input))?;

    if verbose {
        print_details(&report);
    }

    print_outcome("Exported Audio:", &report.audio);
    let label = match format {
        MetadataFormat::Octatrack => "Exported OT:",
        MetadataFormat::Slices => "Exported Slices:",
    };
    print_outcome(label, &report.metadata);

    Ok(ExitCode::SUCCESS)
}

fn print_outcome(label: &str, outcome: &ArtifactOutcome) {
    match outcome {
        ArtifactOutcome::Written(_) => {
            println!("{} {}", label.green().bold(), outcome.path().display());
        }
        ArtifactOutcome::Failed { error, .. } => {
            eprintln!(
                "{} could not write {}: {}",
                "error".red(),
                outcome.path().display(),
                error
            );
        }
    }
}

fn print_details(report: &ExportReport) {
    let result = &report.result;

    println!(
        "{} {} frames, {:.3}s ({} rendered)",
        "Length:".dimmed(),
        result.length_frames,
        report.duration_seconds,
        report.frames_rendered
    );
    if report.format.is_binary() {
        println!(
            "{} tempo {} / {} bar(s) / trim length {} / trim end {}",
            "OT codes:".dimmed(),
            result.tempo.tempo_code,
            result.tempo.bars,
            result.tempo.trim_length_code,
            result.tempo.trim_end
        );
    }

    println!("{} {}", "Slices:".dimmed(), result.frame_slices.len());
    for (i, slice) in result.frame_slices.iter().enumerate() {
        let marker = if i < result.slices_written { " " } else { "-" };
        println!(
            "  {}{:>3}  {:>10} .. {:>10}  ({} frames)",
            marker,
            i,
            slice.start,
            slice.end,
            slice.frame_count()
        );
    }
    if result.slices_dropped() > 0 {
        println!(
            "  {} {} slice(s) past the {}-slice limit not written",
            "!".yellow(),
            result.slices_dropped(),
            result.slices_written
        );
    }

    println!("{} {}", "Hash:".dimmed(), &result.hash[..16]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_missing_input_is_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("nope.json");
        assert!(run(missing.to_str().unwrap(), true, false).is_err());
    }

    #[test]
    fn test_run_invalid_description_is_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(run(path.to_str().unwrap(), false, false).is_err());
        assert!(!tmp.path().join("bad.wav").exists());
    }
}
