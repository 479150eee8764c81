//! loopslice CLI - renders a decoded loop to WAV with slice metadata
//!
//! Writes `<base>.wav` next to the input plus either `<base>.ot` (with
//! `--octa`) or `.slices/<base>.slices`.

use clap::Parser;
use std::ffi::OsString;
use std::process::ExitCode;

use loopslice_cli::commands;

/// loopslice - Loop to sampler slice converter
#[derive(Parser, Debug)]
#[command(name = "loopslice")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Write Octatrack .ot metadata instead of a .slices document
    #[arg(long)]
    octa: bool,

    /// Print tempo codes and the slice table
    #[arg(short, long)]
    verbose: bool,

    /// Path to the loop description (JSON)
    input: String,
}

/// Accept the single-dash `-octa` spelling.
fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| {
            if arg == "-octa" {
                OsString::from("--octa")
            } else {
                arg
            }
        })
        .collect()
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse_from(normalize_args(std::env::args_os())) {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    let result = commands::convert::run(&cli.input, cli.octa, cli.verbose);

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
