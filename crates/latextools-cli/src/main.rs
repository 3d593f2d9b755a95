//! latexc: compile a LaTeX project directory to PDF.
//!
//! The whole source directory is loaded into an in-memory project, staged
//! into a working directory and compiled once per entry file. Produced PDFs
//! are copied into the output directory at the entry's relative path.

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use latextools::{CompileOptions, Compiler, Destination, LatexProject, DEFAULT_ENTRY, DEFAULT_PROGRAM};

#[derive(Parser, Debug)]
#[command(name = "latexc")]
#[command(about = "Compile a LaTeX project directory to PDF")]
#[command(version)]
struct Args {
    /// Directory holding the project sources
    #[arg(value_name = "SRC_DIR")]
    source: PathBuf,

    /// Entry files to compile, relative to SRC_DIR
    #[arg(value_name = "ENTRY", default_value = DEFAULT_ENTRY)]
    entries: Vec<String>,

    /// Directory the PDFs are saved into
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    output: PathBuf,

    /// LaTeX compiler program
    #[arg(long, value_name = "PROG", default_value = DEFAULT_PROGRAM)]
    compiler: PathBuf,

    /// Argument passed to the compiler before the entry (repeatable).
    /// Replaces the default `-interaction=nonstopmode`.
    #[arg(long = "compiler-arg", value_name = "ARG", allow_hyphen_values = true)]
    compiler_args: Vec<String>,

    /// Stage into DIR and keep it afterwards instead of a temporary directory
    #[arg(long, value_name = "DIR")]
    keep_dir: Option<PathBuf>,

    /// Parent directory for temporary working directories
    #[arg(long, value_name = "DIR")]
    scratch_dir: Option<PathBuf>,

    /// Print a JSON summary instead of one line per entry
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    output_dir: &'a Path,
    entries: Vec<EntryReport<'a>>,
}

#[derive(Debug, Serialize)]
struct EntryReport<'a> {
    entry: &'a str,
    /// Saved PDF path relative to `output_dir`, if one was produced
    pdf: Option<String>,
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("Compilation failed: {:#}", e);
        process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn build_compiler(args: &Args) -> Compiler {
    if args.compiler_args.is_empty() {
        Compiler::default().with_program(&args.compiler)
    } else {
        Compiler::new(&args.compiler).args(args.compiler_args.iter().cloned())
    }
}

fn build_options(args: &Args) -> CompileOptions {
    let mut options = CompileOptions::new().compiler(build_compiler(args));
    if let Some(dir) = &args.keep_dir {
        options = options.tmp_dir(dir);
    }
    if let Some(dir) = &args.scratch_dir {
        options = options.scratch_dir(dir);
    }
    options
}

fn run(args: &Args) -> Result<()> {
    let project = LatexProject::load_dir(&args.source)
        .with_context(|| format!("failed to load project from {}", args.source.display()))?;
    tracing::info!(
        source = %args.source.display(),
        files = project.files()?.len(),
        "loaded project"
    );

    let options = build_options(args);
    let saved = project
        .save_pdf_batch(args.entries.as_slice(), Destination::dir(&args.output), &options)
        .with_context(|| format!("failed to compile {}", args.entries.join(", ")))?;

    let report = Report {
        output_dir: &args.output,
        entries: args
            .entries
            .iter()
            .zip(saved)
            .map(|(entry, pdf)| EntryReport { entry, pdf })
            .collect(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for entry in &report.entries {
            match &entry.pdf {
                Some(pdf) => println!("{} -> {}", entry.entry, args.output.join(pdf).display()),
                None => println!("{}: no output produced", entry.entry),
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["latexc", "paper"]).unwrap();

        assert_eq!(args.source, PathBuf::from("paper"));
        assert_eq!(args.entries, vec!["main.tex"]);
        assert_eq!(args.output, PathBuf::from("."));
        assert_eq!(build_compiler(&args), Compiler::default());
        assert!(!args.json);
    }

    #[test]
    fn test_entries_and_compiler_args() {
        let args = Args::try_parse_from([
            "latexc",
            "paper",
            "a.tex",
            "b.tex",
            "--compiler",
            "xelatex",
            "--compiler-arg",
            "-halt-on-error",
            "--keep-dir",
            "build",
            "-vv",
        ])
        .unwrap();

        assert_eq!(args.entries, vec!["a.tex", "b.tex"]);
        assert_eq!(args.verbose, 2);
        assert_eq!(build_compiler(&args), Compiler::new("xelatex").arg("-halt-on-error"));

        let options = build_options(&args);
        assert_eq!(options.tmp_dir, Some(PathBuf::from("build")));
        assert!(options.scratch_dir.is_none());
    }
}
