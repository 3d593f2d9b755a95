/// External LaTeX compiler invocation

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{LatexError, Result};

/// Program used when none is configured.
pub const DEFAULT_PROGRAM: &str = "pdflatex";

/// How to run the external compiler.
///
/// The command line is `program [args...] <entry>`, run with the staging
/// directory as its working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compiler {
    program: PathBuf,
    args: Vec<String>,
}

impl Default for Compiler {
    /// `pdflatex -interaction=nonstopmode`
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM).arg("-interaction=nonstopmode")
    }
}

impl Compiler {
    /// A compiler with no extra arguments.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Swap the program, keeping the arguments.
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Append an argument placed before the entry file.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn extra_args(&self) -> &[String] {
        &self.args
    }

    /// Compile `entry` inside `cwd` and wait for the process to finish.
    ///
    /// Both pipes are drained before the exit status is checked. Stdin is
    /// closed so an interactive prompt cannot block the run.
    pub fn run(&self, entry: &str, cwd: &Path) -> Result<()> {
        tracing::info!(program = %self.program.display(), entry, "running latex compiler");

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(entry)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                if e.kind() == io::ErrorKind::NotFound {
                    LatexError::CompilerNotFound {
                        program: self.program.display().to_string(),
                    }
                } else {
                    LatexError::Io(e)
                }
            })?;

        tracing::debug!(
            status = ?output.status.code(),
            stdout_bytes = output.stdout.len(),
            stderr_bytes = output.stderr.len(),
            "latex compiler finished"
        );

        if !output.status.success() {
            return Err(LatexError::compile_failed(
                &output.stdout,
                &output.stderr,
                output.status.code(),
            ));
        }
        Ok(())
    }
}
