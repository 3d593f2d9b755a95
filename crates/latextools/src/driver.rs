/// Compile driver: stages a project, runs the compiler per entry and
/// collects the outputs

use std::path::{Path, PathBuf};

use crate::compiler::Compiler;
use crate::error::Result;
use crate::fs::{basename, copy_file, dirname, Backend, OsFs};
use crate::pdf::{Pdf, PdfOptions};
use crate::project::{Destination, LatexProject};

/// Entry compiled when the caller names none.
pub const DEFAULT_ENTRY: &str = "main.tex";

/// Result for one entry of a batch.
#[derive(Debug, Clone, PartialEq)]
pub enum CompileOutput {
    /// The compiled document, loaded into memory.
    Pdf(Pdf),
    /// Name of the compiled document inside the working directory.
    Path(String),
}

impl CompileOutput {
    pub fn pdf(&self) -> Option<&Pdf> {
        match self {
            CompileOutput::Pdf(pdf) => Some(pdf),
            CompileOutput::Path(_) => None,
        }
    }

    pub fn into_pdf(self) -> Option<Pdf> {
        match self {
            CompileOutput::Pdf(pdf) => Some(pdf),
            CompileOutput::Path(_) => None,
        }
    }

    pub fn path(&self) -> Option<&str> {
        match self {
            CompileOutput::Path(path) => Some(path),
            CompileOutput::Pdf(_) => None,
        }
    }

    pub fn into_path(self) -> Option<String> {
        match self {
            CompileOutput::Path(path) => Some(path),
            CompileOutput::Pdf(_) => None,
        }
    }
}

/// Options for compilation
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    /// Working directory to stage into. A temporary directory is used and
    /// removed afterwards when unset.
    pub tmp_dir: Option<PathBuf>,
    /// Parent for temporary working directories (system default when unset)
    pub scratch_dir: Option<PathBuf>,
    /// Return output paths instead of loading the PDFs
    pub return_path: bool,
    /// Passed unchanged to every [`Pdf`] of the batch
    pub pdf_options: PdfOptions,
    pub compiler: Compiler,
}

impl CompileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tmp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.tmp_dir = Some(dir.into());
        self
    }

    pub fn scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = Some(dir.into());
        self
    }

    pub fn return_path(mut self, return_path: bool) -> Self {
        self.return_path = return_path;
        self
    }

    pub fn pdf_option(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.pdf_options.insert(key.into(), value.into());
        self
    }

    pub fn pdf_options(mut self, options: PdfOptions) -> Self {
        self.pdf_options = options;
        self
    }

    pub fn compiler(mut self, compiler: Compiler) -> Self {
        self.compiler = compiler;
        self
    }
}

/// `fname` with its extension swapped for `extension`, keeping its directory.
///
/// The extension of the last path component is replaced by `extension`
/// (whatever its case), or `extension` is appended when there is none.
pub fn output_file_name(fname: &str, extension: &str) -> String {
    let (dir, name) = match fname.rfind('/') {
        Some(idx) => fname.split_at(idx + 1),
        None => ("", fname),
    };
    let stem = match name.rfind('.') {
        Some(idx) => &name[..idx],
        None => name,
    };
    format!("{}{}.{}", dir, stem, extension)
}

impl<B: Backend> LatexProject<B> {
    /// Compile a single entry. See [`LatexProject::compile_pdf_batch`].
    pub fn compile_pdf(&self, fname: &str, options: &CompileOptions) -> Result<Option<CompileOutput>> {
        let mut outputs = self.compile_pdf_batch(&[fname], options)?;
        Ok(outputs.pop().flatten())
    }

    /// Stage the project once and compile every entry in order against it.
    ///
    /// Results follow the order of `fnames`; an entry whose PDF is missing
    /// after a successful run yields `None`. The first failing run aborts
    /// the whole batch.
    pub fn compile_pdf_batch<S: AsRef<str>>(
        &self,
        fnames: &[S],
        options: &CompileOptions,
    ) -> Result<Vec<Option<CompileOutput>>> {
        with_work_dir(options, |work_dir| {
            self.compile_in(work_dir, fnames, &options.compiler, |_, view, out_fname| {
                if options.return_path {
                    return Ok(CompileOutput::Path(out_fname.to_string()));
                }
                let data = view.read_bytes(out_fname)?;
                Ok(CompileOutput::Pdf(Pdf::new(data, options.pdf_options.clone())))
            })
        })
    }

    /// Compile a single entry and copy its PDF into `dst`.
    pub fn save_pdf(
        &self,
        fname: &str,
        dst: Destination<'_>,
        options: &CompileOptions,
    ) -> Result<Option<String>> {
        let mut saved = self.save_pdf_batch(&[fname], dst, options)?;
        Ok(saved.pop().flatten())
    }

    /// Compile a batch and copy every produced PDF into `dst` next to where
    /// its entry sits in the project (`chapters/intro.tex` is saved as
    /// `chapters/intro.pdf`).
    ///
    /// Each output is copied right after its run, before a later entry with
    /// the same basename can overwrite it. Entries without output are
    /// skipped and come back as `None`.
    pub fn save_pdf_batch<S: AsRef<str>>(
        &self,
        fnames: &[S],
        dst: Destination<'_>,
        options: &CompileOptions,
    ) -> Result<Vec<Option<String>>> {
        let mut dst = dst.resolve()?;

        with_work_dir(options, |work_dir| {
            self.compile_in(work_dir, fnames, &options.compiler, |fname, view, out_fname| {
                let target = output_file_name(fname, "pdf");
                dst.make_dir(dirname(&target), true)?;
                copy_file(view, out_fname, dst.as_mut(), &target)?;
                tracing::info!(entry = fname, output = %target, "saved pdf");
                Ok(target)
            })
        })
    }

    /// Stage into `work_dir`, then run the compiler on each entry and hand
    /// every produced output to `collect` before the next run.
    fn compile_in<S, T, F>(
        &self,
        work_dir: &Path,
        fnames: &[S],
        compiler: &Compiler,
        mut collect: F,
    ) -> Result<Vec<Option<T>>>
    where
        S: AsRef<str>,
        F: FnMut(&str, &OsFs, &str) -> Result<T>,
    {
        self.write_src(Destination::dir(work_dir))?;
        tracing::debug!(dir = %work_dir.display(), "staged project");

        let view = OsFs::open(work_dir, false)?;
        let mut outputs = Vec::with_capacity(fnames.len());
        for fname in fnames {
            let fname = fname.as_ref();
            let entry_path = view.resolve(fname)?;
            tracing::debug!(entry = %entry_path.display(), "compiling entry");

            compiler.run(fname, work_dir)?;

            // The compiler writes into its working directory, named after
            // the entry's basename.
            let out_fname = output_file_name(basename(fname), "pdf");
            if !view.exists(&out_fname) {
                tracing::warn!(entry = fname, expected = %out_fname, "compiler produced no output");
                outputs.push(None);
                continue;
            }
            outputs.push(Some(collect(fname, &view, &out_fname)?));
        }
        Ok(outputs)
    }
}

/// Run `f` in the configured working directory, or in a fresh temporary
/// directory that is removed on every exit path.
fn with_work_dir<T>(options: &CompileOptions, f: impl FnOnce(&Path) -> Result<T>) -> Result<T> {
    if let Some(dir) = &options.tmp_dir {
        return f(dir.as_path());
    }

    let mut builder = tempfile::Builder::new();
    builder.prefix("latextools-");
    let tmp = match &options.scratch_dir {
        Some(parent) => {
            std::fs::create_dir_all(parent)?;
            builder.tempdir_in(parent)?
        }
        None => builder.tempdir()?,
    };
    tracing::debug!(dir = %tmp.path().display(), "created temporary working directory");

    // On error `tmp` is dropped here, which removes the directory.
    let value = f(tmp.path())?;
    tmp.close()?;
    Ok(value)
}
