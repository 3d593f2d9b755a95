/// In-memory LaTeX projects

use std::collections::HashSet;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::args::{require_at_least_one, require_exactly_one};
use crate::error::{LatexError, Result};
use crate::file::ProjectFile;
use crate::fs::{copy_dir, normalize, Backend, MemoryFs, OsFs, SubDir};

/// Content for [`LatexProject::add_file`]. Exactly one field must be set.
#[derive(Default)]
pub struct Source<'a> {
    pub text: Option<String>,
    pub data: Option<Vec<u8>>,
    /// An open reader, drained into the project.
    pub file: Option<&'a mut dyn Read>,
    /// An external file read as UTF-8 text.
    pub fname: Option<PathBuf>,
}

impl<'a> Source<'a> {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn data(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: Some(data.into()),
            ..Self::default()
        }
    }

    pub fn file(reader: &'a mut dyn Read) -> Self {
        Self {
            file: Some(reader),
            ..Self::default()
        }
    }

    pub fn fname(fname: impl Into<PathBuf>) -> Self {
        Self {
            fname: Some(fname.into()),
            ..Self::default()
        }
    }
}

/// Where to export files: a directory on disk, an open backend, or a
/// directory inside an open backend.
#[derive(Default)]
pub struct Destination<'a> {
    base_dir: Option<PathBuf>,
    fs: Option<&'a mut dyn Backend>,
}

impl<'a> Destination<'a> {
    /// Any combination of the two; at least one is required by
    /// [`Destination::resolve`].
    pub fn new(base_dir: Option<PathBuf>, fs: Option<&'a mut dyn Backend>) -> Self {
        Self { base_dir, fs }
    }

    /// A directory on disk, opened writable.
    pub fn dir(base_dir: impl Into<PathBuf>) -> Self {
        Self::new(Some(base_dir.into()), None)
    }

    /// The root of an open backend.
    pub fn backend(fs: &'a mut dyn Backend) -> Self {
        Self::new(None, Some(fs))
    }

    /// `base_dir` opened inside `fs`, created if missing.
    pub fn subdir(fs: &'a mut dyn Backend, base_dir: impl Into<PathBuf>) -> Self {
        Self::new(Some(base_dir.into()), Some(fs))
    }

    /// Produce a single writable backend.
    pub fn resolve(self) -> Result<Box<dyn Backend + 'a>> {
        require_at_least_one(
            "Specify at least one argument.",
            &[self.base_dir.is_some(), self.fs.is_some()],
        )?;
        match (self.base_dir, self.fs) {
            (None, Some(fs)) => Ok(Box::new(fs)),
            (Some(dir), None) => Ok(Box::new(OsFs::open(dir, true)?)),
            (Some(dir), Some(fs)) => {
                let sub = dir
                    .to_str()
                    .ok_or_else(|| LatexError::invalid_path(dir.display().to_string(), "not valid UTF-8"))?;
                Ok(Box::new(SubDir::open(fs, sub, true)?))
            }
            (None, None) => Err(LatexError::argument("Specify at least one argument.")),
        }
    }
}

/// A named tree of project files on a storage backend.
///
/// Paths are unique; writing to an existing path replaces its content.
#[derive(Debug, Default)]
pub struct LatexProject<B: Backend = MemoryFs> {
    fs: B,
}

impl LatexProject<MemoryFs> {
    /// An empty in-memory project.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every file below `dir` into a new in-memory project.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let src = OsFs::open(dir.as_ref(), false)?;
        let mut fs = MemoryFs::new();
        copy_dir(&src, &mut fs)?;
        tracing::debug!(dir = %dir.as_ref().display(), files = fs.len(), "loaded project directory");
        Ok(Self { fs })
    }
}

impl<B: Backend> LatexProject<B> {
    /// A project stored in a caller-supplied backend.
    pub fn with_backend(fs: B) -> Self {
        Self { fs }
    }

    pub fn backend(&self) -> &B {
        &self.fs
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.fs
    }

    pub fn into_backend(self) -> B {
        self.fs
    }

    /// Paths of every file in the project, sorted.
    pub fn files(&self) -> Result<Vec<String>> {
        self.fs.list_files()
    }

    /// Write one file at `path` from exactly one content source.
    pub fn add_file(&mut self, path: &str, source: Source<'_>) -> Result<()> {
        const MESSAGE: &str = "Specify exactly one of text, data, file, or fname.";

        let Source {
            text,
            data,
            file,
            fname,
        } = source;
        require_exactly_one(
            MESSAGE,
            &[text.is_some(), data.is_some(), file.is_some(), fname.is_some()],
        )?;

        tracing::debug!(path, "adding file");
        match (text, data, file, fname) {
            (Some(text), ..) => self.fs.write_text(path, &text),
            (_, Some(data), ..) => self.fs.write_bytes(path, &data),
            (_, _, Some(reader), _) => self.fs.write_stream(path, reader),
            (_, _, _, Some(fname)) => {
                let text = std::fs::read_to_string(&fname)?;
                self.fs.write_text(path, &text)
            }
            _ => Err(LatexError::argument(MESSAGE)),
        }
    }

    /// Serialize `file` into the project, followed by the files it requires.
    ///
    /// Each path is written at most once per call.
    pub fn add(&mut self, file: &ProjectFile) -> Result<()> {
        let mut written = HashSet::new();
        self.add_required(file, &mut written)
    }

    fn add_required(&mut self, file: &ProjectFile, written: &mut HashSet<String>) -> Result<()> {
        let path = normalize(file.path())?;
        let content = file.to_bytes();
        if !written.insert(path.clone()) {
            if self.fs.read_bytes(&path).ok().as_deref() != Some(content.as_slice()) {
                tracing::warn!(path = %path, "path already added with different content, keeping the first");
            }
            return Ok(());
        }

        tracing::debug!(path = %path, bytes = content.len(), text = file.is_text(), "adding project file");
        self.fs.write_bytes(&path, &content)?;

        for required in file.required_files() {
            self.add_required(&required, written)?;
        }
        Ok(())
    }

    /// Copy the whole project tree into `dst`.
    pub fn write_src(&self, dst: Destination<'_>) -> Result<()> {
        let mut dst = dst.resolve()?;
        copy_dir(&self.fs, dst.as_mut())
    }
}
