/// Files that can be placed in a LaTeX project
///
/// A [`ProjectFile`] is one of a closed set of variants:
/// - [`BinaryFile`]: raw bytes
/// - [`PlainTextFile`]: text
/// - generated LaTeX: text produced on demand by a [`LatexGenerator`]
///
/// Generated files are serialized behind [`GENERATED_BANNER`].

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::args::require_exactly_one;
use crate::error::{LatexError, Result};

/// Header written in front of every generated LaTeX file.
pub const GENERATED_BANNER: &str = "% This file was automatically generated by latextools.\n\n";

/// The full content of a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(String),
    Bytes(Vec<u8>),
}

impl Content {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Content::Text(text) => text.as_bytes(),
            Content::Bytes(data) => data,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text(text) => Some(text),
            Content::Bytes(_) => None,
        }
    }
}

/// Produces the LaTeX source of a generated file.
///
/// `latex` is called every time the file is serialized and must return the
/// same text for the duration of one compile.
pub trait LatexGenerator {
    /// Path within the project where the file is placed.
    fn path(&self) -> &str;

    fn latex(&self) -> String;

    /// Other files this file depends on.
    fn required_files(&self) -> Vec<ProjectFile> {
        Vec::new()
    }
}

/// A file holding raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryFile {
    path: String,
    data: Vec<u8>,
}

impl BinaryFile {
    /// Create from exactly one of inline `data` or the external file `fname`.
    ///
    /// An external file is read completely here.
    pub fn new(path: impl Into<String>, data: Option<Vec<u8>>, fname: Option<&Path>) -> Result<Self> {
        let data = inline_or_load("Specify either fname or data.", data, fname, |f| fs::read(f))?;
        Ok(Self {
            path: path.into(),
            data,
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// A file holding text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainTextFile {
    path: String,
    text: String,
}

impl PlainTextFile {
    /// Create from exactly one of inline `text` or the external file `fname`
    /// (decoded as UTF-8).
    pub fn new(path: impl Into<String>, text: Option<String>, fname: Option<&Path>) -> Result<Self> {
        let text = inline_or_load("Specify either fname or text.", text, fname, |f| {
            fs::read_to_string(f)
        })?;
        Ok(Self {
            path: path.into(),
            text,
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

fn inline_or_load<T>(
    message: &str,
    inline: Option<T>,
    fname: Option<&Path>,
    load: impl FnOnce(&Path) -> io::Result<T>,
) -> Result<T> {
    require_exactly_one(message, &[fname.is_some(), inline.is_some()])?;
    match (inline, fname) {
        (Some(value), _) => Ok(value),
        (None, Some(fname)) => Ok(load(fname)?),
        (None, None) => Err(LatexError::argument(message)),
    }
}

/// A file that belongs at a fixed path inside a project.
pub enum ProjectFile {
    Binary(BinaryFile),
    PlainText(PlainTextFile),
    Generated(Box<dyn LatexGenerator>),
}

impl ProjectFile {
    pub fn binary(path: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        ProjectFile::Binary(BinaryFile {
            path: path.into(),
            data: data.into(),
        })
    }

    pub fn plain_text(path: impl Into<String>, text: impl Into<String>) -> Self {
        ProjectFile::PlainText(PlainTextFile {
            path: path.into(),
            text: text.into(),
        })
    }

    pub fn generated(generator: impl LatexGenerator + 'static) -> Self {
        ProjectFile::Generated(Box::new(generator))
    }

    pub fn path(&self) -> &str {
        match self {
            ProjectFile::Binary(f) => f.path(),
            ProjectFile::PlainText(f) => f.path(),
            ProjectFile::Generated(g) => g.path(),
        }
    }

    /// Whether the file is serialized as text. Fixed per variant.
    pub fn is_text(&self) -> bool {
        !matches!(self, ProjectFile::Binary(_))
    }

    pub fn content(&self) -> Content {
        match self {
            ProjectFile::Binary(f) => Content::Bytes(f.data.clone()),
            ProjectFile::PlainText(f) => Content::Text(f.text.clone()),
            ProjectFile::Generated(g) => Content::Text(g.latex()),
        }
    }

    /// Serialize the file into `sink`.
    pub fn write_content<W: Write + ?Sized>(&self, sink: &mut W) -> io::Result<()> {
        sink.write_all(&self.to_bytes())
    }

    /// The serialized form: the content, behind [`GENERATED_BANNER`] for
    /// generated files.
    pub fn to_bytes(&self) -> Vec<u8> {
        let content = self.content();
        let mut buf = Vec::new();
        if let ProjectFile::Generated(_) = self {
            buf.extend_from_slice(GENERATED_BANNER.as_bytes());
        }
        buf.extend_from_slice(content.as_bytes());
        buf
    }

    /// Files this file depends on. Only generated files declare any.
    pub fn required_files(&self) -> Vec<ProjectFile> {
        match self {
            ProjectFile::Generated(g) => g.required_files(),
            _ => Vec::new(),
        }
    }
}

impl From<BinaryFile> for ProjectFile {
    fn from(file: BinaryFile) -> Self {
        ProjectFile::Binary(file)
    }
}

impl From<PlainTextFile> for ProjectFile {
    fn from(file: PlainTextFile) -> Self {
        ProjectFile::PlainText(file)
    }
}

impl fmt::Debug for ProjectFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            ProjectFile::Binary(_) => "Binary",
            ProjectFile::PlainText(_) => "PlainText",
            ProjectFile::Generated(_) => "Generated",
        };
        f.debug_struct(kind).field("path", &self.path()).finish()
    }
}
