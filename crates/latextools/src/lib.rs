/// latextools
///
/// Build LaTeX projects in memory and compile them to PDF with an external
/// compiler such as `pdflatex`.

pub mod args;
pub mod compiler;
pub mod driver;
pub mod error;
pub mod file;
pub mod fs;
pub mod pdf;
pub mod project;

pub use compiler::{Compiler, DEFAULT_PROGRAM};
pub use driver::{output_file_name, CompileOptions, CompileOutput, DEFAULT_ENTRY};
pub use error::{LatexError, Result};
pub use file::{BinaryFile, Content, LatexGenerator, PlainTextFile, ProjectFile, GENERATED_BANNER};
pub use fs::{Backend, MemoryFs, OsFs, SubDir};
pub use pdf::{Pdf, PdfOptions};
pub use project::{Destination, LatexProject, Source};
