/// Storage backends for project files.
///
/// A [`Backend`] is a small filesystem-like capability addressed by relative,
/// slash-separated paths. The root is the empty path `""`. Leading slashes and
/// `.` components are ignored; `..` may not climb above the root.
///
/// Three implementations are provided:
/// - [`MemoryFs`]: an ordered in-memory tree, the default project store
/// - [`OsFs`]: a real directory on disk, opened read-only or writable
/// - [`SubDir`]: a directory opened inside another backend

mod memory;
mod os;
mod subdir;

pub use memory::MemoryFs;
pub use os::OsFs;
pub use subdir::SubDir;

use std::io::Read;

use crate::error::{LatexError, Result};

/// Filesystem-like storage addressed by relative slash-separated paths.
pub trait Backend {
    /// Write `data` to `path`, creating parent directories and replacing any
    /// existing file.
    fn write_bytes(&mut self, path: &str, data: &[u8]) -> Result<()>;

    fn read_bytes(&self, path: &str) -> Result<Vec<u8>>;

    /// Whether a file or directory exists at `path`.
    fn exists(&self, path: &str) -> bool;

    fn is_dir(&self, path: &str) -> bool;

    /// Create a directory and its parents.
    ///
    /// Fails with [`LatexError::DirectoryExists`] if it already exists and
    /// `recreate` is false.
    fn make_dir(&mut self, path: &str, recreate: bool) -> Result<()>;

    /// Every file below the root, sorted.
    fn list_files(&self) -> Result<Vec<String>>;

    /// Every directory below the root (root excluded), sorted.
    fn list_dirs(&self) -> Result<Vec<String>>;

    fn write_text(&mut self, path: &str, text: &str) -> Result<()> {
        self.write_bytes(path, text.as_bytes())
    }

    /// Drain `reader` into `path`.
    fn write_stream(&mut self, path: &str, reader: &mut dyn Read) -> Result<()> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        self.write_bytes(path, &data)
    }

    fn read_text(&self, path: &str) -> Result<String> {
        String::from_utf8(self.read_bytes(path)?).map_err(|_| LatexError::NotUtf8(path.to_string()))
    }
}

impl<B: Backend + ?Sized> Backend for &mut B {
    fn write_bytes(&mut self, path: &str, data: &[u8]) -> Result<()> {
        (**self).write_bytes(path, data)
    }

    fn read_bytes(&self, path: &str) -> Result<Vec<u8>> {
        (**self).read_bytes(path)
    }

    fn exists(&self, path: &str) -> bool {
        (**self).exists(path)
    }

    fn is_dir(&self, path: &str) -> bool {
        (**self).is_dir(path)
    }

    fn make_dir(&mut self, path: &str, recreate: bool) -> Result<()> {
        (**self).make_dir(path, recreate)
    }

    fn list_files(&self) -> Result<Vec<String>> {
        (**self).list_files()
    }

    fn list_dirs(&self) -> Result<Vec<String>> {
        (**self).list_dirs()
    }

    fn write_text(&mut self, path: &str, text: &str) -> Result<()> {
        (**self).write_text(path, text)
    }

    fn write_stream(&mut self, path: &str, reader: &mut dyn Read) -> Result<()> {
        (**self).write_stream(path, reader)
    }

    fn read_text(&self, path: &str) -> Result<String> {
        (**self).read_text(path)
    }
}

/// Normalize a project path to its canonical relative form.
///
/// `"/a/./b/"` becomes `"a/b"`, the root is `""`.
pub fn normalize(path: &str) -> Result<String> {
    let mut parts: Vec<&str> = Vec::new();
    for component in path.split('/') {
        match component {
            "" | "." => {}
            ".." => {
                if parts.pop().is_none() {
                    return Err(LatexError::invalid_path(path, "escapes the project root"));
                }
            }
            other => parts.push(other),
        }
    }
    Ok(parts.join("/"))
}

/// Parent directory of a normalized path (`""` for top-level entries).
pub fn dirname(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[..idx],
        None => "",
    }
}

/// Final component of a path.
pub fn basename(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}

/// Join two normalized paths.
pub fn join(base: &str, path: &str) -> String {
    match (base.is_empty(), path.is_empty()) {
        (true, _) => path.to_string(),
        (false, true) => base.to_string(),
        (false, false) => format!("{}/{}", base, path),
    }
}

/// All proper ancestors of a normalized path, outermost first.
///
/// `"a/b/c"` yields `["a", "a/b"]`.
pub(crate) fn ancestors(path: &str) -> Vec<&str> {
    path.match_indices('/').map(|(idx, _)| &path[..idx]).collect()
}

/// Copy one file between backends.
pub fn copy_file<S, D>(src: &S, src_path: &str, dst: &mut D, dst_path: &str) -> Result<()>
where
    S: Backend + ?Sized,
    D: Backend + ?Sized,
{
    let data = src.read_bytes(src_path)?;
    tracing::debug!(src = src_path, dst = dst_path, bytes = data.len(), "copying file");
    dst.write_bytes(dst_path, &data)
}

/// Recursively copy the whole tree of `src` into the root of `dst`.
///
/// Relative paths are preserved and directories (empty ones included) are
/// created as needed. Existing files in `dst` are overwritten.
pub fn copy_dir<S, D>(src: &S, dst: &mut D) -> Result<()>
where
    S: Backend + ?Sized,
    D: Backend + ?Sized,
{
    for dir in src.list_dirs()? {
        dst.make_dir(&dir, true)?;
    }
    for file in src.list_files()? {
        copy_file(src, &file, dst, &file)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("main.tex").unwrap(), "main.tex");
        assert_eq!(normalize("/a/./b/").unwrap(), "a/b");
        assert_eq!(normalize("a/../b.tex").unwrap(), "b.tex");
        assert_eq!(normalize("/").unwrap(), "");
        assert!(matches!(
            normalize("../outside.tex"),
            Err(LatexError::InvalidPath { .. })
        ));
    }

    #[test]
    fn test_dirname_and_join() {
        assert_eq!(dirname("main.pdf"), "");
        assert_eq!(dirname("out/sub/main.pdf"), "out/sub");
        assert_eq!(basename("out/sub/main.pdf"), "main.pdf");
        assert_eq!(basename("main.pdf"), "main.pdf");
        assert_eq!(join("", "a"), "a");
        assert_eq!(join("a", ""), "a");
        assert_eq!(join("a", "b/c"), "a/b/c");
    }

    #[test]
    fn test_ancestors() {
        assert_eq!(ancestors("a/b/c"), vec!["a", "a/b"]);
        assert!(ancestors("top").is_empty());
    }

    #[test]
    fn test_copy_dir_preserves_tree() {
        let mut src = MemoryFs::new();
        src.write_text("main.tex", "hello").unwrap();
        src.write_bytes("img/logo.png", &[0, 159, 146, 150]).unwrap();
        src.make_dir("empty", false).unwrap();

        let mut dst = MemoryFs::new();
        copy_dir(&src, &mut dst).unwrap();

        assert_eq!(dst.read_text("main.tex").unwrap(), "hello");
        assert_eq!(dst.read_bytes("img/logo.png").unwrap(), vec![0, 159, 146, 150]);
        assert!(dst.is_dir("empty"));
    }
}
