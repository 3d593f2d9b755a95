/// Backend over a real directory on disk.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use super::{join, normalize, Backend};
use crate::error::{LatexError, Result};

/// A real OS directory used as a backend.
#[derive(Debug, Clone)]
pub struct OsFs {
    root: PathBuf,
    writable: bool,
}

impl OsFs {
    /// Open `root` as a backend.
    ///
    /// A writable handle creates the directory if it is missing. A read-only
    /// handle requires it to exist and rejects every write.
    pub fn open(root: impl Into<PathBuf>, writable: bool) -> Result<Self> {
        let root = root.into();
        if writable {
            fs::create_dir_all(&root)?;
        } else if !root.is_dir() {
            return Err(LatexError::FileNotFound(root.display().to_string()));
        }
        Ok(Self { root, writable })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_writable(&self) -> bool {
        self.writable
    }

    /// Absolute location of a project path inside this directory.
    pub fn resolve(&self, path: &str) -> Result<PathBuf> {
        let path = normalize(path)?;
        if path.is_empty() {
            Ok(self.root.clone())
        } else {
            Ok(self.root.join(path))
        }
    }

    fn writable_target(&self, path: &str) -> Result<PathBuf> {
        if !self.writable {
            return Err(LatexError::ReadOnly(path.to_string()));
        }
        let target = self.resolve(path)?;
        if target == self.root || target.is_dir() {
            return Err(LatexError::invalid_path(path, "is a directory"));
        }
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(target)
    }

    fn walk(&self, rel: &str, files: &mut Vec<String>, dirs: &mut Vec<String>) -> Result<()> {
        for entry in fs::read_dir(self.resolve(rel)?)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            let child = join(rel, &name);
            let path = entry.path();
            if entry.file_type()?.is_dir() {
                dirs.push(child.clone());
                self.walk(&child, files, dirs)?;
            } else if path.is_file() {
                files.push(child);
            }
        }
        Ok(())
    }
}

impl Backend for OsFs {
    fn write_bytes(&mut self, path: &str, data: &[u8]) -> Result<()> {
        let target = self.writable_target(path)?;
        fs::write(target, data)?;
        Ok(())
    }

    fn write_stream(&mut self, path: &str, reader: &mut dyn Read) -> Result<()> {
        let target = self.writable_target(path)?;
        let mut file = fs::File::create(target)?;
        io::copy(reader, &mut file)?;
        Ok(())
    }

    fn read_bytes(&self, path: &str) -> Result<Vec<u8>> {
        let target = self.resolve(path)?;
        fs::read(&target).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                LatexError::FileNotFound(path.to_string())
            } else {
                LatexError::Io(e)
            }
        })
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve(path).map(|p| p.exists()).unwrap_or(false)
    }

    fn is_dir(&self, path: &str) -> bool {
        self.resolve(path).map(|p| p.is_dir()).unwrap_or(false)
    }

    fn make_dir(&mut self, path: &str, recreate: bool) -> Result<()> {
        if !self.writable {
            return Err(LatexError::ReadOnly(path.to_string()));
        }
        let target = self.resolve(path)?;
        if target.is_dir() {
            return if recreate {
                Ok(())
            } else {
                Err(LatexError::DirectoryExists(path.to_string()))
            };
        }
        fs::create_dir_all(target)?;
        Ok(())
    }

    fn list_files(&self) -> Result<Vec<String>> {
        let (mut files, mut dirs) = (Vec::new(), Vec::new());
        self.walk("", &mut files, &mut dirs)?;
        files.sort();
        Ok(files)
    }

    fn list_dirs(&self) -> Result<Vec<String>> {
        let (mut files, mut dirs) = (Vec::new(), Vec::new());
        self.walk("", &mut files, &mut dirs)?;
        dirs.sort();
        Ok(dirs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writable_open_creates_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("nested/out");
        let fs = OsFs::open(&root, true).unwrap();

        assert!(root.is_dir());
        assert!(fs.is_writable());
    }

    #[test]
    fn test_read_only_open_requires_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing");
        assert!(matches!(OsFs::open(&missing, false), Err(LatexError::FileNotFound(_))));
    }

    #[test]
    fn test_read_only_rejects_writes() {
        let tmp = tempfile::tempdir().unwrap();
        let mut fs = OsFs::open(tmp.path(), false).unwrap();

        assert!(matches!(fs.write_text("a.tex", "x"), Err(LatexError::ReadOnly(_))));
        assert!(matches!(fs.make_dir("d", true), Err(LatexError::ReadOnly(_))));
        assert!(!tmp.path().join("a.tex").exists());
    }

    #[test]
    fn test_write_read_and_list() {
        let tmp = tempfile::tempdir().unwrap();
        let mut fs = OsFs::open(tmp.path(), true).unwrap();
        fs.write_text("main.tex", "body").unwrap();
        fs.write_bytes("fig/plot.png", &[1, 2, 3]).unwrap();
        fs.make_dir("build", false).unwrap();

        assert_eq!(std::fs::read_to_string(tmp.path().join("main.tex")).unwrap(), "body");
        assert_eq!(fs.read_bytes("fig/plot.png").unwrap(), vec![1, 2, 3]);
        assert_eq!(fs.list_files().unwrap(), vec!["fig/plot.png", "main.tex"]);
        assert_eq!(fs.list_dirs().unwrap(), vec!["build", "fig"]);
        assert!(matches!(fs.make_dir("build", false), Err(LatexError::DirectoryExists(_))));
    }

    #[test]
    fn test_write_stream() {
        let tmp = tempfile::tempdir().unwrap();
        let mut fs = OsFs::open(tmp.path(), true).unwrap();
        let mut reader = std::io::Cursor::new(b"streamed".to_vec());
        fs.write_stream("s/stream.txt", &mut reader).unwrap();

        assert_eq!(fs.read_text("s/stream.txt").unwrap(), "streamed");
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let fs = OsFs::open(tmp.path(), false).unwrap();
        assert!(!fs.exists("main.pdf"));
        assert!(matches!(fs.read_bytes("main.pdf"), Err(LatexError::FileNotFound(_))));
    }
}
