/// In-memory backend.

use std::collections::{BTreeMap, BTreeSet};

use super::{ancestors, normalize, Backend};
use crate::error::{LatexError, Result};

/// An ordered in-memory file tree.
#[derive(Debug, Default, Clone)]
pub struct MemoryFs {
    files: BTreeMap<String, Vec<u8>>,
    dirs: BTreeSet<String>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of files stored.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    fn create_parents(&mut self, path: &str) -> Result<()> {
        for dir in ancestors(path) {
            if self.files.contains_key(dir) {
                return Err(LatexError::invalid_path(path, format!("'{}' is a file", dir)));
            }
            self.dirs.insert(dir.to_string());
        }
        Ok(())
    }
}

impl Backend for MemoryFs {
    fn write_bytes(&mut self, path: &str, data: &[u8]) -> Result<()> {
        let path = normalize(path)?;
        if path.is_empty() || self.dirs.contains(&path) {
            return Err(LatexError::invalid_path(path, "is a directory"));
        }
        self.create_parents(&path)?;
        self.files.insert(path, data.to_vec());
        Ok(())
    }

    fn read_bytes(&self, path: &str) -> Result<Vec<u8>> {
        let path = normalize(path)?;
        self.files
            .get(&path)
            .cloned()
            .ok_or(LatexError::FileNotFound(path))
    }

    fn exists(&self, path: &str) -> bool {
        match normalize(path) {
            Ok(path) => path.is_empty() || self.files.contains_key(&path) || self.dirs.contains(&path),
            Err(_) => false,
        }
    }

    fn is_dir(&self, path: &str) -> bool {
        match normalize(path) {
            Ok(path) => path.is_empty() || self.dirs.contains(&path),
            Err(_) => false,
        }
    }

    fn make_dir(&mut self, path: &str, recreate: bool) -> Result<()> {
        let path = normalize(path)?;
        if path.is_empty() || self.dirs.contains(&path) {
            return if recreate {
                Ok(())
            } else {
                Err(LatexError::DirectoryExists(path))
            };
        }
        if self.files.contains_key(&path) {
            return Err(LatexError::invalid_path(path, "is a file"));
        }
        self.create_parents(&path)?;
        self.dirs.insert(path);
        Ok(())
    }

    fn list_files(&self) -> Result<Vec<String>> {
        Ok(self.files.keys().cloned().collect())
    }

    fn list_dirs(&self) -> Result<Vec<String>> {
        Ok(self.dirs.iter().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_creates_parents() {
        let mut fs = MemoryFs::new();
        fs.write_text("chapters/one/intro.tex", "intro").unwrap();

        assert!(fs.is_dir("chapters"));
        assert!(fs.is_dir("chapters/one"));
        assert!(fs.exists("/chapters/one/intro.tex"));
        assert_eq!(fs.list_dirs().unwrap(), vec!["chapters", "chapters/one"]);
    }

    #[test]
    fn test_overwrite_is_last_write_wins() {
        let mut fs = MemoryFs::new();
        fs.write_text("main.tex", "first").unwrap();
        fs.write_text("main.tex", "second").unwrap();

        assert_eq!(fs.len(), 1);
        assert_eq!(fs.read_text("main.tex").unwrap(), "second");
    }

    #[test]
    fn test_make_dir_recreate() {
        let mut fs = MemoryFs::new();
        fs.make_dir("out", false).unwrap();
        assert!(matches!(fs.make_dir("out", false), Err(LatexError::DirectoryExists(_))));
        fs.make_dir("out", true).unwrap();
        fs.make_dir("", true).unwrap();
    }

    #[test]
    fn test_file_and_dir_conflicts() {
        let mut fs = MemoryFs::new();
        fs.write_text("a", "file").unwrap();
        assert!(fs.write_text("a/b.tex", "x").is_err());
        assert!(fs.make_dir("a", true).is_err());

        fs.make_dir("d", false).unwrap();
        assert!(fs.write_text("d", "x").is_err());
    }

    #[test]
    fn test_read_missing_file() {
        let fs = MemoryFs::new();
        assert!(matches!(fs.read_bytes("nope.tex"), Err(LatexError::FileNotFound(p)) if p == "nope.tex"));
    }

    #[test]
    fn test_read_text_rejects_invalid_utf8() {
        let mut fs = MemoryFs::new();
        fs.write_bytes("blob", &[0xff, 0xfe]).unwrap();
        assert!(matches!(fs.read_text("blob"), Err(LatexError::NotUtf8(_))));
    }
}
