/// A directory opened inside another backend.

use super::{join, normalize, Backend};
use crate::error::{LatexError, Result};

/// View of one directory of a parent backend. Every path is resolved
/// relative to that directory.
pub struct SubDir<'a> {
    inner: &'a mut dyn Backend,
    prefix: String,
}

impl<'a> SubDir<'a> {
    /// Open `path` inside `inner`, creating it first when `create` is set.
    pub fn open(inner: &'a mut dyn Backend, path: &str, create: bool) -> Result<Self> {
        let prefix = normalize(path)?;
        if !inner.is_dir(&prefix) {
            if !create {
                return Err(LatexError::FileNotFound(prefix));
            }
            inner.make_dir(&prefix, true)?;
        }
        Ok(Self { inner, prefix })
    }

    /// Location of this directory in the parent backend.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn full(&self, path: &str) -> Result<String> {
        Ok(join(&self.prefix, &normalize(path)?))
    }

    fn strip(&self, paths: Vec<String>) -> Vec<String> {
        if self.prefix.is_empty() {
            return paths;
        }
        let prefix = format!("{}/", self.prefix);
        paths
            .into_iter()
            .filter_map(|p| p.strip_prefix(&prefix).map(str::to_string))
            .collect()
    }
}

impl Backend for SubDir<'_> {
    fn write_bytes(&mut self, path: &str, data: &[u8]) -> Result<()> {
        let full = self.full(path)?;
        if full == self.prefix {
            return Err(LatexError::invalid_path(path, "is a directory"));
        }
        self.inner.write_bytes(&full, data)
    }

    fn read_bytes(&self, path: &str) -> Result<Vec<u8>> {
        self.inner.read_bytes(&self.full(path)?)
    }

    fn exists(&self, path: &str) -> bool {
        self.full(path).map(|p| self.inner.exists(&p)).unwrap_or(false)
    }

    fn is_dir(&self, path: &str) -> bool {
        self.full(path).map(|p| self.inner.is_dir(&p)).unwrap_or(false)
    }

    fn make_dir(&mut self, path: &str, recreate: bool) -> Result<()> {
        let full = self.full(path)?;
        self.inner.make_dir(&full, recreate)
    }

    fn list_files(&self) -> Result<Vec<String>> {
        Ok(self.strip(self.inner.list_files()?))
    }

    fn list_dirs(&self) -> Result<Vec<String>> {
        Ok(self.strip(self.inner.list_dirs()?))
    }
}
