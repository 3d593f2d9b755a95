/// Compiled PDF artifacts

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::Result;
use crate::fs::Backend;

/// Caller-supplied options carried along with every artifact of a compile.
///
/// The pipeline never looks inside them.
pub type PdfOptions = BTreeMap<String, serde_json::Value>;

/// A compiled PDF held in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct Pdf {
    data: Vec<u8>,
    options: PdfOptions,
}

impl Pdf {
    pub fn new(data: Vec<u8>, options: PdfOptions) -> Self {
        Self { data, options }
    }

    pub fn from_bytes(data: impl Into<Vec<u8>>) -> Self {
        Self::new(data.into(), PdfOptions::new())
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    pub fn options(&self) -> &PdfOptions {
        &self.options
    }

    pub fn option(&self, key: &str) -> Option<&serde_json::Value> {
        self.options.get(key)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether the data starts with the `%PDF-` magic.
    pub fn has_pdf_header(&self) -> bool {
        self.data.starts_with(b"%PDF-")
    }

    /// Write the PDF to a file on disk.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, &self.data)?;
        Ok(())
    }

    /// Write the PDF into a backend.
    pub fn save_to<B: Backend + ?Sized>(&self, backend: &mut B, path: &str) -> Result<()> {
        backend.write_bytes(path, &self.data)
    }
}
