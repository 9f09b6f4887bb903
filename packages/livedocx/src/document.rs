//! A generated document held in memory.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    name: String,
    data: Vec<u8>,
}

impl Document {
    /// Both the name and the content must be non-empty.
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::InvalidDocument {
                message: "a document needs a name".to_string(),
            });
        }
        if data.is_empty() {
            return Err(Error::InvalidDocument {
                message: format!("document '{}' has no content", name),
            });
        }
        Ok(Self { name, data })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Write the document to `dir/name` and return that path.
    pub fn save(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let path = dir.as_ref().join(&self.name);
        std::fs::write(&path, &self.data).map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_name_or_content() {
        assert!(matches!(
            Document::new("", b"x".to_vec()),
            Err(Error::InvalidDocument { .. })
        ));
        assert!(matches!(
            Document::new("invoice.pdf", Vec::new()),
            Err(Error::InvalidDocument { .. })
        ));
    }

    #[test]
    fn save_writes_under_the_name() {
        let dir = tempfile::tempdir().unwrap();
        let document = Document::new("invoice.pdf", b"%PDF-1.4".to_vec()).unwrap();

        let path = document.save(dir.path()).unwrap();

        assert_eq!(path, dir.path().join("invoice.pdf"));
        assert_eq!(std::fs::read(path).unwrap(), b"%PDF-1.4");
    }

    #[test]
    fn save_into_missing_directory_fails() {
        let document = Document::new("invoice.pdf", b"%PDF".to_vec()).unwrap();
        assert!(matches!(
            document.save("/nonexistent/out"),
            Err(Error::Io { .. })
        ));
    }
}
