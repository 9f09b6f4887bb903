//! Local directories used by the document builder.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const TEMPLATES_DIR_VAR: &str = "LIVEDOCX_TEMPLATES_DIR";
pub const IMAGES_DIR_VAR: &str = "LIVEDOCX_IMAGES_DIR";
pub const DOCUMENTS_DIR_VAR: &str = "LIVEDOCX_DOCUMENTS_DIR";

/// Where local templates and images are read from and documents saved to.
///
/// Every directory defaults to the current one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Directories {
    pub templates: PathBuf,
    pub images: PathBuf,
    pub documents: PathBuf,
}

impl Default for Directories {
    fn default() -> Self {
        Self {
            templates: PathBuf::from("."),
            images: PathBuf::from("."),
            documents: PathBuf::from("."),
        }
    }
}

impl Directories {
    /// Defaults overlaid with the `LIVEDOCX_*_DIR` environment variables.
    pub fn from_env() -> Self {
        Self::default().overlay(|name| std::env::var(name).ok())
    }

    pub fn overlay(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(dir) = lookup(TEMPLATES_DIR_VAR) {
            self.templates = dir.into();
        }
        if let Some(dir) = lookup(IMAGES_DIR_VAR) {
            self.images = dir.into();
        }
        if let Some(dir) = lookup(DOCUMENTS_DIR_VAR) {
            self.documents = dir.into();
        }
        self
    }

    /// Use `dir` for all three.
    pub fn all(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref().to_path_buf();
        Self {
            templates: dir.clone(),
            images: dir.clone(),
            documents: dir,
        }
    }
}
