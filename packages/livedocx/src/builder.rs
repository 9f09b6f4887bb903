//! One-shot document generation.
//!
//! A [`DocumentBuilder`] collects everything a merge needs, then
//! [`retrieve`](DocumentBuilder::retrieve) runs the whole sequence once:
//!
//! 1. resolve and activate the template
//! 2. upload the images the service does not have yet
//! 3. declare blocks, then fields and images
//! 4. create the document and fetch it in the requested format
//!
//! Fields, images and blocks are validated before the first step, so bad
//! input never leaves anything behind on the service.
//!
//! The result can then be read with [`get`](DocumentBuilder::get) or written
//! with [`save`](DocumentBuilder::save) as often as needed. Building again
//! needs a new builder.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use livedocx_core::{encode_tabular, Block, FieldMap, ImageRef, Row, Scalar, ValueContainer};
use livedocx_soap::Transport;

use crate::config::Directories;
use crate::document::Document;
use crate::encoding;
use crate::error::{Error, Result};
use crate::image::Image;
use crate::livedocx::Livedocx;
use crate::template::TemplateResolver;

struct Generated {
    format: String,
    data: Vec<u8>,
}

pub struct DocumentBuilder<'a, T: Transport> {
    livedocx: &'a Livedocx<T>,
    directories: Directories,
    document_name: Option<String>,
    template: Option<(String, bool)>,
    fields: FieldMap,
    images: IndexMap<String, String>,
    blocks: IndexMap<String, Vec<Row>>,
    result: Option<Generated>,
}

impl<'a, T: Transport> DocumentBuilder<'a, T> {
    pub fn new(livedocx: &'a Livedocx<T>) -> Self {
        Self {
            livedocx,
            directories: livedocx.directories().clone(),
            document_name: None,
            template: None,
            fields: FieldMap::new(),
            images: IndexMap::new(),
            blocks: IndexMap::new(),
            result: None,
        }
    }

    /// Name of the document, without extension.
    pub fn create_document(mut self, name: impl Into<String>) -> Self {
        self.document_name = Some(name.into());
        self
    }

    /// With `cache`, a template missing on the service is uploaded for
    /// reuse instead of being sent for this merge only.
    pub fn from_template(mut self, name: impl Into<String>, cache: bool) -> Self {
        self.template = Some((name.into(), cache));
        self
    }

    /// Add field values. Later values replace earlier ones for the same key.
    pub fn with<I, K, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Scalar>,
    {
        self.fields
            .extend(values.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn with_field(self, key: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.with([(key.into(), value.into())])
    }

    /// Bind image files, relative to the images directory, to fields.
    pub fn with_images<I, K, F>(mut self, images: I) -> Self
    where
        I: IntoIterator<Item = (K, F)>,
        K: Into<String>,
        F: Into<String>,
    {
        self.images
            .extend(images.into_iter().map(|(k, f)| (k.into(), f.into())));
        self
    }

    pub fn with_image(self, field: impl Into<String>, filename: impl Into<String>) -> Self {
        self.with_images([(field.into(), filename.into())])
    }

    /// Set the rows of block `name`, replacing any rows given before.
    pub fn with_block(mut self, name: impl Into<String>, rows: impl IntoIterator<Item = Row>) -> Self {
        self.blocks.insert(name.into(), rows.into_iter().collect());
        self
    }

    pub fn templates_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.directories.templates = dir.as_ref().to_path_buf();
        self
    }

    pub fn images_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.directories.images = dir.as_ref().to_path_buf();
        self
    }

    pub fn documents_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.directories.documents = dir.as_ref().to_path_buf();
        self
    }

    pub fn is_retrieved(&self) -> bool {
        self.result.is_some()
    }

    /// Generate the document in `format`.
    pub fn retrieve(&mut self, format: &str) -> Result<&mut Self> {
        if self.result.is_some() {
            return Err(Error::AlreadyRetrieved);
        }
        let (template, cache) = self
            .template
            .clone()
            .ok_or_else(|| Error::invalid_argument("no template was configured"))?;
        let format = format.trim().to_lowercase();
        if format.is_empty() {
            return Err(Error::invalid_argument("a document format is required"));
        }

        let values = self.collect_values()?;
        let livedocx = self.livedocx;
        let images = self
            .images
            .values()
            .map(|filename| {
                Image::new(
                    livedocx.session(),
                    filename.as_str(),
                    Some(self.directories.images.as_path()),
                )
            })
            .collect::<Result<Vec<_>>>()?;

        TemplateResolver::new(livedocx.session(), &self.directories.templates)
            .resolve(&template, cache)?;

        for image in &images {
            if !image.exists()? {
                image.upload()?;
            }
        }

        livedocx.declare(&values)?;
        livedocx.create_document()?;
        let data = livedocx.retrieve(&format)?;

        tracing::info!(
            document = self.document_name.as_deref().unwrap_or_default(),
            format = %format,
            bytes = data.len(),
            "document retrieved"
        );
        self.result = Some(Generated { format, data });
        Ok(self)
    }

    /// Validate fields, images and blocks before anything is sent.
    ///
    /// Images are bound under the name the service stores them by, and every
    /// block is encoded once so row shape errors surface here.
    fn collect_values(&self) -> Result<ValueContainer> {
        let mut values = ValueContainer::new();
        if !self.fields.is_empty() {
            values.assign_all(self.fields.clone())?;
        }
        for (field, filename) in &self.images {
            values.assign_image(
                field.as_str(),
                ImageRef::remote(encoding::basename(filename)),
            )?;
        }
        for (name, rows) in &self.blocks {
            let mut block = Block::named(name.as_str())?;
            block.bind_rows(rows.iter().cloned())?;
            encode_tabular(block.retrieve_values())?;
            values.assign_block(block)?;
        }
        Ok(values)
    }

    /// The generated document.
    pub fn get(&self) -> Result<&[u8]> {
        self.generated("get").map(|g| g.data.as_slice())
    }

    /// Write the document to `documents_dir/name.format`.
    pub fn save(&self) -> Result<PathBuf> {
        let generated = self.generated("save")?;
        let name = self.file_name(generated)?;
        Document::new(name, generated.data.clone())?.save(&self.directories.documents)
    }

    pub fn into_document(self) -> Result<Document> {
        let generated = self.generated("convert")?;
        let name = self.file_name(generated)?;
        let data = self.result.map(|g| g.data).unwrap_or_default();
        Document::new(name, data)
    }

    fn generated(&self, action: &'static str) -> Result<&Generated> {
        self.result
            .as_ref()
            .ok_or(Error::NotRetrieved { action })
    }

    fn file_name(&self, generated: &Generated) -> Result<String> {
        let name = self
            .document_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .ok_or_else(|| Error::invalid_argument("no document name was configured"))?;
        Ok(format!("{}.{}", name, generated.format))
    }
}

impl<T: Transport> Livedocx<T> {
    /// Start building a document with this instance's directories.
    pub fn builder(&self) -> DocumentBuilder<'_, T> {
        DocumentBuilder::new(self)
    }
}
