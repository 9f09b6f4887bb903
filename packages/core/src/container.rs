//! The aggregate of every value bound for one merge.

use indexmap::IndexMap;

use crate::block::Block;
use crate::error::{Error, Result};
use crate::value::{FieldMap, Scalar};

/// Prefix under which images are declared as template fields.
pub const IMAGE_FIELD_PREFIX: &str = "image:";

/// An image bound to a template field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRef {
    /// An image already stored on the service.
    Remote { filename: String },
    /// Raw image content that still has to be uploaded.
    Bytes { filename: String, data: Vec<u8> },
}

impl ImageRef {
    pub fn remote(filename: impl Into<String>) -> Self {
        ImageRef::Remote {
            filename: filename.into(),
        }
    }

    pub fn bytes(filename: impl Into<String>, data: Vec<u8>) -> Self {
        ImageRef::Bytes {
            filename: filename.into(),
            data,
        }
    }

    /// The filename the service knows (or will know) the image by.
    pub fn filename(&self) -> &str {
        match self {
            ImageRef::Remote { filename } | ImageRef::Bytes { filename, .. } => filename,
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, ImageRef::Remote { .. })
    }
}

/// One call to [`ValueContainer::assign`].
#[derive(Debug, Clone, PartialEq)]
pub enum Assignment {
    /// A single field binding.
    Field(String, Scalar),
    /// An image bound to a field, stored under `image:<field>`.
    Image(String, ImageRef),
    /// Many field bindings at once.
    Bulk(FieldMap),
    /// A named block, replacing any block of the same name.
    Block(Block),
}

/// Fields, blocks and images collected for a single merge.
///
/// Later assignments for the same field, image or block name replace
/// earlier ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueContainer {
    fields: FieldMap,
    blocks: IndexMap<String, Block>,
    images: IndexMap<String, ImageRef>,
}

impl ValueContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an assignment.
    pub fn assign(&mut self, assignment: Assignment) -> Result<&mut Self> {
        match assignment {
            Assignment::Field(key, value) => {
                if key.is_empty() {
                    return Err(Error::InvalidAssignment {
                        message: "field name must be a non empty string".to_string(),
                    });
                }
                if !value.is_bindable() {
                    return Err(Error::InvalidFieldValue { key });
                }
                self.fields.insert(key, value);
            }
            Assignment::Image(field, image) => {
                if field.is_empty() {
                    return Err(Error::InvalidAssignment {
                        message: "image field name must be a non empty string".to_string(),
                    });
                }
                if image.filename().is_empty() {
                    return Err(Error::InvalidAssignment {
                        message: format!("image bound to '{}' has no filename", field),
                    });
                }
                self.images
                    .insert(format!("{}{}", IMAGE_FIELD_PREFIX, field), image);
            }
            Assignment::Bulk(values) => {
                if values.is_empty() {
                    return Err(Error::InvalidAssignment {
                        message: "bulk assignment needs at least one field".to_string(),
                    });
                }
                for (key, value) in &values {
                    if key.is_empty() {
                        return Err(Error::InvalidFieldKey);
                    }
                    if !value.is_bindable() {
                        return Err(Error::InvalidFieldValue { key: key.clone() });
                    }
                }
                self.fields.extend(values);
            }
            Assignment::Block(block) => {
                let name = block.name()?.to_string();
                self.blocks.insert(name, block);
            }
        }
        Ok(self)
    }

    pub fn assign_field(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Scalar>,
    ) -> Result<&mut Self> {
        self.assign(Assignment::Field(key.into(), value.into()))
    }

    pub fn assign_image(&mut self, field: impl Into<String>, image: ImageRef) -> Result<&mut Self> {
        self.assign(Assignment::Image(field.into(), image))
    }

    pub fn assign_all<I, K, V>(&mut self, values: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Scalar>,
    {
        let values = values
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.assign(Assignment::Bulk(values))
    }

    pub fn assign_block(&mut self, block: Block) -> Result<&mut Self> {
        self.assign(Assignment::Block(block))
    }

    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    /// Blocks keyed by name, in first-assignment order.
    pub fn blocks(&self) -> &IndexMap<String, Block> {
        &self.blocks
    }

    /// Images keyed by `image:<field>`.
    pub fn images(&self) -> &IndexMap<String, ImageRef> {
        &self.images
    }

    /// Image bindings as the service expects them: `image:<field>` mapped
    /// to the remote filename.
    pub fn image_fields(&self) -> FieldMap {
        self.images
            .iter()
            .map(|(key, image)| (key.clone(), Scalar::Text(image.filename().to_string())))
            .collect()
    }

    /// Scalar fields followed by image fields, as one flat mapping.
    pub fn declared_fields(&self) -> FieldMap {
        let mut all = self.fields.clone();
        all.extend(self.image_fields());
        all
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.blocks.is_empty() && self.images.is_empty()
    }
}
