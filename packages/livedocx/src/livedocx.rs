//! The entry point: an authenticated session plus the values of the
//! current merge.

use livedocx_core::{
    encode_flat, encode_tabular, Assignment, Block, ImageRef, Scalar, ValueContainer,
};
use livedocx_soap::{HttpTransport, ServiceConfig, Session, Transport};

use crate::config::Directories;
use crate::encoding;
use crate::error::{Error, Result, StatusContext};
use crate::image::Image;
use crate::template::{LocalTemplate, RemoteTemplate, TemplateResolver};

pub struct Livedocx<T: Transport> {
    session: Session<T>,
    values: ValueContainer,
    directories: Directories,
}

impl Livedocx<HttpTransport> {
    /// Connect to the service described by `config` and log in.
    pub fn connect(config: &ServiceConfig) -> Result<Self> {
        let session = Session::connect(config).during("logging in")?;
        Ok(Self::new(session))
    }
}

impl<T: Transport> Livedocx<T> {
    pub fn new(session: Session<T>) -> Self {
        Self {
            session,
            values: ValueContainer::new(),
            directories: Directories::default(),
        }
    }

    pub fn with_directories(mut self, directories: Directories) -> Self {
        self.directories = directories;
        self
    }

    pub fn session(&self) -> &Session<T> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session<T> {
        &mut self.session
    }

    pub fn directories(&self) -> &Directories {
        &self.directories
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    // -- Factories --

    pub fn create_block(&self) -> Block {
        Block::new()
    }

    pub fn create_remote_template(&self, name: &str) -> Result<RemoteTemplate<'_, T>> {
        RemoteTemplate::new(&self.session, name)
    }

    /// A local template looked up in the templates directory.
    pub fn create_local_template(&self, name: &str) -> Result<LocalTemplate<'_, T>> {
        LocalTemplate::new(&self.session, name, Some(self.directories.templates.as_path()))
    }

    /// An image looked up in the images directory.
    pub fn create_image(&self, filename: &str) -> Result<Image<'_, T>> {
        Image::new(&self.session, filename, Some(self.directories.images.as_path()))
    }

    pub fn template_resolver(&self) -> TemplateResolver<'_, T> {
        TemplateResolver::new(&self.session, &self.directories.templates)
    }

    // -- Values --

    pub fn assign(&mut self, assignment: Assignment) -> Result<&mut Self> {
        self.values.assign(assignment)?;
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

    pub fn assign_block(&mut self, block: Block) -> Result<&mut Self> {
        self.assign(Assignment::Block(block))
    }

    pub fn values(&self) -> &ValueContainer {
        &self.values
    }

    /// Declare the values assigned to this instance, then forget them.
    pub fn prepare(&mut self) -> Result<&mut Self> {
        let values = std::mem::take(&mut self.values);
        self.declare(&values)?;
        Ok(self)
    }

    /// Send `values` to the service.
    ///
    /// Every block is encoded before anything is sent, then blocks are
    /// declared one by one, then all scalar and image fields together.
    /// Images must already be stored on the service.
    pub fn declare(&self, values: &ValueContainer) -> Result<()> {
        let blocks = values
            .blocks()
            .iter()
            .map(|(name, block)| -> Result<_> {
                Ok((name, encode_tabular(block.retrieve_values())?))
            })
            .collect::<Result<Vec<_>>>()?;

        for (name, table) in &blocks {
            tracing::debug!(block = %name, rows = table.body().len(), "declaring block");
            self.session
                .set_block_field_values(name, table)
                .map_err(|source| Error::block_declaration(name, source))?;
        }

        let fields = values.declared_fields();
        if !fields.is_empty() {
            self.session
                .set_field_values(&encode_flat(&fields))
                .during("sending fields information")?;
        }
        Ok(())
    }

    // -- Documents --

    /// Merge the active template with the declared values.
    pub fn create_document(&self) -> Result<()> {
        self.session
            .create_document()
            .during("creating the document")?;
        tracing::info!("document created");
        Ok(())
    }

    /// The merged document in `format`.
    pub fn retrieve(&self, format: &str) -> Result<Vec<u8>> {
        let format = non_empty_format(format)?;
        let payload = self
            .session
            .retrieve_document(&format)
            .during("retrieving the document")?;
        encoding::decode(&payload)
    }

    /// Every page rendered as an image, in page order.
    pub fn all_bitmaps(&self, zoom_factor: u32, format: &str) -> Result<Vec<Vec<u8>>> {
        let format = non_empty_format(format)?;
        let pages = self
            .session
            .all_bitmaps(zoom_factor, &format)
            .during("retrieving the bitmaps")?;
        encoding::decode_all(pages)
    }

    /// Pages `from_page..=to_page` rendered as images.
    pub fn bitmaps(
        &self,
        from_page: u32,
        to_page: u32,
        zoom_factor: u32,
        format: &str,
    ) -> Result<Vec<Vec<u8>>> {
        let format = non_empty_format(format)?;
        check_page_range(from_page, to_page)?;
        let pages = self
            .session
            .bitmaps(from_page, to_page, zoom_factor, &format)
            .during("retrieving the bitmaps")?;
        encoding::decode_all(pages)
    }

    pub fn all_metafiles(&self) -> Result<Vec<Vec<u8>>> {
        let pages = self
            .session
            .all_metafiles()
            .during("retrieving the metafiles")?;
        encoding::decode_all(pages)
    }

    pub fn metafiles(&self, from_page: u32, to_page: u32) -> Result<Vec<Vec<u8>>> {
        check_page_range(from_page, to_page)?;
        let pages = self
            .session
            .metafiles(from_page, to_page)
            .during("retrieving the metafiles")?;
        encoding::decode_all(pages)
    }

    // -- Blocks of the active template --

    pub fn block_names(&self) -> Result<Vec<String>> {
        self.session
            .block_names()
            .during("retrieving all block names")
    }

    pub fn block_field_names(&self, block_name: &str) -> Result<Vec<String>> {
        if block_name.is_empty() {
            return Err(livedocx_core::Error::InvalidBlockName.into());
        }
        self.session
            .block_field_names(block_name)
            .during("retrieving the block field names")
    }

    pub fn document_formats(&self) -> Result<Vec<String>> {
        self.session
            .document_formats()
            .during("obtaining the available document formats")
    }
}

fn non_empty_format(format: &str) -> Result<String> {
    let format = format.trim().to_lowercase();
    if format.is_empty() {
        return Err(Error::invalid_argument("a document format is required"));
    }
    Ok(format)
}

fn check_page_range(from_page: u32, to_page: u32) -> Result<()> {
    if from_page == 0 || to_page < from_page {
        return Err(Error::invalid_argument(format!(
            "invalid page range {}..{}",
            from_page, to_page
        )));
    }
    Ok(())
}
