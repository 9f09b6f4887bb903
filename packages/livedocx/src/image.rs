//! Images inserted into templates.

use std::path::{Path, PathBuf};

use livedocx_soap::{RemoteFile, Session, Transport};

use crate::encoding;
use crate::error::{Error, Result, StatusContext};

/// An image file, local or stored on the service under its basename.
pub struct Image<'a, T: Transport> {
    session: &'a Session<T>,
    filename: String,
    directory: Option<PathBuf>,
}

impl<'a, T: Transport> Image<'a, T> {
    pub fn new(
        session: &'a Session<T>,
        filename: impl Into<String>,
        directory: Option<&Path>,
    ) -> Result<Self> {
        let filename = filename.into();
        if filename.is_empty() {
            return Err(Error::invalid_argument("image filename must not be empty"));
        }
        Ok(Self {
            session,
            filename,
            directory: directory.map(Path::to_path_buf),
        })
    }

    /// The name the service knows this image by.
    pub fn name(&self) -> String {
        encoding::basename(&self.filename)
    }

    pub fn full_path(&self) -> PathBuf {
        match &self.directory {
            Some(dir) => dir.join(&self.filename),
            None => PathBuf::from(&self.filename),
        }
    }

    pub fn list_all(&self) -> Result<Vec<RemoteFile>> {
        self.session
            .list_images()
            .during("obtaining the list of all images")
    }

    /// Formats accepted for upload, lower-cased.
    pub fn accepted_formats(&self) -> Result<Vec<String>> {
        self.session
            .image_import_formats()
            .during("obtaining the list of accepted image formats")
    }

    /// Formats pages can be rendered to, lower-cased.
    pub fn available_return_formats(&self) -> Result<Vec<String>> {
        self.session
            .image_export_formats()
            .during("obtaining the list of all available image formats")
    }

    pub fn exists(&self) -> Result<bool> {
        self.session
            .image_exists(&self.name())
            .during("checking if the image exists")
    }

    pub fn upload(&self) -> Result<()> {
        let contents = encoding::read_required(&self.full_path())?;
        self.session
            .upload_image(&encoding::encode(&contents), &self.name())
            .during("uploading the image")?;
        tracing::info!(image = %self.name(), "uploaded image");
        Ok(())
    }

    pub fn download(&self) -> Result<Vec<u8>> {
        let payload = self
            .session
            .download_image(&self.name())
            .during("downloading the image")?;
        encoding::decode(&payload)
    }

    pub fn delete(&self) -> Result<()> {
        self.session
            .delete_image(&self.name())
            .during("deleting the image")
    }
}
