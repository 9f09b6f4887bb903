use std::path::{Path, PathBuf};

use livedocx_soap::{Session, Transport};

use super::Template;
use crate::encoding;
use crate::error::{Error, Result, StatusContext};

/// A template file on the local disk.
///
/// Its content is read again on every upload or activation.
pub struct LocalTemplate<'a, T: Transport> {
    session: &'a Session<T>,
    name: String,
    directory: Option<PathBuf>,
    active: bool,
}

impl<'a, T: Transport> LocalTemplate<'a, T> {
    pub fn new(
        session: &'a Session<T>,
        name: impl Into<String>,
        directory: Option<&Path>,
    ) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::invalid_argument("template name must not be empty"));
        }
        Ok(Self {
            session,
            name,
            directory: directory.map(Path::to_path_buf),
            active: false,
        })
    }

    pub fn full_path(&self) -> PathBuf {
        match &self.directory {
            Some(dir) => dir.join(&self.name),
            None => PathBuf::from(&self.name),
        }
    }

    /// The file content. Missing, unreadable and empty files are all
    /// [`Error::FileNotFound`].
    pub fn contents(&self) -> Result<Vec<u8>> {
        encoding::read_required(&self.full_path())
    }

    /// The document format, taken from the file extension.
    pub fn format(&self) -> Result<String> {
        self.full_path()
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .filter(|ext| !ext.is_empty())
            .ok_or_else(|| {
                Error::invalid_argument(format!("template '{}' has no file extension", self.name))
            })
    }

    /// The filename the service stores this template under.
    pub fn remote_name(&self) -> String {
        encoding::basename(&self.name)
    }

    /// Store the template on the service for later reuse.
    pub fn upload(&self) -> Result<()> {
        let contents = self.contents()?;
        self.session
            .upload_template(&encoding::encode(&contents), &self.remote_name())
            .during("uploading the template")?;
        tracing::info!(template = %self.remote_name(), "uploaded template");
        Ok(())
    }
}

impl<T: Transport> Template<T> for LocalTemplate<'_, T> {
    fn session(&self) -> &Session<T> {
        self.session
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_active(&self) -> bool {
        self.active
    }

    /// Send the content inline for a single merge, without storing it.
    fn set_as_active(&mut self) -> Result<()> {
        let contents = self.contents()?;
        let format = self.format()?;
        self.session
            .set_local_template(&encoding::encode(&contents), &format)
            .during("setting the local template as active")?;
        self.active = true;
        Ok(())
    }
}
