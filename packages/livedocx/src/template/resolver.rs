use std::path::{Path, PathBuf};

use livedocx_soap::{Session, Transport};

use super::{LocalTemplate, RemoteTemplate, Template};
use crate::encoding;
use crate::error::Result;

/// The template a merge ended up using.
pub enum ResolvedTemplate<'a, T: Transport> {
    /// Stored on the service, either beforehand or by this resolution.
    Remote(RemoteTemplate<'a, T>),
    /// Sent inline for this merge only.
    Local(LocalTemplate<'a, T>),
}

impl<'a, T: Transport> ResolvedTemplate<'a, T> {
    pub fn is_remote(&self) -> bool {
        matches!(self, ResolvedTemplate::Remote(_))
    }

    pub fn as_template(&self) -> &dyn Template<T> {
        match self {
            ResolvedTemplate::Remote(t) => t,
            ResolvedTemplate::Local(t) => t,
        }
    }

    pub fn name(&self) -> &str {
        self.as_template().name()
    }

    pub fn is_active(&self) -> bool {
        self.as_template().is_active()
    }
}

/// Picks between the stored and the local copy of a template and makes it
/// the active one.
pub struct TemplateResolver<'a, T: Transport> {
    session: &'a Session<T>,
    directory: PathBuf,
}

impl<'a, T: Transport> TemplateResolver<'a, T> {
    /// Local templates are looked up in `directory`.
    pub fn new(session: &'a Session<T>, directory: impl AsRef<Path>) -> Self {
        Self {
            session,
            directory: directory.as_ref().to_path_buf(),
        }
    }

    /// Activate template `name`.
    ///
    /// A copy already stored on the service always wins. Otherwise the local
    /// file is read; with `cache` it is uploaded and activated by name,
    /// without it the content is sent inline for this merge only. The
    /// service is always asked about the basename of `name`, which is what
    /// an upload stores it under.
    pub fn resolve(&self, name: &str, cache: bool) -> Result<ResolvedTemplate<'a, T>> {
        let mut remote = RemoteTemplate::new(self.session, encoding::basename(name))?;
        if remote.exists()? {
            tracing::info!(template = name, "using the template stored on the service");
            remote.set_as_active()?;
            return Ok(ResolvedTemplate::Remote(remote));
        }

        let mut local = LocalTemplate::new(self.session, name, Some(&self.directory))?;
        // Fail on a missing or empty file before anything else is sent.
        local.contents()?;

        if cache {
            local.upload()?;
            let mut uploaded = RemoteTemplate::uploaded(self.session, local.remote_name());
            tracing::info!(template = name, "template cached on the service");
            uploaded.set_as_active()?;
            Ok(ResolvedTemplate::Remote(uploaded))
        } else {
            tracing::info!(template = name, "using the local template for this merge only");
            local.set_as_active()?;
            Ok(ResolvedTemplate::Local(local))
        }
    }
}
