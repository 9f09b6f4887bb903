//! Templates, stored on the service or read from disk.
//!
//! Both kinds implement [`Template`], which carries the operations that do
//! not depend on where the template lives. Field and block introspection
//! only make sense for the active template, so they fail with
//! [`Error::NotActive`] until [`Template::set_as_active`] has succeeded.

mod local;
mod remote;
mod resolver;

pub use local::LocalTemplate;
pub use remote::RemoteTemplate;
pub use resolver::{ResolvedTemplate, TemplateResolver};

use livedocx_soap::{RemoteFile, Session, Transport};

use crate::error::{Error, Result, StatusContext};

pub trait Template<T: Transport> {
    fn session(&self) -> &Session<T>;

    fn name(&self) -> &str;

    fn is_active(&self) -> bool;

    /// Make this the template the next merge uses.
    fn set_as_active(&mut self) -> Result<()>;

    fn accepted_template_formats(&self) -> Result<Vec<String>> {
        self.session()
            .template_formats()
            .during("obtaining the accepted template formats")
    }

    fn available_document_formats(&self) -> Result<Vec<String>> {
        self.session()
            .document_formats()
            .during("obtaining the available document formats")
    }

    fn available_fonts(&self) -> Result<Vec<String>> {
        self.session()
            .font_names()
            .during("obtaining the available fonts")
    }

    /// Every template stored on the service.
    fn list_all(&self) -> Result<Vec<RemoteFile>> {
        self.session()
            .list_templates()
            .during("obtaining the list of all templates")
    }

    fn ignore_sub_templates(&self, ignore: bool) -> Result<()> {
        self.session()
            .set_ignore_sub_templates(ignore)
            .during("changing the sub-templates setting")
    }

    /// Skip only the listed sub-templates when merging.
    fn ignore_listed_sub_templates(&self, filenames: &[String]) -> Result<()> {
        if filenames.is_empty() {
            return Err(Error::invalid_argument(
                "the list of sub-templates to ignore must not be empty",
            ));
        }
        self.session()
            .set_sub_template_ignore_list(filenames)
            .during("setting the sub-templates ignore list")
    }

    fn field_names(&self) -> Result<Vec<String>> {
        if !self.is_active() {
            return Err(Error::NotActive);
        }
        self.session()
            .field_names()
            .during("obtaining the template field names")
    }

    fn block_names(&self) -> Result<Vec<String>> {
        if !self.is_active() {
            return Err(Error::NotActive);
        }
        self.session()
            .block_names()
            .during("obtaining the template block names")
    }
}
