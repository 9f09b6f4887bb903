use livedocx_soap::{Session, Transport};

use super::Template;
use crate::encoding;
use crate::error::{Error, Result, StatusContext};

/// A template stored on the service, addressed by filename.
pub struct RemoteTemplate<'a, T: Transport> {
    session: &'a Session<T>,
    name: String,
    /// Set once the service has confirmed the template is stored.
    confirmed: bool,
    active: bool,
}

impl<'a, T: Transport> RemoteTemplate<'a, T> {
    pub fn new(session: &'a Session<T>, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::invalid_argument("template name must not be empty"));
        }
        Ok(Self {
            session,
            name,
            confirmed: false,
            active: false,
        })
    }

    /// A template just uploaded under `name`.
    pub(crate) fn uploaded(session: &'a Session<T>, name: String) -> Self {
        Self {
            session,
            name,
            confirmed: true,
            active: false,
        }
    }

    pub fn exists(&mut self) -> Result<bool> {
        let exists = self
            .session
            .template_exists(&self.name)
            .during("checking if the template exists")?;
        self.confirmed = exists;
        Ok(exists)
    }

    /// The template content.
    pub fn download(&self) -> Result<Vec<u8>> {
        let payload = self
            .session
            .download_template(&self.name)
            .during("downloading the template")?;
        encoding::decode(&payload)
    }

    pub fn delete(&mut self) -> Result<()> {
        self.session
            .delete_template(&self.name)
            .during("deleting the template")?;
        self.confirmed = false;
        self.active = false;
        Ok(())
    }
}

impl<T: Transport> Template<T> for RemoteTemplate<'_, T> {
    fn session(&self) -> &Session<T> {
        self.session
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn set_as_active(&mut self) -> Result<()> {
        if !self.confirmed && !self.exists()? {
            return Err(Error::RemoteNotFound {
                what: "template",
                name: self.name.clone(),
            });
        }
        self.session
            .set_remote_template(&self.name)
            .during("setting the remote template as active")?;
        self.active = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use livedocx_soap::mock::{MockResponse, MockTransport};

    fn session(mock: &MockTransport) -> Session<MockTransport> {
        let mut session = Session::new(mock.clone());
        session.log_in("user", "pass").unwrap();
        mock.clear_recorded();
        session
    }

    #[test]
    fn empty_name_is_rejected() {
        let mock = MockTransport::new();
        let session = session(&mock);
        let err = RemoteTemplate::new(&session, "").err().unwrap();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn activating_an_absent_template_fails() {
        let mock =
            MockTransport::new().with_response("TemplateExists", MockResponse::Bool(false));
        let session = session(&mock);
        let mut template = RemoteTemplate::new(&session, "tpl.docx").unwrap();

        let err = template.set_as_active().unwrap_err();
        assert!(matches!(err, Error::RemoteNotFound { what: "template", .. }));
        assert!(!template.is_active());
        assert_eq!(mock.operations(), vec!["TemplateExists"]);
    }

    #[test]
    fn confirmed_template_is_not_checked_twice() {
        let mock = MockTransport::new().with_response("TemplateExists", MockResponse::Bool(true));
        let session = session(&mock);
        let mut template = RemoteTemplate::new(&session, "tpl.docx").unwrap();

        assert!(template.exists().unwrap());
        template.set_as_active().unwrap();

        assert!(template.is_active());
        assert_eq!(mock.operations(), vec!["TemplateExists", "SetRemoteTemplate"]);
        assert_eq!(
            mock.calls_to("SetRemoteTemplate")[0].text_param("filename"),
            Some("tpl.docx")
        );
    }

    #[test]
    fn introspection_needs_the_active_template() {
        let mock = MockTransport::new()
            .with_response("TemplateExists", MockResponse::Bool(true))
            .with_response("GetFieldNames", MockResponse::strings(["customer"]))
            .with_response("GetBlockNames", MockResponse::strings(["items"]));
        let session = session(&mock);
        let mut template = RemoteTemplate::new(&session, "tpl.docx").unwrap();

        assert!(matches!(template.field_names(), Err(Error::NotActive)));
        assert!(matches!(template.block_names(), Err(Error::NotActive)));

        template.set_as_active().unwrap();
        assert_eq!(template.field_names().unwrap(), vec!["customer"]);
        assert_eq!(template.block_names().unwrap(), vec!["items"]);
    }

    #[test]
    fn download_decodes_content() {
        let mock =
            MockTransport::new().with_response("DownloadTemplate", MockResponse::text("VEVNUExBVEU="));
        let session = session(&mock);
        let template = RemoteTemplate::new(&session, "tpl.docx").unwrap();
        assert_eq!(template.download().unwrap(), b"TEMPLATE");
    }

    #[test]
    fn delete_failure_names_the_operation() {
        let mock = MockTransport::new().fail("DeleteTemplate", "locked");
        let session = session(&mock);
        let mut template = RemoteTemplate::new(&session, "tpl.docx").unwrap();

        let err = template.delete().unwrap_err();
        assert_eq!(err.to_string(), "error while deleting the template");
        assert_eq!(err.kind(), ErrorKind::Status);
    }

    #[test]
    fn shared_operations() {
        let mock = MockTransport::new()
            .with_response("GetTemplateFormats", MockResponse::strings(["DOCX", "RTF"]));
        let session = session(&mock);
        let template = RemoteTemplate::new(&session, "tpl.docx").unwrap();

        assert_eq!(template.accepted_template_formats().unwrap(), vec!["docx", "rtf"]);
        assert!(matches!(
            template.ignore_listed_sub_templates(&[]),
            Err(Error::InvalidArgument { .. })
        ));
        template
            .ignore_listed_sub_templates(&["header.docx".to_string()])
            .unwrap();
        template.ignore_sub_templates(true).unwrap();
        assert_eq!(
            mock.operations(),
            vec!["GetTemplateFormats", "SetSubTemplateIgnoreList", "SetIgnoreSubTemplates"]
        );
    }
}
