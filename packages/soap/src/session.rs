//! The authenticated session handle.
//!
//! Every remote operation goes through a [`Session`]. Anything but
//! `LogIn` fails with [`SoapError::NotAuthenticated`] until
//! [`Session::log_in`] has succeeded, without touching the transport.

use livedocx_core::Table;

use crate::call::SoapCall;
use crate::config::ServiceConfig;
use crate::error::{Result, SoapError};
use crate::listing::RemoteFile;
use crate::response::Element;
use crate::transport::{HttpTransport, Transport};

pub struct Session<T: Transport> {
    transport: T,
    authenticated: bool,
}

impl Session<HttpTransport> {
    /// Open an HTTP session for `config` and log in with its credentials.
    pub fn connect(config: &ServiceConfig) -> Result<Self> {
        let mut session = Session::new(HttpTransport::new(config)?);
        session.log_in_with_config(config)?;
        Ok(session)
    }
}

impl<T: Transport> Session<T> {
    /// A logged-out session over `transport`.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            authenticated: false,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn log_in(&mut self, username: &str, password: &str) -> Result<()> {
        self.transport.invoke(&SoapCall::log_in(username, password))?;
        self.authenticated = true;
        tracing::info!(username, "logged in");
        Ok(())
    }

    /// Log in with the credentials in `config`.
    pub fn log_in_with_config(&mut self, config: &ServiceConfig) -> Result<()> {
        let (username, password) = config.credentials().ok_or_else(|| SoapError::InvalidConfig {
            message: "username and password are required to log in".to_string(),
        })?;
        self.log_in(username, password)
    }

    pub fn log_out(&mut self) -> Result<()> {
        self.invoke(&SoapCall::log_out())?;
        self.authenticated = false;
        tracing::info!("logged out");
        Ok(())
    }

    /// Invoke any operation on the authenticated session.
    pub fn invoke(&self, call: &SoapCall) -> Result<Element> {
        if !self.authenticated {
            return Err(SoapError::NotAuthenticated);
        }
        self.transport.invoke(call)
    }

    fn unit(&self, call: SoapCall) -> Result<()> {
        self.invoke(&call).map(|_| ())
    }

    fn text(&self, call: SoapCall) -> Result<String> {
        self.invoke(&call).map(|result| result.text)
    }

    fn strings(&self, call: SoapCall) -> Result<Vec<String>> {
        self.invoke(&call).map(|result| result.strings())
    }

    fn formats(&self, call: SoapCall) -> Result<Vec<String>> {
        self.strings(call)
            .map(|formats| formats.into_iter().map(|f| f.to_lowercase()).collect())
    }

    // -- Templates --

    pub fn template_exists(&self, filename: &str) -> Result<bool> {
        self.invoke(&SoapCall::template_exists(filename))?.as_bool()
    }

    pub fn set_remote_template(&self, filename: &str) -> Result<()> {
        self.unit(SoapCall::set_remote_template(filename))
    }

    pub fn set_local_template(&self, template_base64: &str, format: &str) -> Result<()> {
        self.unit(SoapCall::set_local_template(template_base64, format))
    }

    pub fn upload_template(&self, template_base64: &str, filename: &str) -> Result<()> {
        self.unit(SoapCall::upload_template(template_base64, filename))
    }

    /// The template content, base64-encoded.
    pub fn download_template(&self, filename: &str) -> Result<String> {
        self.text(SoapCall::download_template(filename))
    }

    pub fn delete_template(&self, filename: &str) -> Result<()> {
        self.unit(SoapCall::delete_template(filename))
    }

    pub fn list_templates(&self) -> Result<Vec<RemoteFile>> {
        RemoteFile::from_table(&self.invoke(&SoapCall::list_templates())?.table())
    }

    /// Accepted template formats, lower-cased.
    pub fn template_formats(&self) -> Result<Vec<String>> {
        self.formats(SoapCall::template_formats())
    }

    /// Formats a document can be retrieved in, lower-cased.
    pub fn document_formats(&self) -> Result<Vec<String>> {
        self.formats(SoapCall::document_formats())
    }

    pub fn font_names(&self) -> Result<Vec<String>> {
        self.strings(SoapCall::font_names())
    }

    pub fn set_ignore_sub_templates(&self, ignore: bool) -> Result<()> {
        self.unit(SoapCall::set_ignore_sub_templates(ignore))
    }

    pub fn set_sub_template_ignore_list(&self, filenames: &[String]) -> Result<()> {
        self.unit(SoapCall::set_sub_template_ignore_list(filenames))
    }

    // -- Fields and blocks --

    pub fn field_names(&self) -> Result<Vec<String>> {
        self.strings(SoapCall::field_names())
    }

    pub fn block_names(&self) -> Result<Vec<String>> {
        self.strings(SoapCall::block_names())
    }

    pub fn block_field_names(&self, block_name: &str) -> Result<Vec<String>> {
        self.strings(SoapCall::block_field_names(block_name))
    }

    pub fn set_field_values(&self, values: &Table) -> Result<()> {
        self.unit(SoapCall::set_field_values(values))
    }

    pub fn set_block_field_values(&self, block_name: &str, values: &Table) -> Result<()> {
        self.unit(SoapCall::set_block_field_values(block_name, values))
    }

    // -- Documents --

    pub fn create_document(&self) -> Result<()> {
        self.unit(SoapCall::create_document())
    }

    /// The merged document in `format`, base64-encoded.
    pub fn retrieve_document(&self, format: &str) -> Result<String> {
        self.text(SoapCall::retrieve_document(format))
    }

    /// One base64 image per page.
    pub fn all_bitmaps(&self, zoom_factor: u32, format: &str) -> Result<Vec<String>> {
        self.strings(SoapCall::all_bitmaps(zoom_factor, format))
    }

    pub fn bitmaps(
        &self,
        from_page: u32,
        to_page: u32,
        zoom_factor: u32,
        format: &str,
    ) -> Result<Vec<String>> {
        self.strings(SoapCall::bitmaps(from_page, to_page, zoom_factor, format))
    }

    pub fn all_metafiles(&self) -> Result<Vec<String>> {
        self.strings(SoapCall::all_metafiles())
    }

    pub fn metafiles(&self, from_page: u32, to_page: u32) -> Result<Vec<String>> {
        self.strings(SoapCall::metafiles(from_page, to_page))
    }

    // -- Images --

    pub fn image_exists(&self, filename: &str) -> Result<bool> {
        self.invoke(&SoapCall::image_exists(filename))?.as_bool()
    }

    pub fn upload_image(&self, image_base64: &str, filename: &str) -> Result<()> {
        self.unit(SoapCall::upload_image(image_base64, filename))
    }

    pub fn download_image(&self, filename: &str) -> Result<String> {
        self.text(SoapCall::download_image(filename))
    }

    pub fn delete_image(&self, filename: &str) -> Result<()> {
        self.unit(SoapCall::delete_image(filename))
    }

    pub fn list_images(&self) -> Result<Vec<RemoteFile>> {
        RemoteFile::from_table(&self.invoke(&SoapCall::list_images())?.table())
    }

    pub fn image_import_formats(&self) -> Result<Vec<String>> {
        self.formats(SoapCall::image_import_formats())
    }

    pub fn image_export_formats(&self) -> Result<Vec<String>> {
        self.formats(SoapCall::image_export_formats())
    }
}

impl<T: Transport> Drop for Session<T> {
    fn drop(&mut self) {
        if self.authenticated {
            if let Err(e) = self.log_out() {
                tracing::warn!(error = %e, "failed to log out while dropping the session");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockResponse, MockTransport};

    fn logged_in(mock: &MockTransport) -> Session<MockTransport> {
        let mut session = Session::new(mock.clone());
        session.log_in("user", "pass").unwrap();
        session
    }

    #[test]
    fn operations_need_a_login() {
        let mock = MockTransport::new();
        let session = Session::new(mock.clone());

        assert!(!session.is_authenticated());
        assert!(matches!(
            session.template_exists("a.docx"),
            Err(SoapError::NotAuthenticated)
        ));
        assert!(mock.recorded_calls().is_empty());
    }

    #[test]
    fn login_and_logout_toggle_the_flag() {
        let mock = MockTransport::new();
        let mut session = logged_in(&mock);
        assert!(session.is_authenticated());

        session.log_out().unwrap();
        assert!(!session.is_authenticated());
        assert_eq!(mock.operations(), vec!["LogIn", "LogOut"]);
        assert_eq!(
            mock.recorded_calls()[0].text_param("username"),
            Some("user")
        );
    }

    #[test]
    fn failed_login_stays_logged_out() {
        let mock = MockTransport::new().fail("LogIn", "Invalid credentials");
        let mut session = Session::new(mock);
        assert!(matches!(
            session.log_in("user", "wrong"),
            Err(SoapError::Fault { .. })
        ));
        assert!(!session.is_authenticated());
    }

    #[test]
    fn login_with_config_needs_credentials() {
        let mut session = Session::new(MockTransport::new());
        assert!(matches!(
            session.log_in_with_config(&ServiceConfig::default()),
            Err(SoapError::InvalidConfig { .. })
        ));

        let config = ServiceConfig::default().with_credentials("u", "p");
        session.log_in_with_config(&config).unwrap();
        assert!(session.is_authenticated());
    }

    #[test]
    fn drop_logs_out() {
        let mock = MockTransport::new();
        drop(logged_in(&mock));
        assert_eq!(mock.operations(), vec!["LogIn", "LogOut"]);
    }

    #[test]
    fn format_lists_are_lower_cased() {
        let mock = MockTransport::new()
            .with_response(
                "GetDocumentFormats",
                MockResponse::strings(["PDF", "Docx"]),
            )
            .with_response("GetFontNames", MockResponse::strings(["Arial"]));
        let session = logged_in(&mock);

        assert_eq!(session.document_formats().unwrap(), vec!["pdf", "docx"]);
        assert_eq!(session.font_names().unwrap(), vec!["Arial"]);
    }

    #[test]
    fn absent_list_is_empty() {
        let mock = MockTransport::new();
        let session = logged_in(&mock);
        assert!(session.block_names().unwrap().is_empty());
    }

    #[test]
    fn listings_are_parsed() {
        let mock = MockTransport::new().with_response(
            "ListImages",
            MockResponse::table(vec![vec![
                "logo.png",
                "Tue, 03 Mar 2009 12:00:00 GMT",
                "512",
                "Tue, 03 Mar 2009 11:00:00 GMT",
            ]]),
        );
        let session = logged_in(&mock);

        let images = session.list_images().unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].filename, "logo.png");
        assert_eq!(images[0].file_size, 512);
    }

    #[test]
    fn existence_checks_read_booleans() {
        let mock = MockTransport::new()
            .with_response("TemplateExists", MockResponse::Bool(true))
            .with_response("ImageExists", MockResponse::Bool(false));
        let session = logged_in(&mock);

        assert!(session.template_exists("a.docx").unwrap());
        assert!(!session.image_exists("a.png").unwrap());
    }
}
