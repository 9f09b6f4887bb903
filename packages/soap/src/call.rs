//! The operations of the mail-merge service, as data.
//!
//! A [`SoapCall`] names one remote operation and its ordered parameters.
//! Transports turn it into an envelope; the mock transport records it.

use livedocx_core::Table;

/// A parameter value of a remote operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
    Text(String),
    Bool(bool),
    Int(i64),
    /// Serialized as `<string>` children.
    List(Vec<String>),
    /// Serialized as `<ArrayOfString>` children, one per row.
    Table(Table),
}

/// One remote operation with its parameters in wire order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapCall {
    operation: &'static str,
    params: Vec<(&'static str, Param)>,
}

impl SoapCall {
    pub fn new(operation: &'static str) -> Self {
        Self {
            operation,
            params: Vec::new(),
        }
    }

    pub fn with(mut self, name: &'static str, param: Param) -> Self {
        self.params.push((name, param));
        self
    }

    fn text(self, name: &'static str, value: impl Into<String>) -> Self {
        self.with(name, Param::Text(value.into()))
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }

    pub fn params(&self) -> &[(&'static str, Param)] {
        &self.params
    }

    /// Look up a parameter by name.
    pub fn param(&self, name: &str) -> Option<&Param> {
        self.params
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, p)| p)
    }

    /// Look up a text parameter by name.
    pub fn text_param(&self, name: &str) -> Option<&str> {
        match self.param(name) {
            Some(Param::Text(s)) => Some(s),
            _ => None,
        }
    }

    // -- Session --

    pub fn log_in(username: &str, password: &str) -> Self {
        Self::new("LogIn")
            .text("username", username)
            .text("password", password)
    }

    pub fn log_out() -> Self {
        Self::new("LogOut")
    }

    // -- Templates --

    pub fn template_exists(filename: &str) -> Self {
        Self::new("TemplateExists").text("filename", filename)
    }

    pub fn set_remote_template(filename: &str) -> Self {
        Self::new("SetRemoteTemplate").text("filename", filename)
    }

    /// `template` is the base64-encoded template content.
    pub fn set_local_template(template: &str, format: &str) -> Self {
        Self::new("SetLocalTemplate")
            .text("template", template)
            .text("format", format)
    }

    /// `template` is the base64-encoded template content.
    pub fn upload_template(template: &str, filename: &str) -> Self {
        Self::new("UploadTemplate")
            .text("template", template)
            .text("filename", filename)
    }

    pub fn download_template(filename: &str) -> Self {
        Self::new("DownloadTemplate").text("filename", filename)
    }

    pub fn delete_template(filename: &str) -> Self {
        Self::new("DeleteTemplate").text("filename", filename)
    }

    pub fn list_templates() -> Self {
        Self::new("ListTemplates")
    }

    pub fn template_formats() -> Self {
        Self::new("GetTemplateFormats")
    }

    pub fn document_formats() -> Self {
        Self::new("GetDocumentFormats")
    }

    pub fn font_names() -> Self {
        Self::new("GetFontNames")
    }

    pub fn set_ignore_sub_templates(ignore: bool) -> Self {
        Self::new("SetIgnoreSubTemplates").with("ignoreSubTemplates", Param::Bool(ignore))
    }

    pub fn set_sub_template_ignore_list(filenames: &[String]) -> Self {
        Self::new("SetSubTemplateIgnoreList").with("filenames", Param::List(filenames.to_vec()))
    }

    // -- Fields and blocks --

    pub fn field_names() -> Self {
        Self::new("GetFieldNames")
    }

    pub fn block_names() -> Self {
        Self::new("GetBlockNames")
    }

    pub fn block_field_names(block_name: &str) -> Self {
        Self::new("GetBlockFieldNames").text("blockName", block_name)
    }

    pub fn set_field_values(values: &Table) -> Self {
        Self::new("SetFieldValues").with("fieldValues", Param::Table(values.clone()))
    }

    pub fn set_block_field_values(block_name: &str, values: &Table) -> Self {
        Self::new("SetBlockFieldValues")
            .text("blockName", block_name)
            .with("blockFieldValues", Param::Table(values.clone()))
    }

    // -- Documents --

    pub fn create_document() -> Self {
        Self::new("CreateDocument")
    }

    pub fn retrieve_document(format: &str) -> Self {
        Self::new("RetrieveDocument").text("format", format)
    }

    pub fn all_bitmaps(zoom_factor: u32, format: &str) -> Self {
        Self::new("GetAllBitmaps")
            .with("zoomFactor", Param::Int(zoom_factor as i64))
            .text("format", format)
    }

    pub fn bitmaps(from_page: u32, to_page: u32, zoom_factor: u32, format: &str) -> Self {
        Self::new("GetBitmaps")
            .with("zoomFactor", Param::Int(zoom_factor as i64))
            .with("fromPage", Param::Int(from_page as i64))
            .with("toPage", Param::Int(to_page as i64))
            .text("format", format)
    }

    pub fn all_metafiles() -> Self {
        Self::new("GetAllMetafiles")
    }

    pub fn metafiles(from_page: u32, to_page: u32) -> Self {
        Self::new("GetMetafiles")
            .with("fromPage", Param::Int(from_page as i64))
            .with("toPage", Param::Int(to_page as i64))
    }

    // -- Images --

    pub fn image_exists(filename: &str) -> Self {
        Self::new("ImageExists").text("filename", filename)
    }

    /// `image` is the base64-encoded image content.
    pub fn upload_image(image: &str, filename: &str) -> Self {
        Self::new("UploadImage")
            .text("image", image)
            .text("filename", filename)
    }

    pub fn download_image(filename: &str) -> Self {
        Self::new("DownloadImage").text("filename", filename)
    }

    pub fn delete_image(filename: &str) -> Self {
        Self::new("DeleteImage").text("filename", filename)
    }

    pub fn list_images() -> Self {
        Self::new("ListImages")
    }

    pub fn image_import_formats() -> Self {
        Self::new("GetImageImportFormats")
    }

    pub fn image_export_formats() -> Self {
        Self::new("GetImageExportFormats")
    }
}
