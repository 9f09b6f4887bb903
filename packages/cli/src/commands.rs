//! Subcommand implementations.
//!
//! Every command returns the text to print, so they can run against any
//! transport.

use std::path::{Path, PathBuf};
use std::time::Duration;

use livedocx::{
    ping_service, Image, Livedocx, LocalTemplate, PingOptions, PingReport, PingStatus,
};
use livedocx_soap::{RemoteFile, Transport};
use nu_ansi_term::{Color, Style};

use crate::cli::{FormatKind, MergeArgs, PingArgs, StoredFileAction};
use crate::error::{CliError, Result};
use crate::input::{parse_pair, MergeValues};

pub fn ping(args: &PingArgs) -> String {
    let options = PingOptions {
        port: args.port,
        attempts: args.attempts,
        threshold: Duration::from_millis(args.threshold_ms),
        timeout: Duration::from_millis(args.timeout_ms),
    };
    render_ping(&args.host, &ping_service(&args.host, &options))
}

fn render_ping(host: &str, report: &PingReport) -> String {
    let mut out = String::new();
    for result in report.results() {
        let color = match result.status {
            PingStatus::Ok => Color::Green,
            PingStatus::Slow => Color::Yellow,
            PingStatus::Lost => Color::Red,
        };
        out.push_str(&format!(
            "attempt {}: {} {} ms\n",
            result.attempt,
            color.paint(result.status.to_string()),
            result.time.as_millis()
        ));
    }
    out.push_str(&format!(
        "{} {} attempts, {} lost, average {} ms",
        Style::new().bold().paint(format!("{}:", host)),
        report.len(),
        report.lost(),
        report.average_time().as_millis()
    ));
    out
}

pub fn formats<T: Transport>(livedocx: &Livedocx<T>, kind: FormatKind) -> Result<String> {
    let session = livedocx.session();
    let names = match kind {
        FormatKind::Templates => session.template_formats()?,
        FormatKind::Documents => livedocx.document_formats()?,
        FormatKind::ImagesImport => session.image_import_formats()?,
        FormatKind::ImagesExport => session.image_export_formats()?,
        FormatKind::Fonts => session.font_names()?,
    };
    Ok(names.join("\n"))
}

pub fn templates<T: Transport>(livedocx: &Livedocx<T>, action: &StoredFileAction) -> Result<String> {
    match action {
        StoredFileAction::List => Ok(render_listing(&livedocx.session().list_templates()?)),
        StoredFileAction::Upload { file } => {
            let template = LocalTemplate::new(livedocx.session(), file.to_string_lossy(), None)?;
            template.upload()?;
            Ok(format!("uploaded {}", template.remote_name()))
        }
        StoredFileAction::Download { name, output } => {
            let data = livedocx.create_remote_template(name)?.download()?;
            write_file(output.clone().unwrap_or_else(|| PathBuf::from(name)), &data)
        }
        StoredFileAction::Delete { name } => {
            livedocx.create_remote_template(name)?.delete()?;
            Ok(format!("deleted {}", name))
        }
        StoredFileAction::Exists { name } => {
            let exists = livedocx.create_remote_template(name)?.exists()?;
            Ok(render_exists(name, exists))
        }
    }
}

pub fn images<T: Transport>(livedocx: &Livedocx<T>, action: &StoredFileAction) -> Result<String> {
    let image = |filename: &str| Image::new(livedocx.session(), filename, None);
    match action {
        StoredFileAction::List => Ok(render_listing(&livedocx.session().list_images()?)),
        StoredFileAction::Upload { file } => {
            let image = image(file.to_string_lossy().as_ref())?;
            image.upload()?;
            Ok(format!("uploaded {}", image.name()))
        }
        StoredFileAction::Download { name, output } => {
            let data = image(name)?.download()?;
            write_file(output.clone().unwrap_or_else(|| PathBuf::from(name)), &data)
        }
        StoredFileAction::Delete { name } => {
            image(name)?.delete()?;
            Ok(format!("deleted {}", name))
        }
        StoredFileAction::Exists { name } => Ok(render_exists(name, image(name)?.exists()?)),
    }
}

/// Merge values into a template and save the document.
///
/// Values from `--values` come first, so `--field` overrides them.
pub fn merge<T: Transport>(livedocx: &Livedocx<T>, args: &MergeArgs) -> Result<String> {
    let mut values = match &args.values {
        Some(path) => MergeValues::from_json_file(path)?,
        None => MergeValues::default(),
    };
    for field in &args.fields {
        let (key, value) = parse_pair("field", field)?;
        values.fields.push((key, value.into()));
    }
    let images = args
        .images
        .iter()
        .map(|image| parse_pair("image", image))
        .collect::<Result<Vec<_>>>()?;

    let (template_dir, template_name) = split_template(&args.template);
    let mut builder = livedocx
        .builder()
        .create_document(args.name.as_str())
        .from_template(template_name, args.cache)
        .with(values.fields)
        .with_images(images);
    if let Some(dir) = template_dir {
        builder = builder.templates_dir(dir);
    }
    if let Some(dir) = &args.out_dir {
        builder = builder.documents_dir(dir);
    }
    for (name, rows) in values.blocks {
        builder = builder.with_block(name, rows);
    }

    let path = builder.retrieve(&args.format)?.save()?;
    Ok(format!("saved {}", path.display()))
}

/// A template path is looked up in its own directory under its file name.
fn split_template(template: &Path) -> (Option<PathBuf>, String) {
    let name = template
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| template.to_string_lossy().into_owned());
    let dir = template
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf);
    (dir, name)
}

fn render_listing(files: &[RemoteFile]) -> String {
    if files.is_empty() {
        return "no files stored".to_string();
    }
    files
        .iter()
        .map(|file| {
            format!(
                "{:<32} {:>10}  {}",
                file.filename, file.file_size, file.modify_time
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_exists(name: &str, exists: bool) -> String {
    if exists {
        format!("{}: {}", name, Color::Green.paint("stored"))
    } else {
        format!("{}: {}", name, Color::Yellow.paint("not stored"))
    }
}

fn write_file(path: PathBuf, data: &[u8]) -> Result<String> {
    std::fs::write(&path, data).map_err(|source| CliError::Output {
        path: path.clone(),
        source,
    })?;
    Ok(format!("wrote {} bytes to {}", data.len(), path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use livedocx::PingResult;
    use livedocx_soap::mock::{MockResponse, MockTransport};
    use livedocx_soap::{Param, Session};

    fn connect(mock: &MockTransport) -> Livedocx<MockTransport> {
        let mut session = Session::new(mock.clone());
        session.log_in("user", "pass").unwrap();
        mock.clear_recorded();
        Livedocx::new(session)
    }

    fn merge_args(template: PathBuf, out_dir: &Path) -> MergeArgs {
        MergeArgs {
            template,
            cache: false,
            format: "PDF".to_string(),
            name: "invoice".to_string(),
            fields: vec!["customer=Acme".to_string()],
            images: vec![],
            values: None,
            out_dir: Some(out_dir.to_path_buf()),
        }
    }

    #[test]
    fn merge_saves_the_document() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("tpl.docx");
        std::fs::write(&template, b"TEMPLATE").unwrap();

        let mock = MockTransport::new()
            .with_response("TemplateExists", MockResponse::Bool(false))
            .with_response("RetrieveDocument", MockResponse::text("JVBERi0xLjQ="));
        let livedocx = connect(&mock);

        let output = merge(&livedocx, &merge_args(template, dir.path())).unwrap();

        let saved = dir.path().join("invoice.pdf");
        assert_eq!(output, format!("saved {}", saved.display()));
        assert_eq!(std::fs::read(saved).unwrap(), b"%PDF-1.4");

        let exists = mock.calls_to("TemplateExists");
        assert_eq!(exists[0].text_param("filename"), Some("tpl.docx"));
        assert_eq!(mock.calls_to("SetLocalTemplate").len(), 1);
    }

    #[test]
    fn merge_reads_blocks_from_the_values_file() {
        let dir = tempfile::tempdir().unwrap();
        let values = dir.path().join("values.json");
        std::fs::write(
            &values,
            r#"{"fields": {"customer": "Acme"}, "blocks": {"items": [{"sku": "A1"}]}}"#,
        )
        .unwrap();

        let mock = MockTransport::new()
            .with_response("TemplateExists", MockResponse::Bool(true))
            .with_response("RetrieveDocument", MockResponse::text("JVBERi0xLjQ="));
        let livedocx = connect(&mock);

        let mut args = merge_args(PathBuf::from("tpl.docx"), dir.path());
        args.fields = vec!["customer=Globex".to_string()];
        args.values = Some(values);
        merge(&livedocx, &args).unwrap();

        let blocks = mock.calls_to("SetBlockFieldValues");
        assert_eq!(blocks[0].text_param("blockName"), Some("items"));

        let fields = mock.calls_to("SetFieldValues");
        match fields[0].param("fieldValues") {
            Some(Param::Table(table)) => {
                assert_eq!(table.rows()[1], vec!["Globex".to_string()]);
            }
            other => panic!("fieldValues should be a table, got {:?}", other),
        }
    }

    #[test]
    fn merge_rejects_malformed_pairs_before_any_call() {
        let dir = tempfile::tempdir().unwrap();
        let mock = MockTransport::new();
        let livedocx = connect(&mock);

        let mut args = merge_args(PathBuf::from("tpl.docx"), dir.path());
        args.images = vec!["logo.png".to_string()];

        let err = merge(&livedocx, &args).unwrap_err();
        assert!(matches!(err, CliError::InvalidPair { flag: "image", .. }));
        assert!(mock.recorded_calls().is_empty());
    }

    #[test]
    fn template_listing() {
        let mock = MockTransport::new().with_response(
            "ListTemplates",
            MockResponse::table(vec![vec![
                "invoice.docx",
                "Mon, 01 Jan 2024 10:00:00 GMT",
                "1024",
                "Mon, 01 Jan 2024 09:00:00 GMT",
            ]]),
        );
        let livedocx = connect(&mock);

        let output = templates(&livedocx, &StoredFileAction::List).unwrap();
        assert!(output.starts_with("invoice.docx"));
        assert!(output.contains("1024"));

        let empty = MockTransport::new();
        let output = templates(&connect(&empty), &StoredFileAction::List).unwrap();
        assert_eq!(output, "no files stored");
    }

    #[test]
    fn template_download_writes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let mock = MockTransport::new()
            .with_response("DownloadTemplate", MockResponse::text("VEVNUExBVEU="));
        let livedocx = connect(&mock);

        let output = dir.path().join("copy.docx");
        templates(
            &livedocx,
            &StoredFileAction::Download {
                name: "invoice.docx".to_string(),
                output: Some(output.clone()),
            },
        )
        .unwrap();

        assert_eq!(std::fs::read(output).unwrap(), b"TEMPLATE");
    }

    #[test]
    fn image_upload_uses_the_basename() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("logo.png");
        std::fs::write(&file, b"PNG").unwrap();

        let mock = MockTransport::new();
        let livedocx = connect(&mock);

        let output = images(&livedocx, &StoredFileAction::Upload { file }).unwrap();
        assert_eq!(output, "uploaded logo.png");

        let uploads = mock.calls_to("UploadImage");
        assert_eq!(uploads[0].text_param("filename"), Some("logo.png"));
        assert_eq!(uploads[0].text_param("image"), Some("UE5H"));
    }

    #[test]
    fn image_exists() {
        let mock = MockTransport::new().with_response("ImageExists", MockResponse::Bool(false));
        let livedocx = connect(&mock);

        let output = images(
            &livedocx,
            &StoredFileAction::Exists {
                name: "logo.png".to_string(),
            },
        )
        .unwrap();
        assert!(output.contains("not stored"));
    }

    #[test]
    fn format_listing() {
        let mock = MockTransport::new()
            .with_response("GetFontNames", MockResponse::strings(["Arial", "Verdana"]));
        let livedocx = connect(&mock);

        assert_eq!(formats(&livedocx, FormatKind::Fonts).unwrap(), "Arial\nVerdana");
    }

    #[test]
    fn ping_summary() {
        let threshold = Duration::from_millis(1000);
        let timeout = Duration::from_millis(3000);
        let report = PingReport::from_results(vec![
            PingResult::classify(1, Some(Duration::from_millis(100)), threshold, timeout),
            PingResult::classify(2, None, threshold, timeout),
        ]);

        let output = render_ping("api.livedocx.com", &report);
        assert!(output.contains("attempt 2:"));
        assert!(output.contains("lost"));
        assert!(output.contains("2 attempts, 1 lost, average 1550 ms"));
    }

    #[test]
    fn template_paths_are_split() {
        assert_eq!(
            split_template(Path::new("templates/invoice.docx")),
            (Some(PathBuf::from("templates")), "invoice.docx".to_string())
        );
        assert_eq!(
            split_template(Path::new("invoice.docx")),
            (None, "invoice.docx".to_string())
        );
    }
}
