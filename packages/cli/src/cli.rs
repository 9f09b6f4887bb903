use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// LiveDocx - mail-merge documents on the LiveDocx service
#[derive(Parser, Debug)]
#[command(name = "livedocx")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Service configuration file (JSON)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Time TCP connections to the service
    Ping(PingArgs),

    /// List formats or fonts supported by the service
    Formats {
        #[arg(long, value_enum, default_value_t = FormatKind::Documents)]
        kind: FormatKind,
    },

    /// Manage templates stored on the service
    #[command(subcommand)]
    Templates(StoredFileAction),

    /// Manage images stored on the service
    #[command(subcommand)]
    Images(StoredFileAction),

    /// Merge values into a template and save the document
    Merge(MergeArgs),
}

#[derive(Args, Debug)]
pub struct PingArgs {
    #[arg(long, default_value = "api.livedocx.com")]
    pub host: String,

    #[arg(long, default_value_t = 443)]
    pub port: u16,

    #[arg(long, default_value_t = 5)]
    pub attempts: u32,

    /// Connections slower than this are reported as slow
    #[arg(long, default_value_t = 1000)]
    pub threshold_ms: u64,

    #[arg(long, default_value_t = 3000)]
    pub timeout_ms: u64,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatKind {
    Templates,
    Documents,
    ImagesImport,
    ImagesExport,
    Fonts,
}

#[derive(Subcommand, Debug)]
pub enum StoredFileAction {
    /// List stored files
    List,

    /// Upload a local file under its basename
    Upload { file: PathBuf },

    /// Download a stored file
    Download {
        name: String,

        /// Destination, defaults to NAME in the current directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    Delete { name: String },

    Exists { name: String },
}

#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Template stored on the service, or a local template file
    #[arg(long)]
    pub template: PathBuf,

    /// Upload a local template so later merges reuse it
    #[arg(long)]
    pub cache: bool,

    #[arg(long, default_value = "pdf")]
    pub format: String,

    /// Document name, saved as NAME.FORMAT
    #[arg(long)]
    pub name: String,

    /// Field value as KEY=VALUE
    #[arg(long = "field")]
    pub fields: Vec<String>,

    /// Image for a field as FIELD=FILE
    #[arg(long = "image")]
    pub images: Vec<String>,

    /// JSON file with "fields" and "blocks"
    #[arg(long)]
    pub values: Option<PathBuf>,

    #[arg(long)]
    pub out_dir: Option<PathBuf>,
}
