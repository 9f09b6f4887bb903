use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Livedocx(#[from] livedocx::Error),

    #[error(transparent)]
    Soap(#[from] livedocx_soap::SoapError),

    #[error(transparent)]
    Values(#[from] livedocx_core::Error),

    #[error("invalid --{flag} '{value}': expected KEY=VALUE")]
    InvalidPair { flag: &'static str, value: String },

    #[error("invalid merge values: {message}")]
    InvalidValues { message: String },

    #[error("cannot read {}: {message}", path.display())]
    Input { path: PathBuf, message: String },

    #[error("cannot write {}: {source}", path.display())]
    Output {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, CliError>;
