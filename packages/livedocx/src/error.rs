//! Error types for the LiveDocx client.

use std::path::PathBuf;

use livedocx_soap::SoapError;
use thiserror::Error;

/// The broad class of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input from the caller, detected before any remote call.
    Validation,
    /// A local file or remote resource is missing.
    NotFound,
    /// The service, the transport or a local write failed.
    Status,
    /// An operation was called out of sequence.
    State,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] livedocx_core::Error),

    #[error("error while {operation}")]
    Status {
        operation: &'static str,
        #[source]
        source: SoapError,
    },

    #[error("error while sending blocks information (block: {block})")]
    BlockDeclaration {
        block: String,
        #[source]
        source: SoapError,
    },

    #[error("file not found or not readable: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("{what} '{name}' does not exist on the service")]
    RemoteNotFound { what: &'static str, name: String },

    #[error("the template must be the active template")]
    NotActive,

    #[error("cannot {action} a document that has not been retrieved yet")]
    NotRetrieved { action: &'static str },

    #[error("the document has already been retrieved")]
    AlreadyRetrieved,

    #[error("the session is not authenticated")]
    NotAuthenticated,

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("invalid document: {message}")]
    InvalidDocument { message: String },

    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Core(livedocx_core::Error::BlockNameNotSet) => ErrorKind::State,
            Error::Core(_) | Error::InvalidArgument { .. } | Error::InvalidDocument { .. } => {
                ErrorKind::Validation
            }
            Error::FileNotFound { .. } | Error::RemoteNotFound { .. } => ErrorKind::NotFound,
            Error::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound => {
                ErrorKind::NotFound
            }
            Error::Io { .. }
            | Error::Status { .. }
            | Error::BlockDeclaration { .. }
            | Error::Base64(_) => ErrorKind::Status,
            Error::NotActive
            | Error::NotRetrieved { .. }
            | Error::AlreadyRetrieved
            | Error::NotAuthenticated => ErrorKind::State,
        }
    }

    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument {
            message: message.into(),
        }
    }

    pub(crate) fn block_declaration(block: &str, source: SoapError) -> Self {
        match source {
            SoapError::NotAuthenticated => Error::NotAuthenticated,
            source => Error::BlockDeclaration {
                block: block.to_string(),
                source,
            },
        }
    }
}

/// Wrap transport failures with the operation that was attempted.
pub(crate) trait StatusContext<T> {
    fn during(self, operation: &'static str) -> Result<T>;
}

impl<T> StatusContext<T> for std::result::Result<T, SoapError> {
    fn during(self, operation: &'static str) -> Result<T> {
        self.map_err(|source| match source {
            SoapError::NotAuthenticated => Error::NotAuthenticated,
            source => Error::Status { operation, source },
        })
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn status_errors_keep_their_cause() {
        let failed: std::result::Result<(), SoapError> = Err(SoapError::Fault {
            code: "soap:Server".into(),
            message: "boom".into(),
        });
        let err = failed.during("creating the document").unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Status);
        assert_eq!(err.to_string(), "error while creating the document");
        assert!(err.source().unwrap().to_string().contains("boom"));
    }

    #[test]
    fn logged_out_session_is_a_state_error() {
        let failed: std::result::Result<(), SoapError> = Err(SoapError::NotAuthenticated);
        let err = failed.during("creating the document").unwrap_err();
        assert!(matches!(err, Error::NotAuthenticated));
        assert_eq!(err.kind(), ErrorKind::State);

        let err = Error::block_declaration("items", SoapError::NotAuthenticated);
        assert!(matches!(err, Error::NotAuthenticated));
    }

    #[test]
    fn block_declaration_names_the_block() {
        let err = Error::block_declaration(
            "items",
            SoapError::Transport {
                message: "reset".into(),
            },
        );
        assert!(err.to_string().contains("(block: items)"));
        assert_eq!(err.kind(), ErrorKind::Status);
    }

    #[test]
    fn kinds() {
        assert_eq!(
            Error::from(livedocx_core::Error::InvalidFieldKey).kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            Error::from(livedocx_core::Error::BlockNameNotSet).kind(),
            ErrorKind::State
        );
        assert_eq!(
            Error::FileNotFound {
                path: "tpl.docx".into()
            }
            .kind(),
            ErrorKind::NotFound
        );
        assert_eq!(Error::NotRetrieved { action: "get" }.kind(), ErrorKind::State);
    }

    #[test]
    fn io_errors_are_not_found_only_for_missing_paths() {
        let io = |kind: std::io::ErrorKind| Error::Io {
            path: "out/invoice.pdf".into(),
            source: std::io::Error::from(kind),
        };
        assert_eq!(io(std::io::ErrorKind::NotFound).kind(), ErrorKind::NotFound);
        assert_eq!(
            io(std::io::ErrorKind::PermissionDenied).kind(),
            ErrorKind::Status
        );
    }
}
