//! Error types for the forint-o-meter library.
//!
//! Internally everything is an `anyhow::Error` so that context can be attached freely with
//! `.context(..)`. At the public boundary the error is tagged with an [`ErrorType`] so that a
//! caller can tell a fatal data-load failure apart from a recoverable validation failure.

use std::fmt::{Debug, Display, Formatter};

/// The public result type of the library.
pub type Result<T> = std::result::Result<T, Error>;

/// The crate-internal result type. Errors are untagged until they cross a public boundary.
pub(crate) type Res<T> = std::result::Result<T, anyhow::Error>;

/// The category of a failure.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum ErrorType {
    /// The reference data is missing, unreadable or malformed. This is fatal for the load
    /// attempt: nothing can be composed without reference data.
    DataLoad,
    /// User-supplied input violated a constraint (e.g. a negative amount). Recoverable: the user
    /// should be re-prompted and any previously valid state kept.
    Validation,
    /// The configuration directory or `config.json` is missing or invalid.
    Config,
    /// The chart could not be rendered or written.
    Export,
    /// Any other filesystem problem.
    Io,
}

impl Display for ErrorType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ErrorType::DataLoad => "data load error",
            ErrorType::Validation => "validation error",
            ErrorType::Config => "configuration error",
            ErrorType::Export => "export error",
            ErrorType::Io => "io error",
        };
        f.write_str(s)
    }
}

/// An error that has been tagged with an [`ErrorType`].
pub struct Error {
    error_type: ErrorType,
    inner: anyhow::Error,
}

impl Error {
    pub fn new(error_type: ErrorType, inner: impl Into<anyhow::Error>) -> Self {
        Self {
            error_type,
            inner: inner.into(),
        }
    }

    pub fn error_type(&self) -> ErrorType {
        self.error_type
    }

    /// True for failures the user can fix by changing their input.
    pub fn is_recoverable(&self) -> bool {
        matches!(self.error_type, ErrorType::Validation)
    }

    pub fn inner(&self) -> &anyhow::Error {
        &self.inner
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {:?}", self.error_type, self.inner)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {:#}", self.error_type, self.inner)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.inner.source()
    }
}

/// Tags an untagged result with an [`ErrorType`] as it crosses a public boundary.
pub(crate) trait IntoResult<T> {
    fn pub_result(self, error_type: ErrorType) -> Result<T>;
}

impl<T, E> IntoResult<T> for std::result::Result<T, E>
where
    E: Into<anyhow::Error>,
{
    fn pub_result(self, error_type: ErrorType) -> Result<T> {
        self.map_err(|e| Error::new(error_type, e))
    }
}
