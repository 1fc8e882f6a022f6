use thiserror::Error;

/// Error raised by sequence construction, transformation and consumption.
///
/// All failures are programmer errors (a malformed argument, or an operation
/// the sequence cannot support). They are raised synchronously at the
/// offending call and never retried.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    /// Malformed input: a value of the wrong shape was supplied.
    pub fn type_error(operation: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::Type {
                operation: operation.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    /// The operation cannot be carried out for the sequence's length or
    /// capabilities (unbounded length, missing random access, negative index).
    pub fn range_error(operation: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::Range {
                operation: operation.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn is_type_error(&self) -> bool {
        matches!(self.kind(), ErrorKind::Type { .. })
    }

    pub fn is_range_error(&self) -> bool {
        matches!(self.kind(), ErrorKind::Range { .. })
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("type error in {operation}: {message}")]
    Type { operation: String, message: String },

    #[error("range error in {operation}: {message}")]
    Range { operation: String, message: String },
}

impl ErrorKind {
    pub fn operation(&self) -> &str {
        match self {
            ErrorKind::Type { operation, .. } | ErrorKind::Range { operation, .. } => operation,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ErrorKind::Type { message, .. } | ErrorKind::Range { message, .. } => message,
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}
