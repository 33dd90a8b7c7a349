use thiserror::Error as ThisError;

/*-------------------------------------------------------------------------------------------------
  Errors and Results
-------------------------------------------------------------------------------------------------*/

/// Errors that can occur while loading the CloudFront IP ranges and classifying addresses.
#[derive(Debug, ThisError)]
pub enum Error {
    /// The provider document could not be retrieved or did not have the expected shape.
    #[error("can't get allowed CIDR list from {origin}: {reason}")]
    SourceUnavailable { origin: String, reason: String },

    /// A candidate token is not a dotted-quad IPv4 address.
    #[error("not a valid IPv4 address - got: {0}")]
    InvalidAddress(String),

    /// An `ip_prefix` value is not in `a.b.c.d/n` form.
    #[error("invalid CIDR block `{value}`: {reason}")]
    InvalidCidr { value: String, reason: String },

    /// A configuration value (proxy URL, host pattern) is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn source_unavailable(origin: impl Into<String>, reason: impl ToString) -> Self {
        Error::SourceUnavailable {
            origin: origin.into(),
            reason: reason.to_string(),
        }
    }

    /// Re-label a [Error::SourceUnavailable] error with the origin the document came from; other
    /// errors are returned unchanged.
    pub(crate) fn at_origin(self, origin: &str) -> Self {
        match self {
            Error::SourceUnavailable { reason, .. } => Error::SourceUnavailable {
                origin: origin.to_string(),
                reason,
            },
            error => error,
        }
    }
}

/*--------------------------------------------------------------------------------------
  Log Error Function
--------------------------------------------------------------------------------------*/

#[cfg(test)]
pub(crate) fn log_error(error: &Error) {
    log::error!("{}", error);
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
