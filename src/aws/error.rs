//! Locally detected connection errors
//!
//! SDK and STS failures are not classified here; they travel as the source
//! of an `anyhow::Error` with a context message attached.

use thiserror::Error;

/// Malformed credential descriptions rejected before any AWS call
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConnectError {
    /// A required key is absent from a credential key map
    #[error("Credential map is missing required key '{0}'")]
    MissingKey(&'static str),

    /// A keyword the session constructor does not accept
    #[error("Unsupported session keyword '{0}'")]
    UnknownKeyword(String),

    /// Only one half of an access key pair was supplied
    #[error("Access key id and secret access key must be given together")]
    IncompleteKeyPair,

    /// Account ids are exactly 12 ASCII digits
    #[error("Invalid AWS account id '{0}': expected 12 digits")]
    InvalidAccountId(String),
}
