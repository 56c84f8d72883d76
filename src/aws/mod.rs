use aws_smithy_types::DateTime;

pub mod backend;
pub mod connector;
pub mod credentials;
pub mod error;
pub mod session;
pub mod spec;
pub mod sts;

/// AWS temporary credentials returned by an AssumeRole hop
#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: String,
    pub expiration: DateTime,
}

// Re-export commonly used types (functions should be accessed via module path)
pub use backend::{AwsBackend, SdkBackend};
pub use connector::SessionConnector;
pub use error::ConnectError;
pub use session::{CallerIdentity, Session, SessionParams};
pub use spec::ConnectSpec;
