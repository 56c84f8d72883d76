//! Session handles
//!
//! A `Session` wraps a loaded AWS SDK config so several service clients can
//! be built from the same credential and region context.

use std::{fmt, sync::Arc};

use anyhow::Result;
use aws_config::SdkConfig;
use aws_sdk_sts::Client as StsClient;

use super::{ConnectError, Credentials, sts};

/// Arguments handed to the session constructor
///
/// Field names follow the shared AWS config keys so a keyword map can be
/// passed through unchanged.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SessionParams {
    pub region_name: Option<String>,
    pub profile_name: Option<String>,
    pub aws_access_key_id: Option<String>,
    pub aws_secret_access_key: Option<String>,
    pub aws_session_token: Option<String>,
}

impl SessionParams {
    /// Params for temporary credentials pinned to `region`
    pub fn from_credentials(credentials: &Credentials, region: &str) -> Self {
        Self {
            region_name: Some(region.to_string()),
            profile_name: None,
            aws_access_key_id: Some(credentials.access_key_id.clone()),
            aws_secret_access_key: Some(credentials.secret_access_key.clone()),
            aws_session_token: Some(credentials.session_token.clone()),
        }
    }

    /// Params for a named profile pinned to `region`
    pub fn from_profile(profile: &str, region: &str) -> Self {
        Self {
            region_name: Some(region.to_string()),
            profile_name: Some(profile.to_string()),
            ..Self::default()
        }
    }

    /// Whether static keys are carried
    pub fn has_static_keys(&self) -> bool {
        self.aws_access_key_id.is_some()
    }

    /// Reject a half-specified key pair
    pub fn validate(&self) -> Result<(), ConnectError> {
        match (&self.aws_access_key_id, &self.aws_secret_access_key) {
            (Some(_), Some(_)) | (None, None) => Ok(()),
            _ => Err(ConnectError::IncompleteKeyPair),
        }
    }
}

impl fmt::Debug for SessionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionParams")
            .field("region_name", &self.region_name)
            .field("profile_name", &self.profile_name)
            .field("aws_access_key_id", &self.aws_access_key_id)
            .field(
                "aws_secret_access_key",
                &self.aws_secret_access_key.as_ref().map(|_| "<redacted>"),
            )
            .field(
                "aws_session_token",
                &self.aws_session_token.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

/// Identity reported by STS GetCallerIdentity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    pub account: String,
    pub arn: String,
    pub user_id: String,
}

/// Configured AWS credential and region context
#[derive(Clone)]
pub struct Session {
    config: Arc<SdkConfig>,
}

impl Session {
    pub fn from_sdk_config(config: SdkConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Get the underlying SDK config for direct client construction.
    pub fn sdk_config(&self) -> &SdkConfig {
        &self.config
    }

    pub fn region(&self) -> Option<&str> {
        self.config.region().map(|r| r.as_ref())
    }

    /// Create an STS client carrying this session's identity.
    pub fn sts_client(&self) -> StsClient {
        StsClient::new(self.sdk_config())
    }

    /// Ask STS who this session authenticates as.
    ///
    /// This is the first point where the session's credentials are verified.
    pub async fn caller_identity(&self) -> Result<CallerIdentity> {
        sts::caller_identity(&self.sts_client()).await
    }

    /// Whether two handles share the same loaded config
    pub fn ptr_eq(&self, other: &Session) -> bool {
        Arc::ptr_eq(&self.config, &other.config)
    }

    #[cfg(test)]
    pub(crate) fn stub(region: Option<&str>) -> Self {
        let builder = SdkConfig::builder();
        let builder = match region {
            Some(r) => builder.region(aws_config::Region::new(r.to_string())),
            None => builder,
        };
        Self::from_sdk_config(builder.build())
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("region", &self.region())
            .finish_non_exhaustive()
    }
}
