//! AWS operations the connector depends on
//!
//! The trait keeps session construction and STS calls behind a seam so the
//! connector's dispatch and memoization can be unit tested without AWS.

use anyhow::Result;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials as StaticCredentials;
use tracing::{debug, info};

use super::{Credentials, Session, SessionParams, sts};

/// Provider name attached to static keys handed to the SDK
const STATIC_PROVIDER_NAME: &str = "nds-connect";

/// Session construction and STS AssumeRole
#[allow(async_fn_in_trait)] // Internal use only, Send+Sync bounds on trait are sufficient
#[cfg_attr(test, mockall::automock)]
pub trait AwsBackend: Send + Sync {
    /// Construct a session from constructor arguments
    async fn build_session(&self, params: &SessionParams) -> Result<Session>;

    /// Call AssumeRole with the identity of `caller`
    async fn assume_role(
        &self,
        caller: &Session,
        role_arn: &str,
        session_name: &str,
    ) -> Result<Credentials>;
}

/// Backend talking to AWS through the SDK
#[derive(Debug, Clone, Default)]
pub struct SdkBackend;

impl AwsBackend for SdkBackend {
    async fn build_session(&self, params: &SessionParams) -> Result<Session> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        if let Some(profile) = &params.profile_name {
            loader = loader.profile_name(profile);
        }
        if let Some(region) = &params.region_name {
            loader = loader.region(Region::new(region.clone()));
        }
        if let (Some(access_key), Some(secret_key)) =
            (&params.aws_access_key_id, &params.aws_secret_access_key)
        {
            loader = loader.credentials_provider(StaticCredentials::new(
                access_key,
                secret_key,
                params.aws_session_token.clone(),
                None,
                STATIC_PROVIDER_NAME,
            ));
        }

        let config = loader.load().await;
        match config.region() {
            Some(region) => info!("Session opened in region: {}", region),
            None => info!("Session opened without a region"),
        }
        debug!(
            profile = ?params.profile_name,
            static_keys = params.has_static_keys(),
            "Session constructed"
        );

        Ok(Session::from_sdk_config(config))
    }

    async fn assume_role(
        &self,
        caller: &Session,
        role_arn: &str,
        session_name: &str,
    ) -> Result<Credentials> {
        sts::assume_role(&caller.sts_client(), role_arn, session_name).await
    }
}
