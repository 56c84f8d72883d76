//! Session connector
//!
//! Turns a [`ConnectSpec`] into a [`Session`]. Customer accounts are reached
//! through a two-hop AssumeRole chain whose first hop is memoized per
//! connector instance.

use anyhow::{Context, Result};
use tokio::sync::OnceCell;
use tracing::{debug, info};

use super::{
    AwsBackend, ConnectSpec, Credentials, SdkBackend, Session, SessionParams,
    sts::{self, validate_account_id},
};
use crate::config::{ConnectorConfig, Platform};

/// Account label used in the first-hop role session name
const BOOTSTRAP_SESSION_LABEL: &str = "bootstrap";

pub struct SessionConnector<B = SdkBackend> {
    backend: B,
    config: ConnectorConfig,
    root_session: OnceCell<Session>,
    sts_session: OnceCell<Session>,
}

impl SessionConnector {
    /// Create a connector backed by the AWS SDK
    pub fn new(config: ConnectorConfig) -> Self {
        Self::with_backend(SdkBackend, config)
    }
}

impl<B: AwsBackend> SessionConnector<B> {
    pub fn with_backend(backend: B, config: ConnectorConfig) -> Self {
        Self {
            backend,
            config,
            root_session: OnceCell::new(),
            sts_session: OnceCell::new(),
        }
    }

    pub fn config(&self) -> &ConnectorConfig {
        &self.config
    }

    /// Open a session for `spec`
    pub async fn connect(&self, spec: ConnectSpec) -> Result<Session> {
        if let ConnectSpec::AssumeRole {
            account_id,
            role_name,
            region,
        } = &spec
        {
            return self
                .connect_assume_role(account_id, role_name.as_deref(), region.as_deref())
                .await;
        }

        let params = spec.session_params().unwrap_or_default();
        params.validate()?;

        debug!(?params, "Opening session");
        self.backend
            .build_session(&params)
            .await
            .context("Failed to open AWS session")
    }

    /// Open a session inside `account_id` through the AssumeRole chain
    ///
    /// `role_name` and `region` fall back to the configured defaults.
    pub async fn connect_assume_role(
        &self,
        account_id: &str,
        role_name: Option<&str>,
        region: Option<&str>,
    ) -> Result<Session> {
        let region = region.unwrap_or(&self.config.default_region);
        let credentials = self.assume_role_credentials(account_id, role_name).await?;

        self.backend
            .build_session(&SessionParams::from_credentials(&credentials, region))
            .await
            .with_context(|| format!("Failed to open session for account {account_id}"))
    }

    /// Temporary credentials for `role_name` in `account_id`
    pub async fn assume_role_credentials(
        &self,
        account_id: &str,
        role_name: Option<&str>,
    ) -> Result<Credentials> {
        validate_account_id(account_id)?;

        let role_name = role_name.unwrap_or(&self.config.default_role);
        let role_arn = sts::role_arn(account_id, role_name);
        let caller = self.sts_session().await?;

        info!("Assuming role {} in account {}", role_name, account_id);
        self.backend
            .assume_role(caller, &role_arn, &sts::role_session_name(account_id))
            .await
            .with_context(|| format!("Failed to assume {role_name} in account {account_id}"))
    }

    /// The operator's fixed-profile session, opened on first use
    pub async fn root_session(&self) -> Result<&Session> {
        self.root_session
            .get_or_try_init(|| async {
                let profile = self.config.root_session_profile();
                info!("Opening root session with profile {}", profile);

                self.backend
                    .build_session(&SessionParams::from_profile(
                        profile,
                        &self.config.default_region,
                    ))
                    .await
                    .with_context(|| format!("Failed to open root session for profile {profile}"))
            })
            .await
    }

    /// Session whose identity issues customer AssumeRole calls
    async fn sts_session(&self) -> Result<&Session> {
        self.sts_session
            .get_or_try_init(|| async {
                let root = self.root_session().await?;

                match self.config.platform {
                    Platform::Production => Ok(root.clone()),
                    Platform::TestLocal => {
                        let role_arn = sts::role_arn(
                            &self.config.operator_account_id,
                            &self.config.intermediary_role,
                        );
                        info!("Bootstrapping STS identity through {}", role_arn);

                        let credentials = self
                            .backend
                            .assume_role(
                                root,
                                &role_arn,
                                &sts::role_session_name(BOOTSTRAP_SESSION_LABEL),
                            )
                            .await
                            .context("Failed to assume intermediary role")?;

                        self.backend
                            .build_session(&SessionParams::from_credentials(
                                &credentials,
                                &self.config.default_region,
                            ))
                            .await
                            .context("Failed to open intermediary session")
                    }
                }
            })
            .await
    }
}
