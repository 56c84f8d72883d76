use anyhow::{Context, Result};
use aws_sdk_sts::Client as StsClient;
use tracing::{debug, info};

use super::{CallerIdentity, ConnectError, Credentials};
use crate::constants::ROLE_SESSION_NAME_PREFIX;

/// Build the ARN of `role_name` in `account_id`
pub fn role_arn(account_id: &str, role_name: &str) -> String {
    format!("arn:aws:iam::{account_id}:role/{role_name}")
}

/// Role session name recorded in CloudTrail for a hop into `account_id`
pub fn role_session_name(account_id: &str) -> String {
    format!("{ROLE_SESSION_NAME_PREFIX}-{account_id}")
}

/// Check that `account_id` is 12 ASCII digits
pub fn validate_account_id(account_id: &str) -> Result<(), ConnectError> {
    match account_id.len() == 12 && account_id.chars().all(|c| c.is_ascii_digit()) {
        true => Ok(()),
        false => Err(ConnectError::InvalidAccountId(account_id.to_string())),
    }
}

/// Assume role using the identity carried by `client`
pub async fn assume_role(
    client: &StsClient,
    role_arn: &str,
    session_name: &str,
) -> Result<Credentials> {
    info!("Calling AWS STS AssumeRole");
    debug!("Role ARN: {}", role_arn);
    debug!("Session name: {}", session_name);

    let response = client
        .assume_role()
        .role_arn(role_arn)
        .role_session_name(session_name)
        .send()
        .await
        .with_context(|| format!("Failed to assume role {role_arn}"))?;

    let sts_creds = response
        .credentials()
        .context("AWS STS returned no credentials")?;

    let credentials = Credentials {
        access_key_id: sts_creds.access_key_id().to_string(),
        secret_access_key: sts_creds.secret_access_key().to_string(),
        session_token: sts_creds.session_token().to_string(),
        expiration: *sts_creds.expiration(),
    };

    info!("Successfully obtained AWS credentials");
    Ok(credentials)
}

/// Fetch the identity behind `client` via STS GetCallerIdentity
pub async fn caller_identity(client: &StsClient) -> Result<CallerIdentity> {
    let identity = client
        .get_caller_identity()
        .send()
        .await
        .context("Failed to get AWS caller identity - check credentials")?;

    let account = identity
        .account()
        .context("No account ID returned from STS GetCallerIdentity")?;
    let arn = identity
        .arn()
        .context("No ARN returned from STS GetCallerIdentity")?;

    info!(account_id = %account, "AWS identity resolved");

    Ok(CallerIdentity {
        account: account.to_string(),
        arn: arn.to_string(),
        user_id: identity.user_id().unwrap_or_default().to_string(),
    })
}
