use anyhow::{Context, Result};
use aws_smithy_types::{DateTime, date_time::Format};
use ini::Ini;
use tokio::fs;

use super::Credentials;
use crate::constants::get_aws_credentials_path;

/// Save credentials to AWS credentials file
pub async fn save_credentials(profile: &str, creds: &Credentials) -> Result<()> {
    let path = get_aws_credentials_path().context("Failed to determine AWS credentials path")?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    // An unreadable file is an error, never a blank slate to overwrite
    let mut ini = match fs::try_exists(&path).await.unwrap_or(false) {
        true => Ini::load_from_file(&path)
            .with_context(|| format!("Failed to read credentials file {}", path.display()))?,
        false => Ini::new(),
    };

    let expiration = creds
        .expiration
        .fmt(Format::DateTime)
        .unwrap_or_else(|_| "unknown".to_string());

    ini.with_section(Some(profile))
        .set("aws_access_key_id", &creds.access_key_id)
        .set("aws_secret_access_key", &creds.secret_access_key)
        .set("aws_session_token", &creds.session_token)
        .set("aws_session_expiration", &expiration);

    ini.write_to_file(&path)
        .context("Failed to write credentials file")?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let metadata = fs::metadata(&path).await?;
        let mut permissions = metadata.permissions();
        permissions.set_mode(0o600);
        fs::set_permissions(&path, permissions).await?;
    }

    tracing::info!("Credentials saved to profile: {}", profile);
    Ok(())
}

/// Load credentials from AWS credentials file
pub async fn load_credentials(profile: &str) -> Result<Credentials> {
    let path = get_aws_credentials_path().context("Failed to determine AWS credentials path")?;

    let ini = match path.exists() {
        true => Ini::load_from_file(&path).context("Failed to read AWS credentials file")?,
        false => anyhow::bail!("AWS credentials file not found at {}", path.display()),
    };

    let section = ini
        .section(Some(profile))
        .with_context(|| format!("Profile '{profile}' not found in credentials file"))?;

    let field = |key: &str| {
        section
            .get(key)
            .map(str::to_string)
            .with_context(|| format!("{key} not found"))
    };

    let access_key_id = field("aws_access_key_id")?;
    let secret_access_key = field("aws_secret_access_key")?;
    let session_token = field("aws_session_token")?;
    let expiration_str = field("aws_session_expiration")?;

    let expiration = DateTime::from_str(&expiration_str, Format::DateTime)
        .or_else(|_| DateTime::from_str(&expiration_str, Format::DateTimeWithOffset))
        .context("Failed to parse session expiration time")?;

    Ok(Credentials {
        access_key_id,
        secret_access_key,
        session_token,
        expiration,
    })
}
