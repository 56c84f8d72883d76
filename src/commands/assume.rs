use anyhow::{Context, Result};
use aws_smithy_types::date_time::Format;
use clap::{Args, ValueEnum};
use serde::Serialize;
use tracing::info;

use crate::{
    aws::{Credentials, SessionConnector, credentials},
    cli::GlobalOptions,
    config,
};

/// How assumed credentials are printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Shell `export` lines
    #[default]
    Env,
    /// `credential_process` JSON
    Json,
}

#[derive(Debug, Clone, Args)]
pub struct AssumeCommand {
    #[arg(short = 'a', long, help = "Target AWS account ID")]
    pub account_id: String,

    #[arg(short = 'r', long, help = "IAM role to assume (defaults to the configured role)")]
    pub role: Option<String>,

    #[arg(
        short = 's',
        long,
        help = "Save credentials to this profile instead of printing them"
    )]
    pub save_profile: Option<String>,

    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Env, help = "Output format")]
    pub format: OutputFormat,
}

/// `credential_process` output document
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct ProcessCredentials<'a> {
    version: u8,
    access_key_id: &'a str,
    secret_access_key: &'a str,
    session_token: &'a str,
    expiration: String,
}

impl AssumeCommand {
    pub async fn execute(self, options: &GlobalOptions) -> Result<()> {
        let connector = SessionConnector::new(config::load().await?);
        let region = options
            .region
            .clone()
            .unwrap_or_else(|| connector.config().default_region.clone());

        let creds = connector
            .assume_role_credentials(&self.account_id, self.role.as_deref())
            .await?;

        match self.save_profile {
            Some(profile) => {
                credentials::save_credentials(&profile, &creds)
                    .await
                    .context("Failed to save AWS credentials")?;
                let saved = credentials::load_credentials(&profile)
                    .await
                    .context("Failed to read back saved credentials")?;
                println!("AWS credentials saved to {profile} profile.");
                println!("Credentials will expire at: {}", format_expiration(&saved));
            }
            None => {
                info!("Printing credentials for account {}", self.account_id);
                println!("{}", render(&creds, &region, self.format)?);
            }
        }

        Ok(())
    }
}

fn format_expiration(creds: &Credentials) -> String {
    creds
        .expiration
        .fmt(Format::DateTime)
        .unwrap_or_else(|_| "unknown".to_string())
}

/// Render assumed credentials for stdout
fn render(creds: &Credentials, region: &str, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Env => Ok([
            format!("export AWS_ACCESS_KEY_ID={}", creds.access_key_id),
            format!("export AWS_SECRET_ACCESS_KEY={}", creds.secret_access_key),
            format!("export AWS_SESSION_TOKEN={}", creds.session_token),
            format!("export AWS_REGION={region}"),
        ]
        .join("\n")),
        OutputFormat::Json => {
            let document = ProcessCredentials {
                version: 1,
                access_key_id: &creds.access_key_id,
                secret_access_key: &creds.secret_access_key,
                session_token: &creds.session_token,
                expiration: format_expiration(creds),
            };
            serde_json::to_string_pretty(&document).context("Failed to serialize credentials")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_smithy_types::DateTime;

    fn sample() -> Credentials {
        Credentials {
            access_key_id: "ASIAEXAMPLE".to_string(),
            secret_access_key: "wJalr/K7MDENG+bPxRfi".to_string(),
            session_token: "FwoGZXIvYXdzEJr==".to_string(),
            expiration: DateTime::from_secs(1_700_000_000),
        }
    }

    #[test]
    fn test_render_env() {
        let output = render(&sample(), "ap-northeast-2", OutputFormat::Env).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines,
            vec![
                "export AWS_ACCESS_KEY_ID=ASIAEXAMPLE",
                "export AWS_SECRET_ACCESS_KEY=wJalr/K7MDENG+bPxRfi",
                "export AWS_SESSION_TOKEN=FwoGZXIvYXdzEJr==",
                "export AWS_REGION=ap-northeast-2",
            ]
        );
    }

    #[test]
    fn test_render_json_matches_credential_process_format() {
        let output = render(&sample(), "ap-northeast-2", OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["Version"], 1);
        assert_eq!(value["AccessKeyId"], "ASIAEXAMPLE");
        assert_eq!(value["SecretAccessKey"], "wJalr/K7MDENG+bPxRfi");
        assert_eq!(value["SessionToken"], "FwoGZXIvYXdzEJr==");
        assert_eq!(value["Expiration"], "2023-11-14T22:13:20Z");
    }
}
