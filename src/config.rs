use crate::constants::{
    self, BOOTSTRAP_PROFILE_NAME, CONFIG_SECTION_NAME, DEFAULT_ASSUME_ROLE_NAME,
    DEFAULT_AWS_REGION, INTERMEDIARY_ROLE_NAME, OPERATOR_ACCOUNT_ID, ROOT_PROFILE_NAME,
    TEST_LOCAL_PLATFORM_ENV,
};
use anyhow::{Context, Result, bail};
use dialoguer::{Input, Select, theme::ColorfulTheme};
use ini::{Ini, Properties};
use std::{env, fmt, path::PathBuf, str::FromStr};
use tokio::fs;
use tracing::debug;

/// Where the connector bootstraps its STS identity from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Platform {
    /// The root profile already carries the STS caller identity
    #[default]
    Production,
    /// A bootstrap user first assumes the operator's intermediary role
    TestLocal,
}

impl Platform {
    const ALL: [Platform; 2] = [Platform::Production, Platform::TestLocal];

    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Production => "production",
            Platform::TestLocal => "test-local",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Platform::Production),
            "test-local" | "test" | "local" => Ok(Platform::TestLocal),
            other => bail!("Unknown platform '{other}' (expected 'production' or 'test-local')"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectorConfig {
    pub platform: Platform,
    pub operator_account_id: String,
    pub intermediary_role: String,
    pub default_role: String,
    pub default_region: String,
    pub root_profile: String,
    pub bootstrap_profile: String,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            platform: Platform::default(),
            operator_account_id: OPERATOR_ACCOUNT_ID.to_string(),
            intermediary_role: INTERMEDIARY_ROLE_NAME.to_string(),
            default_role: DEFAULT_ASSUME_ROLE_NAME.to_string(),
            default_region: DEFAULT_AWS_REGION.to_string(),
            root_profile: ROOT_PROFILE_NAME.to_string(),
            bootstrap_profile: BOOTSTRAP_PROFILE_NAME.to_string(),
        }
    }
}

impl ConnectorConfig {
    /// Profile the root session is opened with on the configured platform
    pub fn root_session_profile(&self) -> &str {
        match self.platform {
            Platform::Production => &self.root_profile,
            Platform::TestLocal => &self.bootstrap_profile,
        }
    }

    fn from_ini_section(section: &Properties) -> Self {
        let defaults = Self::default();
        let get = |key: &str, default: String| {
            section
                .get(key)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map_or(default, String::from)
        };

        Self {
            platform: section
                .get("nds_platform")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.platform),
            operator_account_id: get("nds_operator_account_id", defaults.operator_account_id),
            intermediary_role: get("nds_intermediary_role", defaults.intermediary_role),
            default_role: get("nds_default_role", defaults.default_role),
            default_region: get("nds_default_region", defaults.default_region),
            root_profile: get("nds_root_profile", defaults.root_profile),
            bootstrap_profile: get("nds_bootstrap_profile", defaults.bootstrap_profile),
        }
    }

    fn save_to_ini(&self, ini: &mut Ini) {
        ini.with_section(Some(section_name()))
            .set("nds_platform", self.platform.as_str())
            .set("nds_operator_account_id", &self.operator_account_id)
            .set("nds_intermediary_role", &self.intermediary_role)
            .set("nds_default_role", &self.default_role)
            .set("nds_default_region", &self.default_region)
            .set("nds_root_profile", &self.root_profile)
            .set("nds_bootstrap_profile", &self.bootstrap_profile);
    }

    /// Let the environment force the test-local platform
    fn apply_env_override(mut self) -> Self {
        if let Ok(value) = env::var(TEST_LOCAL_PLATFORM_ENV) {
            match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => self.platform = Platform::TestLocal,
                "0" | "false" | "no" => self.platform = Platform::Production,
                _ => {}
            }
        }
        self
    }
}

/// Load the connector configuration, falling back to built-in defaults
pub async fn load() -> Result<ConnectorConfig> {
    let path = get_config_path()?;

    let config = match fs::try_exists(&path).await.unwrap_or(false) {
        true => {
            let ini = Ini::load_from_file(&path)
                .with_context(|| format!("Failed to load config file {}", path.display()))?;
            ini.section(Some(section_name()))
                .map(ConnectorConfig::from_ini_section)
                .unwrap_or_default()
        }
        false => {
            debug!("No AWS config file at {}, using defaults", path.display());
            ConnectorConfig::default()
        }
    };

    Ok(config.apply_env_override())
}

pub async fn save(config: &ConnectorConfig) -> Result<()> {
    let path = get_config_path()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let mut ini = match fs::try_exists(&path).await.unwrap_or(false) {
        true => Ini::load_from_file(&path)
            .with_context(|| format!("Failed to load config file {}", path.display()))?,
        false => Ini::new(),
    };

    config.save_to_ini(&mut ini);

    ini.write_to_file(&path)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;

    Ok(())
}

pub async fn configure_interactive() -> Result<()> {
    println!("Configuring nds-connect");

    let existing = load().await?;
    println!("Press Enter to keep current values, or type new values.");
    println!();

    let theme = ColorfulTheme::default();

    let platform_index = Select::with_theme(&theme)
        .with_prompt("Platform")
        .items(&Platform::ALL.map(Platform::as_str))
        .default(
            Platform::ALL
                .iter()
                .position(|p| *p == existing.platform)
                .unwrap_or(0),
        )
        .interact()
        .context("Failed to read platform")?;
    let platform = Platform::ALL[platform_index];

    let default_region = Input::<String>::with_theme(&theme)
        .with_prompt("Default region")
        .default(existing.default_region)
        .interact_text()
        .context("Failed to read default region")?;

    let default_role = Input::<String>::with_theme(&theme)
        .with_prompt("Role assumed in customer accounts")
        .default(existing.default_role)
        .interact_text()
        .context("Failed to read default role")?;

    let root_profile = Input::<String>::with_theme(&theme)
        .with_prompt("Root profile (production)")
        .default(existing.root_profile)
        .interact_text()
        .context("Failed to read root profile")?;

    let bootstrap_profile = Input::<String>::with_theme(&theme)
        .with_prompt("Bootstrap profile (test-local)")
        .default(existing.bootstrap_profile)
        .interact_text()
        .context("Failed to read bootstrap profile")?;

    let operator_account_id = Input::<String>::with_theme(&theme)
        .with_prompt("Operator account ID")
        .default(existing.operator_account_id)
        .validate_with(|input: &String| {
            crate::aws::sts::validate_account_id(input).map_err(|e| e.to_string())
        })
        .interact_text()
        .context("Failed to read operator account ID")?;

    let intermediary_role = Input::<String>::with_theme(&theme)
        .with_prompt("Intermediary role (test-local)")
        .default(existing.intermediary_role)
        .interact_text()
        .context("Failed to read intermediary role")?;

    let config = ConnectorConfig {
        platform,
        operator_account_id,
        intermediary_role,
        default_role,
        default_region,
        root_profile,
        bootstrap_profile,
    };

    save(&config).await?;

    println!("\nConfiguration saved successfully.");
    Ok(())
}

fn section_name() -> String {
    format!("profile {CONFIG_SECTION_NAME}")
}

fn get_config_path() -> Result<PathBuf> {
    constants::get_aws_config_path().context("Failed to determine AWS config path")
}
