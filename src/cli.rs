use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use crate::aws::ConnectSpec;
use crate::commands::{AssumeCommand, CompletionsCommand, ConfigureCommand, WhoamiCommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "nds-connect", version, about = "Open AWS sessions and assume roles in customer accounts", long_about = None)]
pub struct Cli {
    #[arg(short = 'p', long, global = true, help = "AWS profile name")]
    pub profile: Option<String>,

    #[arg(long, global = true, help = "AWS region to pin the session to")]
    pub region: Option<String>,

    #[arg(short = 'v', long, global = true, action = ArgAction::Count, help = "Increase verbosity (-v info, -vv debug, -vvv trace)")]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    #[command(about = "Assume a role in a customer account and print or save the credentials")]
    Assume(AssumeCommand),
    #[command(about = "Show the identity a session authenticates as")]
    Whoami(WhoamiCommand),
    #[command(about = "Configure platform, profiles and default role")]
    Configure(ConfigureCommand),
    #[command(about = "Generate shell completion scripts for nds-connect")]
    Completions(CompletionsCommand),
}

/// Options shared by every subcommand
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalOptions {
    pub profile: Option<String>,
    pub region: Option<String>,
}

impl GlobalOptions {
    /// Credential description implied by `--profile` and `--region`
    pub fn connect_spec(&self, default_region: &str) -> ConnectSpec {
        match (&self.profile, &self.region) {
            (None, None) => ConnectSpec::Default,
            (None, Some(region)) => ConnectSpec::Region {
                region: region.clone(),
            },
            (Some(profile), region) => ConnectSpec::Profile {
                region: region.clone().unwrap_or_else(|| default_region.to_string()),
                profile: profile.clone(),
            },
        }
    }
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let options = GlobalOptions {
            profile: self.profile,
            region: self.region,
        };
        let command = self
            .command
            .unwrap_or(Commands::Whoami(WhoamiCommand::default()));

        match command {
            Commands::Assume(cmd) => cmd.execute(&options).await,
            Commands::Whoami(cmd) => cmd.execute(&options).await,
            Commands::Configure(cmd) => cmd.execute().await,
            Commands::Completions(cmd) => {
                cmd.execute();
                Ok(())
            }
        }
    }
}
