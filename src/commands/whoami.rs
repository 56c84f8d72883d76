use anyhow::Result;
use clap::Args;

use crate::{
    aws::{CallerIdentity, ConnectSpec, SessionConnector},
    cli::GlobalOptions,
    config,
};

#[derive(Debug, Clone, Default, Args)]
pub struct WhoamiCommand {
    #[arg(short = 'a', long, help = "Check the identity inside this customer account")]
    pub account_id: Option<String>,

    #[arg(
        short = 'r',
        long,
        requires = "account_id",
        help = "IAM role to assume in the customer account"
    )]
    pub role: Option<String>,
}

impl WhoamiCommand {
    pub async fn execute(self, options: &GlobalOptions) -> Result<()> {
        let config = config::load().await?;

        let spec = match self.account_id {
            Some(account_id) => ConnectSpec::AssumeRole {
                account_id,
                role_name: self.role,
                region: options.region.clone(),
            },
            None => options.connect_spec(&config.default_region),
        };

        let connector = SessionConnector::new(config);
        let session = connector.connect(spec).await?;
        let identity = session.caller_identity().await?;

        println!("{}", render_identity(&identity, session.region()));
        Ok(())
    }
}

fn render_identity(identity: &CallerIdentity, region: Option<&str>) -> String {
    format!(
        "Account: {}\nArn:     {}\nUserId:  {}\nRegion:  {}",
        identity.account,
        identity.arn,
        identity.user_id,
        region.unwrap_or("(none)")
    )
}
