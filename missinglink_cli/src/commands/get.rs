use anyhow::{bail, Result};
use clap::Args;
use missinglink_lib::validation::parse_case_id;
use missinglink_lib::Client;

use crate::output::{describe_failure, print_cases, OutputFormat};

#[derive(Args)]
pub struct GetArgs {
    /// Case id
    pub id: String,
}

pub async fn run(args: &GetArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let id = parse_case_id(&args.id)?;

    let env = client.get_case(id).await?;
    if env.has_errors() {
        tracing::error!("Fetching case {} failed with status {}", id, env.status());
        bail!(describe_failure(&env));
    }

    if let Some(case) = env.into_payload() {
        print_cases(std::slice::from_ref(&case), format)?;
    }

    Ok(())
}
