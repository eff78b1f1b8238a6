use anyhow::{bail, Result};
use clap::Args;
use missinglink_lib::validation::parse_sort;
use missinglink_lib::{Client, PagingSortSpec, TypedClientSettings};

use crate::output::{describe_failure, pagination_summary, print_cases, OutputFormat};

#[derive(Args)]
pub struct ListArgs {
    /// Page number (1-based)
    #[arg(long, default_value = "1")]
    pub page: i64,

    /// Results per page, clamped to the configured maximum
    #[arg(long, default_value = "20")]
    pub page_size: i64,

    /// Sort criterion, repeatable: Field, Field:asc or Field:desc
    #[arg(long = "sort", default_value = "InstructionDate:desc")]
    pub sort: Vec<String>,
}

pub async fn run(
    args: &ListArgs,
    client: &Client,
    settings: &TypedClientSettings,
    format: &OutputFormat,
) -> Result<()> {
    let mut query = PagingSortSpec::with_limits(settings.page_limits())
        .with_page(args.page)
        .with_page_size(args.page_size);
    for raw in &args.sort {
        let (field, direction) = parse_sort(raw)?;
        query.add_sort(&field, direction);
    }

    let env = client.list_cases(&query).await?;
    if env.has_errors() {
        tracing::error!("Listing cases failed with status {}", env.status());
        bail!(describe_failure(&env));
    }

    if let Some(summary) = pagination_summary(env.metadata()) {
        eprintln!("{}", summary);
    }

    let cases = env.into_payload().unwrap_or_default();
    print_cases(&cases, format)?;

    Ok(())
}
