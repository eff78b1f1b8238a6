mod commands;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use missinglink_lib::{build_client, TypedClientSettings};

use crate::output::{describe_error, OutputFormat};

#[derive(Parser)]
#[command(name = "missinglink")]
#[command(about = "Browse cases served by a MissingLink API")]
struct Cli {
    /// Output format: table, json, csv or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// Settings file (YAML or JSON)
    #[arg(long, default_value = "appsettings.yaml", global = true)]
    config: PathBuf,

    /// Include diagnostic detail in error output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List a page of cases
    List(commands::list::ListArgs),
    /// Show a single case by id
    Get(commands::get::GetArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("missinglink=info".parse().unwrap()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", describe_error(&err, cli.verbose));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<()> {
    let format = OutputFormat::parse(&cli.output);

    let settings = TypedClientSettings::resolve(&cli.config)?;
    let client = build_client(&settings)?;

    match &cli.command {
        Commands::List(args) => commands::list::run(args, &client, &settings, &format).await?,
        Commands::Get(args) => commands::get::run(args, &client, &format).await?,
    }

    Ok(())
}
