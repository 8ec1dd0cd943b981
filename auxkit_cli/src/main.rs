mod commands;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use auxkit_lib::Config;
use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "auxkit")]
#[command(about = "Drain paginated APIs, rewrite JSON values, and inspect enum tables")]
struct Cli {
    /// Output format: table, json, csv, markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// Path to a TOML config file (AUXKIT_* environment variables override it)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch every page of a collection endpoint
    Pages(Box<commands::pages::PagesArgs>),
    /// Replace selected values in a JSON object
    Resolve(commands::resolve::ResolveArgs),
    /// Derive value, reverse, and label tables from an enum definition
    Enums(commands::enums::EnumsArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("auxkit=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = OutputFormat::parse(&cli.output)?;
    let config = Config::load(cli.config.as_deref())?;

    match &cli.command {
        Commands::Pages(args) => commands::pages::run(args.as_ref(), &config, &format).await?,
        Commands::Resolve(args) => commands::resolve::run(args, &format)?,
        Commands::Enums(args) => commands::enums::run(args, &format)?,
    }

    Ok(())
}
