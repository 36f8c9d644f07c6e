use clap::{Parser, Subcommand};
use colored::*;
use std::process;

mod cli;

use cli::calc::{CostArgs, RoiArgs};
use cli::catalog::CatalogCommands;
use cli::prefs::PrefsCommands;
use roikit_config::Config;

#[derive(Parser)]
#[command(name = "roikit")]
#[command(about = "Roikit - estimate what AI tools save your business")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the task, tool, platform and calculator catalog
    #[command(subcommand)]
    Catalog(CatalogCommands),
    /// Compare human and AI cost for a task
    Cost(CostArgs),
    /// Estimate monthly and yearly savings from hours handed to AI
    Roi(RoiArgs),
    /// Manage favorites, ratings and notes
    #[command(subcommand)]
    Prefs(PrefsCommands),
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    roikit_cli::init_logging();

    let cli = Cli::parse();

    match handle_command(cli.command).await {
        Ok(_) => {}
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            process::exit(1);
        }
    }
}

async fn handle_command(command: Commands) -> anyhow::Result<()> {
    let config = Config::from_env()?;

    match command {
        Commands::Catalog(catalog_cmd) => cli::catalog::handle_catalog_command(catalog_cmd, &config),
        Commands::Cost(args) => cli::calc::handle_cost_command(args, &config).await,
        Commands::Roi(args) => cli::calc::handle_roi_command(args, &config).await,
        Commands::Prefs(prefs_cmd) => cli::prefs::handle_prefs_command(prefs_cmd, &config).await,
    }
}
