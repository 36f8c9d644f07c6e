// ABOUTME: Catalog browsing commands
// ABOUTME: Prints tasks, tools, platforms, ROI tasks and calculators as tables

use clap::Subcommand;
use colored::*;
use roikit_config::Config;

use super::utils::{new_table, truncate};

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// List task profiles with human and AI time per unit
    Tasks,
    /// List AI tools with their monthly cost
    Tools,
    /// List e-commerce platforms with their savings multiplier
    Platforms,
    /// List calculator variants
    Calculators,
    /// List task categories used by the ROI calculator
    RoiTasks,
}

pub fn handle_catalog_command(command: CatalogCommands, config: &Config) -> anyhow::Result<()> {
    let catalog = roikit_cli::load_catalog(config)?;

    let (title, table, count) = match command {
        CatalogCommands::Tasks => {
            let mut table = new_table(vec!["ID", "Task", "Unit", "Human h/unit", "AI h/unit", "Quality"]);
            for task in catalog.list_tasks() {
                table.add_row(vec![
                    task.id.clone(),
                    truncate(&task.label, 30),
                    task.unit.clone(),
                    format!("{:.2}", task.human_time_per_unit),
                    format!("{:.2}", task.ai_time_per_unit),
                    format!("{:.0}%", task.quality_ratio * 100.0),
                ]);
            }
            ("Tasks", table, catalog.list_tasks().len())
        }
        CatalogCommands::Tools => {
            let mut table = new_table(vec!["ID", "Tool", "Monthly cost"]);
            for tool in catalog.list_tools() {
                table.add_row(vec![
                    tool.id.clone(),
                    truncate(&tool.label, 30),
                    format!("${:.2}", tool.monthly_cost),
                ]);
            }
            ("AI Tools", table, catalog.list_tools().len())
        }
        CatalogCommands::Platforms => {
            let mut table = new_table(vec!["ID", "Platform", "Multiplier"]);
            for platform in catalog.list_platforms() {
                table.add_row(vec![
                    platform.id.clone(),
                    truncate(&platform.label, 30),
                    format!("{:.2}x", platform.bonus_multiplier),
                ]);
            }
            ("Platforms", table, catalog.list_platforms().len())
        }
        CatalogCommands::Calculators => {
            let mut table = new_table(vec!["ID", "Calculator", "Oversight", "Tool", "Platform"]);
            for calculator in catalog.list_calculators() {
                table.add_row(vec![
                    calculator.id.clone(),
                    truncate(&calculator.label, 30),
                    format!("{:.0}%", calculator.oversight_factor * 100.0),
                    required_marker(calculator.requires_tool).to_string(),
                    required_marker(calculator.uses_platform).to_string(),
                ]);
            }
            ("Calculators", table, catalog.list_calculators().len())
        }
        CatalogCommands::RoiTasks => {
            let mut table = new_table(vec!["ID", "Task category", "Time saved"]);
            for task in catalog.list_roi_tasks() {
                table.add_row(vec![
                    task.id.clone(),
                    truncate(&task.label, 30),
                    format!("{:.0}%", task.time_saved_ratio * 100.0),
                ]);
            }
            ("ROI Task Categories", table, catalog.list_roi_tasks().len())
        }
    };

    if count == 0 {
        println!("{}", format!("No {} in catalog {}", title.to_lowercase(), catalog.version()).yellow());
        return Ok(());
    }

    println!("{}", format!("{} (catalog {})", title, catalog.version()).blue().bold());
    println!();
    println!("{}", table);
    println!("Total: {}", count.to_string().cyan());

    Ok(())
}

fn required_marker(value: bool) -> &'static str {
    if value {
        "required"
    } else {
        "—"
    }
}
