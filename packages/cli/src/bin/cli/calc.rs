// ABOUTME: Cost comparison and ROI commands
// ABOUTME: Fills missing form fields interactively, computes, prints and records usage

use clap::Args;
use colored::*;
use inquire::Text;
use roikit_calculator::display::format_currency;
use roikit_calculator::input::{FIELD_HOURLY_COST, FIELD_PLATFORM, FIELD_TASK, FIELD_TOOL, FIELD_VOLUME};
use roikit_calculator::{
    fields_for, CalcError, CalculationResult, Calculator, ChoiceSource, DisplayResult, FieldKind,
    FormInput, RoiForm, RoiResult, ROI_CALCULATOR_ID,
};
use roikit_catalog::Catalog;
use roikit_cli::LogLeadCapture;
use roikit_config::Config;
use roikit_preferences::{JsonFileStore, PreferenceManager};
use tracing::warn;

use super::utils::{new_table, select_id};

const DEFAULT_HOURS_PER_WEEK: &str = "10";
const DEFAULT_HOURLY_RATE: &str = "50";

#[derive(Args)]
pub struct CostArgs {
    /// Calculator variant (see `roikit catalog calculators`)
    #[arg(short, long, default_value = "cost-comparison")]
    calculator: String,
    /// Task id; prompts when omitted
    #[arg(short, long)]
    task: Option<String>,
    /// AI tool id; prompts when the calculator needs one
    #[arg(long)]
    tool: Option<String>,
    /// Platform id for e-commerce calculators
    #[arg(long)]
    platform: Option<String>,
    /// Units produced per month
    #[arg(long)]
    volume: Option<String>,
    /// Fully loaded human hourly cost
    #[arg(long)]
    rate: Option<String>,
    /// Override the calculator's oversight factor (0 to 1)
    #[arg(long)]
    oversight: Option<f64>,
    /// Email address to send the report to
    #[arg(long)]
    email: Option<String>,
    /// Print the raw result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
pub struct RoiArgs {
    /// ROI task category id; prompts when omitted
    #[arg(short, long)]
    task: Option<String>,
    /// Hours spent on the task each week
    #[arg(long)]
    hours: Option<String>,
    /// Hourly rate in dollars
    #[arg(long)]
    rate: Option<String>,
    /// Email address to send the report to
    #[arg(long)]
    email: Option<String>,
    /// Print the raw result as JSON
    #[arg(long)]
    json: bool,
}

pub async fn handle_cost_command(args: CostArgs, config: &Config) -> anyhow::Result<()> {
    let catalog = roikit_cli::load_catalog(config)?;
    let profile = catalog
        .find_calculator(&args.calculator)
        .ok_or_else(|| CalcError::UnknownCalculator(args.calculator.clone()))?;

    let mut form = FormInput {
        volume: args.volume,
        hourly_cost: args.rate,
        task: args.task,
        tool: args.tool,
        platform: args.platform,
    };

    for field in fields_for(profile) {
        let Some(slot) = form_slot(&mut form, field.name) else {
            continue;
        };
        if slot.as_deref().is_some_and(|v| !v.trim().is_empty()) {
            continue;
        }

        *slot = match field.kind {
            FieldKind::Choice { source } if field.required => {
                Some(select_id(field.label, &catalog, source)?)
            }
            FieldKind::Choice { .. } => None,
            FieldKind::Number { default } => Some(
                Text::new(field.label)
                    .with_default(&default.to_string())
                    .prompt()?,
            ),
        };
    }

    let input = form.parse()?;
    let calculator = Calculator::new(&catalog)
        .with_hook(LogLeadCapture)
        .with_oversight_override(args.oversight.or(config.oversight_factor));
    let result = calculator.calculate(&profile.id, &input, args.email.as_deref())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_cost_result(&profile.label, &catalog, &result);
    }

    record_usage(config, &profile.id).await;
    Ok(())
}

pub async fn handle_roi_command(args: RoiArgs, config: &Config) -> anyhow::Result<()> {
    let catalog = roikit_cli::load_catalog(config)?;

    let task = match args.task {
        Some(task) if !task.trim().is_empty() => task,
        _ => select_id("Task category", &catalog, ChoiceSource::RoiTasks)?,
    };
    let hours = match args.hours {
        Some(hours) => hours,
        None => Text::new("Hours per week")
            .with_default(DEFAULT_HOURS_PER_WEEK)
            .prompt()?,
    };
    let rate = match args.rate {
        Some(rate) => rate,
        None => Text::new("Hourly rate")
            .with_default(DEFAULT_HOURLY_RATE)
            .prompt()?,
    };

    let input = RoiForm {
        hours_per_week: Some(hours),
        hourly_rate: Some(rate),
        task: Some(task),
    }
    .parse()?;

    let calculator = Calculator::new(&catalog).with_hook(LogLeadCapture);
    let result = calculator.calculate_roi(&input, args.email.as_deref())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_roi_result(&catalog, &result);
    }

    record_usage(config, ROI_CALCULATOR_ID).await;
    Ok(())
}

fn form_slot<'f>(form: &'f mut FormInput, name: &str) -> Option<&'f mut Option<String>> {
    match name {
        FIELD_VOLUME => Some(&mut form.volume),
        FIELD_HOURLY_COST => Some(&mut form.hourly_cost),
        FIELD_TASK => Some(&mut form.task),
        FIELD_TOOL => Some(&mut form.tool),
        FIELD_PLATFORM => Some(&mut form.platform),
        _ => None,
    }
}

fn print_cost_result(title: &str, catalog: &Catalog, result: &CalculationResult) {
    let display = DisplayResult::from(result);
    let task_label = catalog
        .find_task(&result.task_id)
        .map(|t| t.label.as_str())
        .unwrap_or(&result.task_id);

    println!("{}", format!("{} - {}", title, task_label).blue().bold());
    println!();

    let mut table = new_table(vec!["", "Human", "AI"]);
    table.add_row(vec![
        "Hours per month",
        display.human_hours.as_str(),
        display.ai_hours.as_str(),
    ]);
    table.add_row(vec![
        "Cost per month",
        display.human_cost.as_str(),
        display.ai_cost.as_str(),
    ]);
    println!("{}", table);

    let savings = if result.savings_absolute >= 0.0 {
        display.savings.green().bold()
    } else {
        display.savings.red().bold()
    };
    println!("Monthly savings: {} ({})", savings, display.savings_percent);
    println!("Hours saved:     {}", display.hours_saved.cyan());
    println!("Payback period:  {}", display.payback.cyan());
    println!("Quality score:   {}", display.quality_score.cyan());
    println!(
        "{}",
        format!(
            "Includes {:.0}% human oversight of AI output",
            result.oversight_factor * 100.0
        )
        .dimmed()
    );
}

fn print_roi_result(catalog: &Catalog, result: &RoiResult) {
    let task_label = catalog
        .find_roi_task(&result.task_id)
        .map(|t| t.label.as_str())
        .unwrap_or(&result.task_id);

    println!("{}", format!("AI ROI - {}", task_label).blue().bold());
    println!();
    println!("Hours saved per week: {}", format!("{:.1}", result.hours_saved_per_week).cyan());
    println!("Weekly savings:       {}", format_currency(result.weekly_savings).cyan());
    println!("Monthly savings:      {}", format_currency(result.monthly_savings).green().bold());
    println!("Yearly savings:       {}", format_currency(result.yearly_savings).green().bold());
}

async fn record_usage(config: &Config, calculator_id: &str) {
    let mut preferences = PreferenceManager::open(JsonFileStore::new(&config.preferences_path)).await;
    if let Err(e) = preferences.mark_used(calculator_id).await {
        warn!("Could not record calculator use: {}", e);
    }
    preferences.increment_usage().await;
}
