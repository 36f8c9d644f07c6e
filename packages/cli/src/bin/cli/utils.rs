// ABOUTME: Terminal helpers shared by the CLI commands
// ABOUTME: Table styling, text truncation and interactive choice prompts

use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};
use inquire::Select;
use roikit_calculator::ChoiceSource;
use roikit_catalog::Catalog;

pub fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header);
    table
}

pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

/// Ask the user to pick a catalog entry; returns its id
pub fn select_id(
    prompt: &str,
    catalog: &Catalog,
    source: ChoiceSource,
) -> anyhow::Result<String> {
    let options = roikit_cli::choice_options(catalog, source);
    if options.is_empty() {
        anyhow::bail!("The catalog has nothing to choose for {}", prompt);
    }

    let labels: Vec<String> = options
        .iter()
        .map(|(id, label)| format!("{} ({})", label, id))
        .collect();
    let picked = Select::new(prompt, labels.clone()).prompt()?;

    let index = labels
        .iter()
        .position(|label| *label == picked)
        .unwrap_or_default();
    Ok(options[index].0.clone())
}
