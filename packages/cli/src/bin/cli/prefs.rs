// ABOUTME: Preference management commands
// ABOUTME: Favorites, ratings, custom notes and usage stored in the local preferences file

use clap::Subcommand;
use colored::*;
use roikit_config::Config;
use roikit_preferences::{JsonFileStore, PreferenceManager, PreferenceState, MAX_RATING, MIN_RATING};
use std::collections::BTreeSet;

use super::utils::{new_table, truncate};

#[derive(Subcommand)]
pub enum PrefsCommands {
    /// Show saved favorites, ratings and notes
    Show {
        /// Print the stored state as JSON
        #[arg(long)]
        json: bool,
    },
    /// Toggle an item as favorite
    Favorite {
        /// Item id (prompt, calculator, ...)
        id: String,
    },
    /// Rate an item from 1 to 5
    Rate {
        /// Item id
        id: String,
        /// Rating between 1 and 5
        rating: u8,
    },
    /// Save custom text for an item, or clear it
    Note {
        /// Item id
        id: String,
        /// Text to save
        text: Option<String>,
        /// Remove the saved text
        #[arg(long, conflicts_with = "text")]
        clear: bool,
    },
    /// Record that an item was used
    Use {
        /// Item id
        id: String,
    },
}

pub async fn handle_prefs_command(command: PrefsCommands, config: &Config) -> anyhow::Result<()> {
    let mut manager = PreferenceManager::open(JsonFileStore::new(&config.preferences_path)).await;

    match command {
        PrefsCommands::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(manager.state())?);
            } else {
                print_state(manager.state());
            }
        }
        PrefsCommands::Favorite { id } => {
            if manager.toggle_favorite(&id).await? {
                println!("{} Added {} to favorites", "★".yellow(), id.cyan());
            } else {
                println!("Removed {} from favorites", id.cyan());
            }
        }
        PrefsCommands::Rate { id, rating } => {
            manager.set_rating(&id, rating).await?;
            println!("Rated {} {}", id.cyan(), stars(rating).yellow());
        }
        PrefsCommands::Note { id, text, clear } => {
            if clear {
                if manager.clear_custom_text(&id).await? {
                    println!("Cleared note for {}", id.cyan());
                } else {
                    println!("{}", format!("No note saved for {}", id).yellow());
                }
            } else {
                let text = text.ok_or_else(|| anyhow::anyhow!("Provide note text or --clear"))?;
                manager.set_custom_text(&id, text).await?;
                println!("Saved note for {}", id.cyan());
            }
        }
        PrefsCommands::Use { id } => {
            manager.mark_used(&id).await?;
            let count = manager.increment_usage().await;
            println!("Recorded use of {} (total uses: {})", id.cyan(), count);
        }
    }

    if let Some(e) = manager.last_persistence_error() {
        eprintln!(
            "{} changes were not saved to {}: {}",
            "Warning:".yellow().bold(),
            config.preferences_path.display(),
            e
        );
    }

    Ok(())
}

fn print_state(state: &PreferenceState) {
    println!("{}", "Preferences".blue().bold());
    println!("Total uses: {}", state.usage_count.to_string().cyan());
    println!();

    let ids: BTreeSet<&String> = state
        .favorites
        .iter()
        .chain(state.ratings.keys())
        .chain(state.custom_texts.keys())
        .chain(state.last_used.keys())
        .collect();

    if ids.is_empty() {
        println!("{}", "No preferences saved yet".yellow());
        println!("{}", "Use 'roikit prefs favorite <id>' to save your first favorite".dimmed());
        return;
    }

    let mut table = new_table(vec!["ID", "Favorite", "Rating", "Last used", "Note"]);
    for id in ids {
        let record = state.record(id);
        table.add_row(vec![
            id.clone(),
            if record.favorited { "★".to_string() } else { "—".to_string() },
            record.rating.map(stars).unwrap_or_else(|| "—".to_string()),
            record
                .last_used_at
                .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "—".to_string()),
            record
                .custom_text
                .map(|text| truncate(&text, 30))
                .unwrap_or_else(|| "—".to_string()),
        ]);
    }
    println!("{}", table);
}

fn stars(rating: u8) -> String {
    let filled = rating.clamp(MIN_RATING, MAX_RATING) as usize;
    format!(
        "{}{}",
        "★".repeat(filled),
        "☆".repeat(MAX_RATING as usize - filled)
    )
}
