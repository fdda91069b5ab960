// ABOUTME: Command-line driver for the macrolens engine
// ABOUTME: Analyzes a meal photo, logs selections into a session ledger, prints suggestions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Macrolens Contributors

//! Macrolens CLI.
//!
//! One-shot driver around the analysis session: send an image to the
//! analysis backend, print the normalized candidates, optionally log the
//! best match into a meal slot and ask for a next-meal suggestion.
//!
//! Usage:
//! ```bash
//! # Analyze a photo against a local backend
//! cargo run --bin macrolens-cli -- analyze --image lunch.jpg
//!
//! # Analyze, log the best match as lunch, and get a dinner suggestion
//! cargo run --bin macrolens-cli -- analyze --image lunch.jpg \
//!     --log lunch --suggest dinner --diet vegetarian
//!
//! # Pure suggestion math for an empty ledger
//! cargo run --bin macrolens-cli -- suggest --slot breakfast
//!
//! # Query the local food table without any backend
//! cargo run --bin macrolens-cli -- lookup "3 tacos"
//! ```

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use macrolens::external::{AnalysisClient, AnalysisClientConfig};
use macrolens::food_db;
use macrolens::logging::{init_logging, LogFormat, LoggingConfig};
use macrolens::models::{Macros, MealSlot, NutritionRecord};
use macrolens::session::{AnalysisOutcome, AnalysisSession};
use macrolens::suggestion::{self, DietPreference, SuggestionResult, DEFAULT_DAILY_TARGET};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "macrolens-cli",
    about = "Photo-to-macros nutrition analysis",
    long_about = "Analyze a meal photo, log it into a per-session food ledger, and get macro-budget meal suggestions"
)]
struct Cli {
    /// Enable verbose logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze a meal photo through the analysis backend
    Analyze {
        /// Path to the image file
        #[arg(long)]
        image: PathBuf,

        /// Analysis backend base URL (overrides MACROLENS_API_URL)
        #[arg(long)]
        api_url: Option<String>,

        /// Log the best match into this meal slot after analysis
        #[arg(long, value_parser = parse_slot)]
        log: Option<MealSlot>,

        /// Print a suggestion for this slot after logging
        #[arg(long, value_parser = parse_slot)]
        suggest: Option<MealSlot>,

        /// Dietary preference for the suggestion
        #[arg(long, default_value = "none")]
        diet: String,
    },
    /// Compute a suggestion for a slot without analyzing anything
    Suggest {
        /// Meal slot to suggest for
        #[arg(long, value_parser = parse_slot)]
        slot: MealSlot,

        /// Dietary preference
        #[arg(long, default_value = "none")]
        diet: String,

        /// Calories already eaten today
        #[arg(long, default_value = "0")]
        eaten_calories: f64,

        /// Protein already eaten today (grams)
        #[arg(long, default_value = "0")]
        eaten_protein: f64,

        /// Carbs already eaten today (grams)
        #[arg(long, default_value = "0")]
        eaten_carbs: f64,

        /// Fat already eaten today (grams)
        #[arg(long, default_value = "0")]
        eaten_fat: f64,
    },
    /// Look up a food in the local per-100g table, no backend required
    Lookup {
        /// Food label, quantity prefixes allowed (e.g. "3 tacos")
        food: String,
    },
}

fn parse_slot(s: &str) -> Result<MealSlot, String> {
    MealSlot::from_str_lossy(s)
        .ok_or_else(|| format!("unknown meal slot '{s}' (breakfast, lunch, dinner, snacks)"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let logging = LoggingConfig {
        level: if cli.verbose { "debug".into() } else { "info".into() },
        format: LogFormat::Compact,
    };
    init_logging(&logging)?;

    match cli.command {
        Command::Analyze {
            image,
            api_url,
            log,
            suggest,
            diet,
        } => run_analyze(&image, api_url, log, suggest, &diet).await,
        Command::Suggest {
            slot,
            diet,
            eaten_calories,
            eaten_protein,
            eaten_carbs,
            eaten_fat,
        } => {
            let eaten = Macros::new(eaten_calories, eaten_protein, eaten_carbs, eaten_fat);
            let result = suggestion::suggest(
                eaten,
                DEFAULT_DAILY_TARGET,
                DietPreference::from_str_lossy(&diet),
                slot,
            );
            print_suggestion(&result);
            Ok(())
        }
        Command::Lookup { food } => {
            let macros = food_db::lookup(&food);
            println!("{}", food_db::macro_summary(&food, macros.as_ref()));
            Ok(())
        }
    }
}

async fn run_analyze(
    image: &Path,
    api_url: Option<String>,
    log: Option<MealSlot>,
    suggest: Option<MealSlot>,
    diet: &str,
) -> Result<()> {
    let bytes = tokio::fs::read(image)
        .await
        .with_context(|| format!("could not read image {}", image.display()))?;
    let filename = image
        .file_name()
        .map_or_else(|| "upload.jpg".to_owned(), |n| n.to_string_lossy().into_owned());

    let mut config = AnalysisClientConfig::from_env();
    if let Some(url) = api_url {
        config.base_url = url;
    }
    let client = AnalysisClient::new(config)?;

    let mut session = AnalysisSession::default();
    let token = session.begin_analysis()?;

    info!(image = %image.display(), "analyzing meal photo");
    let response = match client.analyze(bytes, filename).await {
        Ok(response) => response,
        Err(e) => {
            session.fail_analysis(token);
            return Err(e.into());
        }
    };

    match session.complete_analysis(token, response)? {
        AnalysisOutcome::NothingDetected => {
            println!("No food detected in the image.");
            return Ok(());
        }
        AnalysisOutcome::Stale => {
            // Single-request run; a stale outcome means a logic error here
            return Err(anyhow!("analysis response discarded as stale"));
        }
        AnalysisOutcome::Ready { candidate_count } => {
            println!("{candidate_count} candidate(s) identified:\n");
        }
    }

    for (i, record) in session.normalized_candidates().iter().enumerate() {
        let marker = if Some(i) == session.selected_index() { "*" } else { " " };
        println!("{marker} [{i}] {}", format_record(record));
    }

    for candidate in session.identification_candidates() {
        println!("    vision: {} ({:.1}%)", candidate.label, candidate.confidence);
    }

    if let Some(slot) = log {
        session.log_selected(slot)?;
        let totals = session.totals();
        println!(
            "\nLogged best match under {}. Daily totals: {:.0} kcal, {:.1}g protein, {:.1}g carbs, {:.1}g fat",
            slot.display_name(),
            totals.calories,
            totals.protein,
            totals.carbs,
            totals.fat
        );
    }

    if let Some(slot) = suggest {
        let result = session.suggest(slot, DietPreference::from_str_lossy(diet));
        println!();
        print_suggestion(&result);
    }

    Ok(())
}

fn format_record(record: &NutritionRecord) -> String {
    let mut line = format!(
        "{} - {:.0} kcal, {:.1}g protein, {:.1}g carbs, {:.1}g fat ({:?})",
        record.display_name,
        record.totals.calories,
        record.totals.protein,
        record.totals.carbs,
        record.totals.fat,
        record.source_kind
    );
    if !record.components.is_empty() {
        let names: Vec<&str> = record.components.iter().map(|c| c.name.as_str()).collect();
        line.push_str(&format!(" [{}]", names.join(", ")));
    }
    if let Some(summary) = &record.summary {
        line.push_str(&format!("\n      {}", summary.replace('\n', "\n      ")));
    }
    line
}

fn print_suggestion(result: &SuggestionResult) {
    let t = &result.target_macros;
    println!(
        "Suggestion for {}: aim for {:.0} kcal, {:.0}g protein, {:.0}g carbs, {:.0}g fat",
        result.meal_slot.display_name(),
        t.calories,
        t.protein,
        t.carbs,
        t.fat
    );
    println!("Example foods:");
    for food in &result.example_foods {
        println!("  - {food}");
    }
}
