use std::str::FromStr;

use clap::Parser;

use mealplan_core::plan::{generate_plan, Preferences, TimeFrame};
use mealplan_core::{ApiConfig, MealPlanError, SpoonacularClient};

/// Generate a meal plan from the Spoonacular API and print the response
/// envelope as one JSON document on stdout.
#[derive(Parser, Debug)]
#[command(name = "mealplan-cli", version, about = "Meal plan generator CLI")]
struct Cli {
    /// Planning horizon: a single day or a full week.
    #[arg(long, default_value = "week", value_parser = parse_time_frame)]
    time_frame: TimeFrame,

    /// Target daily calories.
    #[arg(long)]
    target_calories: Option<u32>,

    /// Diet preference forwarded to Spoonacular (e.g. "vegetarian").
    #[arg(long)]
    diet: Option<String>,

    /// Comma-separated ingredients or allergens to exclude.
    #[arg(long)]
    exclude: Option<String>,

    /// Number of people to plan for (shown in the report, never sent upstream).
    #[arg(long)]
    family_size: Option<u32>,

    /// ISO-8601 date of the associated event (shown in the report).
    #[arg(long)]
    event_date: Option<String>,
}

fn parse_time_frame(raw: &str) -> Result<TimeFrame, MealPlanError> {
    TimeFrame::from_str(raw)
}

impl Cli {
    fn into_preferences(self) -> Preferences {
        Preferences {
            time_frame: self.time_frame,
            family_size: self.family_size,
            target_calories: self.target_calories,
            diet: self.diet,
            exclude: self.exclude,
            event_date: self.event_date,
        }
    }
}

async fn run(cli: Cli) -> Result<(), MealPlanError> {
    let client = SpoonacularClient::new(ApiConfig::from_env())?;
    let envelope = generate_plan(&client, &cli.into_preferences()).await?;
    println!("{}", serde_json::to_string(&envelope)?);
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_frame_defaults_to_week() {
        let cli = Cli::try_parse_from(["mealplan-cli"]).unwrap();
        assert_eq!(cli.time_frame, TimeFrame::Week);
        assert!(cli.target_calories.is_none());
    }

    #[test]
    fn all_flags_parse() {
        let cli = Cli::try_parse_from([
            "mealplan-cli",
            "--time-frame",
            "day",
            "--target-calories",
            "2000",
            "--diet",
            "vegetarian",
            "--exclude",
            "peanuts,shellfish",
            "--family-size",
            "4",
            "--event-date",
            "2025-08-01",
        ])
        .unwrap();

        assert_eq!(cli.time_frame, TimeFrame::Day);
        assert_eq!(cli.target_calories, Some(2000));
        assert_eq!(cli.diet.as_deref(), Some("vegetarian"));
        assert_eq!(cli.exclude.as_deref(), Some("peanuts,shellfish"));
        assert_eq!(cli.family_size, Some(4));
        assert_eq!(cli.event_date.as_deref(), Some("2025-08-01"));
    }

    #[test]
    fn unknown_time_frame_is_rejected() {
        let err = Cli::try_parse_from(["mealplan-cli", "--time-frame", "month"]).unwrap_err();
        assert!(err.to_string().contains("month"));
    }

    #[test]
    fn preferences_carry_the_parsed_flags() {
        let cli = Cli::try_parse_from(["mealplan-cli", "--family-size", "4"]).unwrap();
        let prefs = cli.into_preferences();
        assert_eq!(prefs.time_frame, TimeFrame::Week);
        assert_eq!(prefs.family_size, Some(4));
        assert!(prefs.diet.is_none());
    }
}
