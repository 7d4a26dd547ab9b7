use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Map, Value};

use crate::plan::model::Preferences;

/// Recipe pages live at this URL followed by the numeric recipe id.
const RECIPE_URL_BASE: &str = "https://spoonacular.com/recipes/-";

/// Long-form display date, e.g. `Friday, March 14 2025`.
const DATE_FORMAT: &str = "%A, %B %d %Y";

const RULE_WIDTH: usize = 50;
const HEADER_WIDTH: usize = 30;

/// Render the raw meal plan and preferences into the text report.
///
/// Pure transform with no failure path: missing or unrecognized fields
/// silently drop their lines or fall back to placeholder text.
///
/// Layout, in order: title and generation date, the preference lines that
/// are set, a `=` rule, meals grouped by day, then the nutrition summary
/// and grocery list when the plan carries them.
pub fn format_meal_plan(plan: &Value, prefs: &Preferences) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push("WEEKLY MEAL PLAN".to_string());
    lines.push(format!(
        "Generated: {}\n",
        display_date(prefs.event_date.as_deref())
    ));

    if let Some(size) = prefs.family_size.filter(|n| *n > 0) {
        lines.push(format!("Family Size: {size}"));
    }
    if let Some(diet) = prefs.diet.as_deref().filter(|s| !s.is_empty()) {
        lines.push(format!("Dietary Preference: {diet}"));
    }
    if let Some(exclude) = prefs.exclude.as_deref().filter(|s| !s.is_empty()) {
        lines.push(format!("Exclusions: {exclude}"));
    }
    if let Some(calories) = prefs.target_calories.filter(|n| *n > 0) {
        lines.push(format!("Daily Calorie Target: {calories}"));
    }
    lines.push(format!("\n{}\n", "=".repeat(RULE_WIDTH)));

    if let Some(meals) = plan.get("meals").and_then(Value::as_array) {
        // Group by stringified day label; BTreeMap gives the ascending
        // label order, pushes keep the original order within a day.
        let mut grouped: BTreeMap<String, Vec<&Value>> = BTreeMap::new();
        for meal in meals {
            grouped.entry(day_label(meal)).or_default().push(meal);
        }

        for (day, day_meals) in &grouped {
            lines.push(format!("DAY {day}"));
            lines.push("-".repeat(HEADER_WIDTH));
            for meal in day_meals {
                let title = meal
                    .get("title")
                    .and_then(Value::as_str)
                    .unwrap_or("Untitled Meal");
                lines.push(format!("🍽️ {title}"));

                if let Some(minutes) = positive_u64(meal, "readyInMinutes") {
                    lines.push(format!("   Ready in: {minutes} minutes"));
                }
                if let Some(servings) = positive_u64(meal, "servings") {
                    lines.push(format!("   Servings: {servings}"));
                }
                if let Some(id) = positive_u64(meal, "id") {
                    lines.push(format!("   Recipe URL: {RECIPE_URL_BASE}{id}"));
                }
                lines.push(String::new());
            }
            lines.push(String::new());
        }
    }

    if let Some(nutrients) = plan
        .get("nutrients")
        .and_then(Value::as_object)
        .filter(|m| !m.is_empty())
    {
        lines.push("=".repeat(RULE_WIDTH));
        lines.push("NUTRITION SUMMARY".to_string());
        lines.push("-".repeat(HEADER_WIDTH));
        lines.push(format!("Calories: {}", scalar_or_na(nutrients, "calories")));
        lines.push(format!("Protein: {}g", scalar_or_na(nutrients, "protein")));
        lines.push(format!("Fat: {}g", scalar_or_na(nutrients, "fat")));
        lines.push(format!(
            "Carbohydrates: {}g",
            scalar_or_na(nutrients, "carbohydrates")
        ));
    }

    if let Some(items) = plan
        .get("items")
        .and_then(Value::as_array)
        .filter(|a| !a.is_empty())
    {
        lines.push(format!("\n{}", "=".repeat(RULE_WIDTH)));
        lines.push("GROCERY LIST".to_string());
        lines.push("-".repeat(HEADER_WIDTH));
        for item in items {
            let name = item
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or("Unnamed Item");
            match item.get("aisle").and_then(Value::as_str).filter(|a| !a.is_empty()) {
                Some(aisle) => lines.push(format!("☑ {name} ({aisle})")),
                None => lines.push(format!("☑ {name}")),
            }
        }
    }

    lines.join("\n").trim().to_string()
}

/// The generation-date line: a parsed event date rendered long-form, the
/// raw string verbatim when it does not parse, the current UTC date when
/// no event date was supplied.
fn display_date(event_date: Option<&str>) -> String {
    match event_date {
        Some(raw) => parse_iso_date(raw).unwrap_or_else(|| raw.to_string()),
        None => Utc::now().format(DATE_FORMAT).to_string(),
    }
}

/// Accepts RFC 3339 (trailing `Z` included), naive datetimes, and bare dates.
fn parse_iso_date(raw: &str) -> Option<String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.format(DATE_FORMAT).to_string());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.format(DATE_FORMAT).to_string());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.format(DATE_FORMAT).to_string());
    }
    None
}

/// Day labels are compared as strings; anything unrecognized is "Unknown".
fn day_label(meal: &Value) -> String {
    match meal.get("day") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => "Unknown".to_string(),
    }
}

/// A numeric field treated as unset when missing or zero.
fn positive_u64(value: &Value, key: &str) -> Option<u64> {
    value.get(key).and_then(Value::as_u64).filter(|n| *n > 0)
}

/// A nutrient value rendered from the JSON scalar, `N/A` otherwise.
fn scalar_or_na(map: &Map<String, Value>, key: &str) -> String {
    match map.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => "N/A".to_string(),
    }
}
