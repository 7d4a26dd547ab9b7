use crate::client::SpoonacularClient;
use crate::error::MealPlanError;
use crate::plan::format;
use crate::plan::model::{PlanEnvelope, Preferences};

/// Upstream path for plan generation.
pub const GENERATE_ENDPOINT: &str = "/mealplanner/generate";

/// Generate a meal plan for the given preferences.
///
/// One round trip: the preferences become the upstream query, the raw
/// response is rendered into the text report, and both are wrapped in the
/// response envelope together with the echoed preferences.
pub async fn generate_plan(
    client: &SpoonacularClient,
    prefs: &Preferences,
) -> Result<PlanEnvelope, MealPlanError> {
    let params = build_query(prefs);
    let meal_plan = client.get(GENERATE_ENDPOINT, &params).await?;
    let formatted_text = format::format_meal_plan(&meal_plan, prefs);

    Ok(PlanEnvelope {
        meal_plan,
        formatted_text,
        document: None,
        preferences: prefs.clone(),
    })
}

/// Build the upstream query in its fixed order.
///
/// Unset optional fields are omitted entirely; zero and empty-string values
/// count as unset. `family_size` and `event_date` are display-only and
/// never included.
fn build_query(prefs: &Preferences) -> Vec<(&'static str, String)> {
    let mut params = vec![("timeFrame", prefs.time_frame.to_string())];

    if let Some(calories) = prefs.target_calories.filter(|c| *c > 0) {
        params.push(("targetCalories", calories.to_string()));
    }
    if let Some(diet) = prefs.diet.as_deref().filter(|d| !d.is_empty()) {
        params.push(("diet", diet.to_string()));
    }
    if let Some(exclude) = prefs.exclude.as_deref().filter(|e| !e.is_empty()) {
        params.push(("exclude", exclude.to_string()));
    }

    params
}
