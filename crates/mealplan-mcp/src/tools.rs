use serde_json::Value;

use mealplan_core::plan::{generate_plan, Preferences, TimeFrame};
use mealplan_core::SpoonacularClient;

use crate::protocol::{ContentBlock, ToolCallResult, ToolDefinition};

// ---------------------------------------------------------------------------
// State passed into every tool handler
// ---------------------------------------------------------------------------

pub struct ToolState {
    pub client: SpoonacularClient,
}

// ---------------------------------------------------------------------------
// Tool definitions (advertised via tools/list)
// ---------------------------------------------------------------------------

pub fn all_tool_definitions() -> Vec<ToolDefinition> {
    vec![generate_meal_plan_def()]
}

fn generate_meal_plan_def() -> ToolDefinition {
    ToolDefinition {
        name: "generate_meal_plan".to_string(),
        description: "Generate a meal plan via the Spoonacular API. Returns a JSON envelope containing the raw plan, a formatted text summary, and the echoed preferences.".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "time_frame": {
                    "type": "string",
                    "description": "Planning horizon: 'day' or 'week' (default: week)",
                    "enum": ["day", "week"]
                },
                "target_calories": {
                    "type": "integer",
                    "description": "Target daily calories",
                    "minimum": 1
                },
                "diet": {
                    "type": "string",
                    "description": "Diet preference understood by Spoonacular (e.g. 'vegetarian')"
                },
                "exclude": {
                    "type": "string",
                    "description": "Comma-separated ingredients or allergens to exclude"
                },
                "family_size": {
                    "type": "integer",
                    "description": "Number of people to plan for (informational only, not sent upstream)",
                    "minimum": 1
                },
                "event_date": {
                    "type": "string",
                    "description": "ISO-8601 date of the associated event (display only)"
                }
            }
        }),
    }
}

// ---------------------------------------------------------------------------
// Tool dispatch
// ---------------------------------------------------------------------------

pub async fn dispatch_tool(name: &str, args: Value, state: &ToolState) -> ToolCallResult {
    match name {
        "generate_meal_plan" => handle_generate_meal_plan(args, state).await,
        unknown => tool_error(format!("Unknown tool: {unknown}")),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn tool_ok(text: String) -> ToolCallResult {
    ToolCallResult {
        content: vec![ContentBlock::Text { text }],
        is_error: None,
    }
}

fn tool_error(message: String) -> ToolCallResult {
    ToolCallResult {
        content: vec![ContentBlock::Text { text: message }],
        is_error: Some(true),
    }
}

fn opt_str(args: &Value, key: &str) -> Option<String> {
    args.get(key).and_then(Value::as_str).map(str::to_string)
}

fn opt_u32(args: &Value, key: &str) -> Option<u32> {
    args.get(key).and_then(Value::as_u64).map(|v| v as u32)
}

// ---------------------------------------------------------------------------
// generate_meal_plan handler
// ---------------------------------------------------------------------------

async fn handle_generate_meal_plan(args: Value, state: &ToolState) -> ToolCallResult {
    // Time-frame validation happens before anything touches the network.
    let time_frame = match args.get("time_frame").and_then(Value::as_str) {
        Some(raw) => match raw.parse::<TimeFrame>() {
            Ok(tf) => tf,
            Err(e) => return tool_error(e.to_string()),
        },
        None => TimeFrame::default(),
    };

    let prefs = Preferences {
        time_frame,
        family_size: opt_u32(&args, "family_size"),
        target_calories: opt_u32(&args, "target_calories"),
        diet: opt_str(&args, "diet"),
        exclude: opt_str(&args, "exclude"),
        event_date: opt_str(&args, "event_date"),
    };

    match generate_plan(&state.client, &prefs).await {
        Ok(envelope) => match serde_json::to_string(&envelope) {
            Ok(json) => tool_ok(json),
            Err(e) => tool_error(format!("Serialization error: {e}")),
        },
        Err(e) => tool_error(e.to_string()),
    }
}
