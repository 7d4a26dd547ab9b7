use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::MealPlanError;

// ---------------------------------------------------------------------------
// TimeFrame
// ---------------------------------------------------------------------------

/// Planning horizon accepted by the Spoonacular meal planner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeFrame {
    Day,
    #[default]
    Week,
}

impl fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TimeFrame::Day => "day",
            TimeFrame::Week => "week",
        };
        write!(f, "{s}")
    }
}

impl FromStr for TimeFrame {
    type Err = MealPlanError;

    /// Rejects anything outside `day`/`week` before a request is built.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(TimeFrame::Day),
            "week" => Ok(TimeFrame::Week),
            other => Err(MealPlanError::InvalidArgument(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Preferences
// ---------------------------------------------------------------------------

/// Caller-supplied parameters controlling plan generation and report display.
///
/// `family_size` and `event_date` are display-only and never forwarded
/// upstream. The time frame is always forwarded but is not part of the
/// echoed preferences object, so it is skipped during serialization.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(skip)]
    pub time_frame: TimeFrame,
    pub family_size: Option<u32>,
    pub target_calories: Option<u32>,
    pub diet: Option<String>,
    pub exclude: Option<String>,
    pub event_date: Option<String>,
}

// ---------------------------------------------------------------------------
// PlanEnvelope
// ---------------------------------------------------------------------------

/// The JSON object returned to the caller: the plan exactly as received
/// upstream, the rendered text report, a reserved document slot, and the
/// echoed preferences.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanEnvelope {
    pub meal_plan: Value,
    pub formatted_text: String,
    /// Reserved. No code path populates this; it serializes as `null`.
    pub document: Option<Value>,
    pub preferences: Preferences,
}
