pub mod format;
pub mod generate;
pub mod model;

pub use format::format_meal_plan;
pub use generate::{generate_plan, GENERATE_ENDPOINT};
pub use model::{PlanEnvelope, Preferences, TimeFrame};
