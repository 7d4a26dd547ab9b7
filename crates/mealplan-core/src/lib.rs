pub mod client;
pub mod config;
pub mod error;
pub mod plan;

pub use client::SpoonacularClient;
pub use config::ApiConfig;
pub use error::MealPlanError;
