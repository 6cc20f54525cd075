pub mod client;
pub mod config;
pub mod error;
pub mod kitchen;
pub mod model;
pub mod render;
pub mod scaling;
pub mod state;
pub mod units;

// Re-export commonly used types
pub use client::{HttpRecipeApi, RecipeApi};
pub use config::KitchenConfig;
pub use error::{ConversionError, KitchenError};
pub use kitchen::Kitchen;
pub use model::{Filter, Recipe, ReplacementSuggestion, Suggestion};
pub use state::{Completion, Mode, ViewState};

/// Build a [`Kitchen`] talking HTTP to the configured API
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ai_kitchen::KitchenConfig::load()?;
/// let mut kitchen = ai_kitchen::connect(&config)?;
/// kitchen.search("Pad Thai").await?;
/// if let Some(view) = kitchen.render() {
///     println!("{}", view);
/// }
/// # Ok(())
/// # }
/// ```
pub fn connect(config: &KitchenConfig) -> Result<Kitchen<HttpRecipeApi>, KitchenError> {
    let api = HttpRecipeApi::new(config)?;
    let state = ViewState::new(config.error_banner_duration());
    Ok(Kitchen::new(api, state, config.images.clone()))
}

