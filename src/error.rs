use thiserror::Error;

/// Errors that can occur while talking to the recipe API or driving the view
#[derive(Error, Debug)]
pub enum KitchenError {
    /// The search box (or another required field) was empty
    #[error("{0}")]
    EmptyInput(String),

    /// Failed to reach the API or read its response
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("{detail}")]
    Server { status: u16, detail: String },

    /// The API answered with a body that does not match the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// An action needs a recipe but none is shown
    #[error("No recipe is currently shown")]
    NoRecipe,

    /// The configured base URL cannot be used
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

/// Errors reported inline by the unit converter
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    /// Negative, non-finite or non-numeric input value
    #[error("Please enter a valid positive number")]
    InvalidInput,

    /// Unit name not present in the unit table
    #[error("Unknown unit: {0}")]
    UnknownUnit(String),

    /// Source and target belong to different dimensions
    #[error("Cannot convert between {from} and {to}")]
    IncompatibleDimensions { from: String, to: String },
}
