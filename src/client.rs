use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::KitchenConfig;
use crate::error::KitchenError;
use crate::model::{
    DishRequest, Filter, ImageResponse, IngredientSearchRequest, IngredientSearchResponse,
    IngredientsRequest, Recipe, ReplacementRequest, ReplacementSuggestion, Suggestion,
    SuggestionsResponse,
};

/// Operations offered by the recipe API
#[async_trait]
pub trait RecipeApi: Send + Sync {
    /// Popular dishes for the start screen
    async fn suggestions(&self) -> Result<Vec<Suggestion>, KitchenError>;

    /// Recipes that can be made from a comma-separated ingredient list
    async fn search_by_ingredients(
        &self,
        ingredients: &str,
    ) -> Result<IngredientSearchResponse, KitchenError>;

    /// Full recipe for a dish name
    async fn generate_recipe(&self, dish_name: &str) -> Result<Recipe, KitchenError>;

    /// Full recipe built from an ingredient list, shaped by a filter
    async fn generate_recipe_from_ingredients(
        &self,
        ingredients: &str,
        filter: Filter,
    ) -> Result<Recipe, KitchenError>;

    /// Substitutes for one ingredient in the context of a recipe
    async fn suggest_replacement(
        &self,
        ingredient: &str,
        recipe_name: &str,
    ) -> Result<ReplacementSuggestion, KitchenError>;

    /// Image URL for a dish
    async fn dish_image(&self, dish_name: &str) -> Result<String, KitchenError>;
}

/// `RecipeApi` over HTTP
pub struct HttpRecipeApi {
    client: Client,
    base_url: String,
}

impl HttpRecipeApi {
    pub fn new(config: &KitchenConfig) -> Result<Self, KitchenError> {
        if !(config.base_url.starts_with("http://") || config.base_url.starts_with("https://")) {
            return Err(KitchenError::InvalidUrl(config.base_url.clone()));
        }
        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(HttpRecipeApi {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        HttpRecipeApi {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, KitchenError> {
        debug!("GET {}", path);
        let response = self.client.get(self.url(path)).send().await?;
        read_json(response).await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, KitchenError>
    where
        B: serde::Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        debug!("POST {}", path);
        let response = self.client.post(self.url(path)).json(body).send().await?;
        read_json(response).await
    }
}

#[async_trait]
impl RecipeApi for HttpRecipeApi {
    async fn suggestions(&self) -> Result<Vec<Suggestion>, KitchenError> {
        let response: SuggestionsResponse = self.get("suggestions").await?;
        Ok(response.suggestions)
    }

    async fn search_by_ingredients(
        &self,
        ingredients: &str,
    ) -> Result<IngredientSearchResponse, KitchenError> {
        self.post(
            "search-by-ingredients",
            &IngredientSearchRequest { ingredients },
        )
        .await
    }

    async fn generate_recipe(&self, dish_name: &str) -> Result<Recipe, KitchenError> {
        self.post("generate-recipe", &DishRequest { dish_name }).await
    }

    async fn generate_recipe_from_ingredients(
        &self,
        ingredients: &str,
        filter: Filter,
    ) -> Result<Recipe, KitchenError> {
        self.post(
            "generate-recipe-from-ingredients",
            &IngredientsRequest {
                ingredients,
                filter_type: filter,
            },
        )
        .await
    }

    async fn suggest_replacement(
        &self,
        ingredient: &str,
        recipe_name: &str,
    ) -> Result<ReplacementSuggestion, KitchenError> {
        self.post(
            "suggest-ingredient-replacement",
            &ReplacementRequest {
                ingredient,
                recipe_name,
            },
        )
        .await
    }

    async fn dish_image(&self, dish_name: &str) -> Result<String, KitchenError> {
        let response: ImageResponse = self.post("get-dish-image", &DishRequest { dish_name }).await?;
        Ok(response.image_url)
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, KitchenError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let detail = error_detail(&body, status);
        warn!("API answered {}: {}", status, detail);
        return Err(KitchenError::Server {
            status: status.as_u16(),
            detail,
        });
    }

    Ok(serde_json::from_str(&body)?)
}

/// Human-readable message from an error body.
///
/// Understands `{"detail": "..."}` and the validation form
/// `{"detail": [{"msg": "..."}]}`; anything else gets a generic message.
pub fn error_detail(body: &str, status: StatusCode) -> String {
    let detail = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| match value.get("detail") {
            Some(Value::String(message)) if !message.trim().is_empty() => Some(message.clone()),
            Some(Value::Array(items)) => {
                let messages: Vec<&str> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(Value::as_str))
                    .collect();
                (!messages.is_empty()).then(|| messages.join("; "))
            }
            _ => None,
        });

    detail.unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()))
}
