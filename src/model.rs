use serde::{Deserialize, Deserializer, Serialize};

/// A recipe as returned by the generation endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub prep_time: String,
    #[serde(default)]
    pub cook_time: String,
    #[serde(default = "default_servings", deserialize_with = "at_least_one")]
    pub servings: u32,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub area: String,
    #[serde(default = "default_dietary_type", deserialize_with = "or_default_dietary_type")]
    pub dietary_type: String,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub nutrition: Option<Nutrition>,
    #[serde(default)]
    pub youtube_url: Option<String>,
    #[serde(default)]
    pub related_dishes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    #[serde(default)]
    pub measure: String,
}

/// Per-serving nutrition, values already carry their unit ("12.5g")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    pub calories: u32,
    pub protein: String,
    pub carbs: String,
    pub fat: String,
    #[serde(default)]
    pub saturated_fat: Option<String>,
    pub fiber: String,
    #[serde(default)]
    pub sugar: Option<String>,
    #[serde(default)]
    pub sodium: Option<String>,
}

fn default_servings() -> u32 {
    4
}

fn default_dietary_type() -> String {
    "Non-Veg".to_string()
}

fn at_least_one<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    Ok(u32::deserialize(deserializer)?.max(1))
}

fn or_default_dietary_type<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(default_dietary_type))
}

/// Popular dish shown on the start screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub name: String,
    pub icon: String,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<Suggestion>,
}

/// Short recipe entry returned by the ingredient search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeSummary {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Option<String>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IngredientSearchResponse {
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub recipes: Vec<RecipeSummary>,
}

/// Substitutes proposed for one ingredient of a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplacementSuggestion {
    pub original: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub alternatives: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageResponse {
    pub image_url: String,
}

/// Ingredient-based generation preference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    Tasty,
    Healthy,
    Quick,
}

impl Filter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Filter::Tasty => "tasty",
            Filter::Healthy => "healthy",
            Filter::Quick => "quick",
        }
    }
}

// Request bodies

#[derive(Debug, Serialize)]
pub(crate) struct DishRequest<'a> {
    pub dish_name: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct IngredientSearchRequest<'a> {
    pub ingredients: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct IngredientsRequest<'a> {
    pub ingredients: &'a str,
    pub filter_type: Filter,
}

#[derive(Debug, Serialize)]
pub(crate) struct ReplacementRequest<'a> {
    pub ingredient: &'a str,
    pub recipe_name: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_recipe_from_server_payload() {
        let recipe: Recipe = serde_json::from_value(json!({
            "id": "themealdb-52772",
            "name": "Teriyaki Chicken Casserole",
            "category": "Chicken",
            "area": "Japanese",
            "instructions": ["Preheat oven", "Combine soy sauce"],
            "ingredients": [{"name": "soy sauce", "measure": "3/4 cup"}],
            "image_url": "https://www.themealdb.com/images/media/meals/wvpsxx1468256321.jpg",
            "prep_time": "20 mins",
            "cook_time": "30 mins",
            "servings": 4,
            "nutrition": {
                "calories": 310,
                "protein": "12.5g",
                "carbs": "30.0g",
                "fat": "8.1g",
                "fiber": "2.0g",
                "sugar": "4.2g",
                "sodium": "900mg",
                "saturated_fat": "2.4g"
            },
            "youtube_url": null,
            "related_dishes": []
        }))
        .unwrap();

        assert_eq!(recipe.servings, 4);
        assert_eq!(recipe.dietary_type, "Non-Veg");
        assert_eq!(recipe.ingredients[0].measure, "3/4 cup");
        assert_eq!(recipe.nutrition.unwrap().calories, 310);
        assert!(recipe.youtube_url.is_none());
    }

    #[test]
    fn test_recipe_minimal_payload_uses_defaults() {
        let recipe: Recipe = serde_json::from_value(json!({
            "name": "Toast",
            "servings": 0,
            "dietary_type": null
        }))
        .unwrap();

        assert_eq!(recipe.servings, 1);
        assert_eq!(recipe.dietary_type, "Non-Veg");
        assert!(recipe.ingredients.is_empty());
        assert!(recipe.nutrition.is_none());
    }

    #[test]
    fn test_filter_serializes_lowercase() {
        let body = IngredientsRequest {
            ingredients: "eggs, spinach",
            filter_type: Filter::Healthy,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"ingredients": "eggs, spinach", "filter_type": "healthy"})
        );
    }

    #[test]
    fn test_recipe_summary_null_ingredients() {
        let summary: RecipeSummary = serde_json::from_value(json!({
            "name": "Omelette",
            "thumbnail": "https://example.com/omelette.jpg",
            "ingredients": null
        }))
        .unwrap();
        assert!(summary.ingredients.is_empty());
    }
}
