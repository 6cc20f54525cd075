use ai_kitchen::{Filter, HttpRecipeApi, KitchenError, RecipeApi};
use mockito::Matcher;
use serde_json::json;

const RECIPE_BODY: &str = r#"{
    "id": "gemini-ingredient-garlic-butter-rice",
    "name": "Garlic Butter Rice",
    "category": "Side",
    "area": "Fusion",
    "instructions": ["Rinse the rice", "Melt butter with garlic", "Simmer"],
    "ingredients": [
        {"name": "rice", "measure": "1 cup"},
        {"name": "butter", "measure": "2 tbsp"},
        {"name": "garlic", "measure": "3 cloves"}
    ],
    "image_url": "https://example.com/rice.jpg",
    "prep_time": "5 mins",
    "cook_time": "20 mins",
    "servings": 4,
    "nutrition": {
        "calories": 240,
        "protein": "4.1g",
        "carbs": "38.0g",
        "fat": "7.2g",
        "fiber": "0.9g",
        "sugar": "0.3g",
        "sodium": "12mg",
        "saturated_fat": "2.2g"
    },
    "youtube_url": "https://www.youtube.com/results?search_query=Garlic+Butter+Rice+recipe",
    "related_dishes": [],
    "dietary_type": "Veg"
}"#;

#[tokio::test]
async fn test_suggestions() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/suggestions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"suggestions": [
                {"name": "Butter Chicken", "icon": "🥘", "category": "Indian"},
                {"name": "Tacos", "icon": "🌮"}
            ]}"#,
        )
        .create();

    let api = HttpRecipeApi::with_base_url(server.url());
    let suggestions = api.suggestions().await.unwrap();

    assert_eq!(suggestions.len(), 2);
    assert_eq!(suggestions[0].name, "Butter Chicken");
    assert_eq!(suggestions[0].category.as_deref(), Some("Indian"));
    assert!(suggestions[1].category.is_none());
    mock.assert();
}

#[tokio::test]
async fn test_generate_recipe_sends_dish_name() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/generate-recipe")
        .match_body(Matcher::Json(json!({"dish_name": "Garlic Butter Rice"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(RECIPE_BODY)
        .create();

    let api = HttpRecipeApi::with_base_url(server.url());
    let recipe = api.generate_recipe("Garlic Butter Rice").await.unwrap();

    assert_eq!(recipe.name, "Garlic Butter Rice");
    assert_eq!(recipe.servings, 4);
    assert_eq!(recipe.dietary_type, "Veg");
    assert_eq!(recipe.ingredients.len(), 3);
    mock.assert();
}

#[tokio::test]
async fn test_generate_from_ingredients_sends_filter() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/generate-recipe-from-ingredients")
        .match_body(Matcher::Json(json!({
            "ingredients": "rice, butter, garlic",
            "filter_type": "quick"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(RECIPE_BODY)
        .create();

    let api = HttpRecipeApi::with_base_url(server.url());
    let recipe = api
        .generate_recipe_from_ingredients("rice, butter, garlic", Filter::Quick)
        .await
        .unwrap();

    assert_eq!(recipe.cook_time, "20 mins");
    mock.assert();
}

#[tokio::test]
async fn test_search_by_ingredients() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/search-by-ingredients")
        .match_body(Matcher::Json(json!({"ingredients": "eggs, cheese"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"count": 1, "recipes": [{
                "id": "themealdb-1",
                "name": "Cheese Omelette",
                "thumbnail": "https://example.com/omelette.jpg",
                "category": "Breakfast",
                "ingredients": ["eggs", "cheese"],
                "instructions": null
            }]}"#,
        )
        .create();

    let api = HttpRecipeApi::with_base_url(server.url());
    let response = api.search_by_ingredients("eggs, cheese").await.unwrap();

    assert_eq!(response.count, 1);
    assert_eq!(response.recipes[0].name, "Cheese Omelette");
    assert_eq!(response.recipes[0].ingredients, vec!["eggs", "cheese"]);
    mock.assert();
}

#[tokio::test]
async fn test_suggest_replacement() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/suggest-ingredient-replacement")
        .match_body(Matcher::Json(json!({
            "ingredient": "butter",
            "recipe_name": "Garlic Butter Rice"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "original": "butter",
                "alternatives": ["ghee", "olive oil", "coconut oil"],
                "notes": "Ghee keeps the buttery flavor."
            }"#,
        )
        .create();

    let api = HttpRecipeApi::with_base_url(server.url());
    let replacement = api
        .suggest_replacement("butter", "Garlic Butter Rice")
        .await
        .unwrap();

    assert_eq!(replacement.original, "butter");
    assert_eq!(replacement.alternatives.len(), 3);
    assert_eq!(replacement.notes, "Ghee keeps the buttery flavor.");
    mock.assert();
}

#[tokio::test]
async fn test_dish_image() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/get-dish-image")
        .match_body(Matcher::Json(json!({"dish_name": "Ramen"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"image_url": "https://example.com/ramen.jpg"}"#)
        .create();

    let api = HttpRecipeApi::with_base_url(server.url());
    let url = api.dish_image("Ramen").await.unwrap();

    assert_eq!(url, "https://example.com/ramen.jpg");
    mock.assert();
}

#[tokio::test]
async fn test_server_detail_is_reported() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/generate-recipe")
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"detail": "Could not find or generate recipe for 'xyzzy'. Please try a different dish."}"#,
        )
        .expect(2)
        .create();

    let api = HttpRecipeApi::with_base_url(server.url());
    let err = api.generate_recipe("xyzzy").await.unwrap_err();

    match err {
        KitchenError::Server { status, detail } => {
            assert_eq!(status, 404);
            assert!(detail.starts_with("Could not find or generate recipe"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(
        api.generate_recipe("xyzzy").await.unwrap_err().to_string(),
        "Could not find or generate recipe for 'xyzzy'. Please try a different dish."
    );
    mock.assert();
}

#[tokio::test]
async fn test_error_without_detail_gets_generic_message() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/suggestions")
        .with_status(500)
        .with_body("Internal Server Error")
        .create();

    let api = HttpRecipeApi::with_base_url(server.url());
    let err = api.suggestions().await.unwrap_err();

    assert_eq!(err.to_string(), "Request failed with status 500");
    mock.assert();
}

#[tokio::test]
async fn test_malformed_success_body_is_decode_error() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/generate-recipe")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"unexpected": true}"#)
        .create();

    let api = HttpRecipeApi::with_base_url(server.url());
    let err = api.generate_recipe("Soup").await.unwrap_err();

    assert!(matches!(err, KitchenError::Decode(_)));
    mock.assert();
}

#[tokio::test]
async fn test_unreachable_server_is_http_error() {
    // Nothing listens on port 9 (discard) in the test environment
    let api = HttpRecipeApi::with_base_url("http://127.0.0.1:9");
    let err = api.suggestions().await.unwrap_err();

    assert!(matches!(err, KitchenError::Http(_)));
}
