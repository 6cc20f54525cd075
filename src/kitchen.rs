use std::time::Instant;

use log::{debug, info};

use crate::client::RecipeApi;
use crate::config::ImageConfig;
use crate::error::{ConversionError, KitchenError};
use crate::model::Filter;
use crate::render::{render_recipe, RecipeView};
use crate::state::{Completion, Mode, ViewState};
use crate::units::{convert_units, Conversion};

/// One handler per user action, wired to an API and an explicit view state.
///
/// Network handlers issue a request token before calling the API and hand
/// the result back with it, so a response can only update the view if no
/// newer request was issued in the meantime.
pub struct Kitchen<A: RecipeApi> {
    api: A,
    state: ViewState,
    images: ImageConfig,
}

impl<A: RecipeApi> Kitchen<A> {
    pub fn new(api: A, state: ViewState, images: ImageConfig) -> Self {
        Kitchen { api, state, images }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ViewState {
        &mut self.state
    }

    pub fn into_state(self) -> ViewState {
        self.state
    }

    /// Fill the start screen with popular dishes
    pub async fn load_suggestions(&mut self) -> Result<Completion, KitchenError> {
        let token = self.state.begin_request();
        let result = self.api.suggestions().await;
        self.state.complete_suggestions(token, result, Instant::now())
    }

    /// Run the search box in the current mode.
    ///
    /// Recipe mode generates a recipe for the dish name; parse mode builds
    /// one from the ingredient list with the active filter. Empty input only
    /// raises the banner.
    pub async fn search(&mut self, input: &str) -> Result<Completion, KitchenError> {
        let input = match self.state.validate_input(input) {
            Ok(input) => input,
            Err(e) => {
                self.state.show_error(e.to_string(), Instant::now());
                return Err(e);
            }
        };

        self.state.close_recipe();
        let token = self.state.begin_request();
        let result = match self.state.mode() {
            Mode::Recipe => {
                info!("generating recipe for {:?}", input);
                self.api.generate_recipe(&input).await
            }
            Mode::Parse => {
                let filter = self.state.filter();
                info!(
                    "generating {} recipe from ingredients {:?}",
                    filter.as_str(),
                    input
                );
                self.api
                    .generate_recipe_from_ingredients(&input, filter)
                    .await
            }
        };
        self.state.complete_recipe(token, result, Instant::now())
    }

    /// Look up existing recipes that use the given ingredients
    pub async fn search_by_ingredients(&mut self, input: &str) -> Result<Completion, KitchenError> {
        let input = match self.state.validate_input(input) {
            Ok(input) => input,
            Err(e) => {
                self.state.show_error(e.to_string(), Instant::now());
                return Err(e);
            }
        };

        let token = self.state.begin_request();
        let result = self
            .api
            .search_by_ingredients(&input)
            .await
            .map(|response| {
                debug!("ingredient search returned {} recipes", response.count);
                response.recipes
            });
        self.state
            .complete_search_results(token, result, Instant::now())
    }

    /// Clicking a suggestion card searches for it by name
    pub async fn open_suggestion(&mut self, name: &str) -> Result<Completion, KitchenError> {
        self.state.set_mode(Mode::Recipe);
        self.search(name).await
    }

    pub async fn generate_with_filter(
        &mut self,
        ingredients: &str,
        filter: Filter,
    ) -> Result<Completion, KitchenError> {
        self.state.set_mode(Mode::Parse);
        self.state.set_filter(filter);
        self.search(ingredients).await
    }

    /// Ask for substitutes of an ingredient of the recipe on screen
    pub async fn suggest_replacement(
        &mut self,
        ingredient: &str,
    ) -> Result<Completion, KitchenError> {
        let recipe_name = match self.state.recipe() {
            Some(session) => session.recipe.name.clone(),
            None => {
                self.state
                    .show_error(KitchenError::NoRecipe.to_string(), Instant::now());
                return Err(KitchenError::NoRecipe);
            }
        };

        let token = self.state.begin_request();
        let result = self.api.suggest_replacement(ingredient, &recipe_name).await;
        self.state.complete_replacement(token, result, Instant::now())
    }

    /// +/- on the serving counter; `None` when no recipe is shown
    pub fn adjust_servings(&mut self, delta: i64) -> Option<u32> {
        self.state.adjust_servings(delta)
    }

    pub fn set_servings(&mut self, servings: u32) -> Option<u32> {
        self.state.set_servings(servings)
    }

    /// Unit calculator; errors are shown inline by the caller, not in the banner
    pub fn convert(&self, input: &str, from: &str, to: &str) -> Result<Conversion, ConversionError> {
        convert_units(input, from, to)
    }

    /// Current projection of the recipe panel
    pub fn render(&self) -> Option<RecipeView> {
        self.state
            .recipe()
            .map(|session| render_recipe(session, &self.images))
    }
}
