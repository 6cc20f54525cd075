//! View state: which screen and panel are visible, the search mode and
//! filter, the recipe on screen and the bookkeeping for in-flight requests.
//!
//! Every request takes a [`RequestToken`]. Only the completion carrying the
//! latest token may change the view; older completions are dropped, so the
//! last request issued wins even when responses arrive out of order.

use std::time::{Duration, Instant};

use log::debug;

use crate::error::KitchenError;
use crate::model::{Filter, Recipe, RecipeSummary, ReplacementSuggestion, Suggestion};
use crate::scaling::Servings;

/// Search mode of the main view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Look up a recipe by dish name
    #[default]
    Recipe,
    /// Build a recipe from a list of ingredients
    Parse,
}

impl Mode {
    pub fn placeholder(&self) -> &'static str {
        match self {
            Mode::Recipe => "Enter a dish name (e.g. Butter Chicken, Pad Thai)...",
            Mode::Parse => "Enter ingredients separated by commas (e.g. chicken, rice, garlic)...",
        }
    }

    pub fn empty_input_message(&self) -> &'static str {
        match self {
            Mode::Recipe => "Please enter a dish name",
            Mode::Parse => "Please enter at least one ingredient",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Main,
    UnitNormalizer,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Panel {
    #[default]
    Suggestions,
    Recipe,
}

/// Identifies one issued request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

/// What happened to a completed request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The response updated the view
    Applied,
    /// A newer request was issued meanwhile; the response was dropped
    Stale,
}

#[derive(Debug, Clone)]
struct Banner {
    message: String,
    shown_at: Instant,
}

/// Recipe on screen together with its adjustable serving count
#[derive(Debug, Clone)]
pub struct RecipeSession {
    pub recipe: Recipe,
    pub servings: Servings,
}

impl RecipeSession {
    pub fn new(recipe: Recipe) -> Self {
        let servings = Servings::new(recipe.servings);
        RecipeSession { recipe, servings }
    }
}

#[derive(Debug, Clone)]
pub struct ViewState {
    mode: Mode,
    filter: Filter,
    screen: Screen,
    panel: Panel,
    loading: bool,
    suggestions: Vec<Suggestion>,
    search_results: Vec<RecipeSummary>,
    recipe: Option<RecipeSession>,
    replacement: Option<ReplacementSuggestion>,
    banner: Option<Banner>,
    banner_duration: Duration,
    issued: u64,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState::new(Duration::from_secs(5))
    }
}

impl ViewState {
    pub fn new(banner_duration: Duration) -> Self {
        ViewState {
            mode: Mode::default(),
            filter: Filter::default(),
            screen: Screen::default(),
            panel: Panel::default(),
            loading: false,
            suggestions: Vec::new(),
            search_results: Vec::new(),
            recipe: None,
            replacement: None,
            banner: None,
            banner_duration,
            issued: 0,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            debug!("mode {:?} -> {:?}", self.mode, mode);
            self.mode = mode;
        }
    }

    pub fn toggle_mode(&mut self) {
        let next = match self.mode {
            Mode::Recipe => Mode::Parse,
            Mode::Parse => Mode::Recipe,
        };
        self.set_mode(next);
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    pub fn placeholder(&self) -> &'static str {
        self.mode.placeholder()
    }

    pub fn empty_input_message(&self) -> &'static str {
        self.mode.empty_input_message()
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn open_unit_normalizer(&mut self) {
        self.screen = Screen::UnitNormalizer;
    }

    pub fn close_unit_normalizer(&mut self) {
        self.screen = Screen::Main;
    }

    pub fn panel(&self) -> Panel {
        self.panel
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn search_results(&self) -> &[RecipeSummary] {
        &self.search_results
    }

    pub fn recipe(&self) -> Option<&RecipeSession> {
        self.recipe.as_ref()
    }

    pub fn replacement(&self) -> Option<&ReplacementSuggestion> {
        self.replacement.as_ref()
    }

    /// Trimmed search input, or the mode's empty-input error
    pub fn validate_input(&self, input: &str) -> Result<String, KitchenError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(KitchenError::EmptyInput(
                self.empty_input_message().to_string(),
            ));
        }
        Ok(input.to_string())
    }

    /// Replace the recipe on screen and switch to the recipe panel
    pub fn show_recipe(&mut self, recipe: Recipe) {
        debug!("showing recipe {:?}", recipe.name);
        self.recipe = Some(RecipeSession::new(recipe));
        self.replacement = None;
        self.panel = Panel::Recipe;
    }

    /// Discard the recipe and go back to the suggestions list
    pub fn close_recipe(&mut self) {
        self.recipe = None;
        self.replacement = None;
        self.panel = Panel::Suggestions;
    }

    /// Step the serving count; returns the new count when a recipe is shown
    pub fn adjust_servings(&mut self, delta: i64) -> Option<u32> {
        let session = self.recipe.as_mut()?;
        session.servings.adjust(delta);
        Some(session.servings.current())
    }

    pub fn set_servings(&mut self, servings: u32) -> Option<u32> {
        let session = self.recipe.as_mut()?;
        session.servings.set(servings);
        Some(session.servings.current())
    }

    pub fn show_error(&mut self, message: impl Into<String>, now: Instant) {
        self.banner = Some(Banner {
            message: message.into(),
            shown_at: now,
        });
    }

    /// Banner text while it is still within its display time
    pub fn banner(&self, now: Instant) -> Option<&str> {
        self.banner
            .as_ref()
            .filter(|banner| now.saturating_duration_since(banner.shown_at) < self.banner_duration)
            .map(|banner| banner.message.as_str())
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    /// Issue a token for a new request and show the loading indicator
    pub fn begin_request(&mut self) -> RequestToken {
        self.issued += 1;
        self.loading = true;
        RequestToken(self.issued)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.issued
    }

    pub fn complete_recipe(
        &mut self,
        token: RequestToken,
        result: Result<Recipe, KitchenError>,
        now: Instant,
    ) -> Result<Completion, KitchenError> {
        Ok(match self.settle(token, result, now)? {
            Some(recipe) => {
                self.show_recipe(recipe);
                Completion::Applied
            }
            None => Completion::Stale,
        })
    }

    pub fn complete_suggestions(
        &mut self,
        token: RequestToken,
        result: Result<Vec<Suggestion>, KitchenError>,
        now: Instant,
    ) -> Result<Completion, KitchenError> {
        Ok(match self.settle(token, result, now)? {
            Some(suggestions) => {
                self.suggestions = suggestions;
                Completion::Applied
            }
            None => Completion::Stale,
        })
    }

    pub fn complete_search_results(
        &mut self,
        token: RequestToken,
        result: Result<Vec<RecipeSummary>, KitchenError>,
        now: Instant,
    ) -> Result<Completion, KitchenError> {
        Ok(match self.settle(token, result, now)? {
            Some(results) => {
                self.search_results = results;
                Completion::Applied
            }
            None => Completion::Stale,
        })
    }

    pub fn complete_replacement(
        &mut self,
        token: RequestToken,
        result: Result<ReplacementSuggestion, KitchenError>,
        now: Instant,
    ) -> Result<Completion, KitchenError> {
        Ok(match self.settle(token, result, now)? {
            Some(replacement) => {
                self.replacement = Some(replacement);
                Completion::Applied
            }
            None => Completion::Stale,
        })
    }

    // Ok(None) means the token is stale and the result was dropped
    fn settle<T>(
        &mut self,
        token: RequestToken,
        result: Result<T, KitchenError>,
        now: Instant,
    ) -> Result<Option<T>, KitchenError> {
        if !self.is_current(token) {
            debug!("dropping response for stale request {:?}", token);
            return Ok(None);
        }
        self.loading = false;

        match result {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                self.show_error(e.to_string(), now);
                if self.recipe.is_none() {
                    self.panel = Panel::Suggestions;
                }
                Err(e)
            }
        }
    }
}
