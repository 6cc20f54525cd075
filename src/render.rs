//! Projection of a recipe and its current serving count into presentable
//! output: an HTML fragment for the page and plain text for the terminal.

use std::fmt;

use base64::prelude::*;
use html_escape::{encode_double_quoted_attribute, encode_text};
use log::{debug, warn};
use reqwest::Url;

use crate::config::ImageConfig;
use crate::model::{Nutrition, ReplacementSuggestion};
use crate::scaling::scale_measure;
use crate::state::RecipeSession;

const PLACEHOLDER_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="800" height="600" viewBox="0 0 800 600"><rect width="800" height="600" fill="#f3efe6"/><circle cx="400" cy="280" r="120" fill="#ffffff" stroke="#d9d2c3" stroke-width="8"/><text x="400" y="470" font-family="sans-serif" font-size="36" fill="#8a8170" text-anchor="middle">No image available</text></svg>"##;

/// Image sources tried in order; each load failure moves to the next one and
/// the last source (the placeholder) is never left.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageChain {
    sources: Vec<String>,
    position: usize,
}

impl ImageChain {
    /// Primary URL, then the two generated sources for `query`, then the
    /// placeholder. Empty or unusable entries are skipped.
    pub fn new(primary: &str, query: &str, config: &ImageConfig) -> Self {
        let mut sources = Vec::with_capacity(4);

        if !primary.trim().is_empty() {
            sources.push(primary.trim().to_string());
        }
        for template in [&config.generated, &config.fallback] {
            match expand_template(template, query) {
                Some(url) => sources.push(url),
                None => warn!("skipping unusable image source template {:?}", template),
            }
        }
        sources.push(placeholder(config));

        ImageChain {
            sources,
            position: 0,
        }
    }

    pub fn current(&self) -> &str {
        &self.sources[self.position]
    }

    /// Move to the next source after the current one failed to load
    pub fn next_after_failure(&mut self) -> &str {
        if self.position + 1 < self.sources.len() {
            self.position += 1;
            debug!("image failed, trying {}", self.sources[self.position]);
        }
        self.current()
    }

    pub fn is_placeholder(&self) -> bool {
        self.position + 1 == self.sources.len()
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    fn remaining(&self) -> &[String] {
        &self.sources[self.position + 1..]
    }
}

fn expand_template(template: &str, query: &str) -> Option<String> {
    if template.trim().is_empty() {
        return None;
    }
    let query = urlencoding::encode(&query.trim().to_lowercase()).into_owned();
    Url::parse(&template.replace("{query}", &query))
        .ok()
        .map(String::from)
}

fn placeholder(config: &ImageConfig) -> String {
    if config.placeholder.trim().is_empty() {
        format!(
            "data:image/svg+xml;base64,{}",
            BASE64_STANDARD.encode(PLACEHOLDER_SVG)
        )
    } else {
        config.placeholder.clone()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IngredientLine {
    pub name: String,
    pub measure: String,
}

/// Everything the recipe panel shows
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeView {
    pub title: String,
    pub image: ImageChain,
    pub meta: Vec<(&'static str, String)>,
    pub servings: u32,
    pub ingredients: Vec<IngredientLine>,
    pub instructions: Vec<String>,
    pub nutrition: Option<Vec<(&'static str, String)>>,
    pub video_url: Option<String>,
    pub related_dishes: Vec<String>,
}

/// Project the recipe on screen, with every measure scaled to the current
/// serving count.
pub fn render_recipe(session: &RecipeSession, images: &ImageConfig) -> RecipeView {
    let recipe = &session.recipe;
    let ratio = session.servings.ratio();

    let meta = [
        ("Prep", &recipe.prep_time),
        ("Cook", &recipe.cook_time),
        ("Category", &recipe.category),
        ("Cuisine", &recipe.area),
        ("Diet", &recipe.dietary_type),
    ]
    .into_iter()
    .filter(|(_, value)| !value.trim().is_empty())
    .map(|(label, value)| (label, value.clone()))
    .collect();

    let ingredients = recipe
        .ingredients
        .iter()
        .map(|ingredient| IngredientLine {
            name: ingredient.name.clone(),
            measure: scale_measure(&ingredient.measure, ratio),
        })
        .collect();

    RecipeView {
        title: recipe.name.clone(),
        image: ImageChain::new(&recipe.image_url, &recipe.name, images),
        meta,
        servings: session.servings.current(),
        ingredients,
        instructions: recipe.instructions.clone(),
        nutrition: recipe.nutrition.as_ref().map(nutrition_rows),
        video_url: recipe
            .youtube_url
            .as_ref()
            .filter(|url| !url.trim().is_empty())
            .cloned(),
        related_dishes: recipe.related_dishes.clone(),
    }
}

fn nutrition_rows(nutrition: &Nutrition) -> Vec<(&'static str, String)> {
    let mut rows = vec![
        ("Calories", format!("{} kcal", nutrition.calories)),
        ("Protein", nutrition.protein.clone()),
        ("Carbs", nutrition.carbs.clone()),
        ("Fat", nutrition.fat.clone()),
    ];
    if let Some(saturated_fat) = &nutrition.saturated_fat {
        rows.push(("Saturated fat", saturated_fat.clone()));
    }
    rows.push(("Fiber", nutrition.fiber.clone()));
    if let Some(sugar) = &nutrition.sugar {
        rows.push(("Sugar", sugar.clone()));
    }
    if let Some(sodium) = &nutrition.sodium {
        rows.push(("Sodium", sodium.clone()));
    }
    rows
}

impl RecipeView {
    /// HTML fragment for the recipe panel. The image element lists the
    /// sources still to try in `data-fallbacks`, as a JSON array.
    pub fn to_html(&self) -> String {
        let mut html = String::from("<article class=\"recipe\">\n");

        html.push_str(&format!(
            "<h2 class=\"recipe-title\">{}</h2>\n",
            encode_text(&self.title)
        ));

        let fallbacks = serde_json::Value::from(self.image.remaining()).to_string();
        html.push_str(&format!(
            "<img class=\"recipe-image\" src=\"{}\" alt=\"{}\" data-fallbacks=\"{}\">\n",
            encode_double_quoted_attribute(self.image.current()),
            encode_double_quoted_attribute(&self.title),
            encode_double_quoted_attribute(&fallbacks)
        ));

        html.push_str("<ul class=\"recipe-meta\">\n");
        for (label, value) in &self.meta {
            html.push_str(&format!(
                "<li><span class=\"label\">{}</span> {}</li>\n",
                label,
                encode_text(value)
            ));
        }
        html.push_str(&format!(
            "<li><span class=\"label\">Servings</span> <span class=\"servings\">{}</span></li>\n",
            self.servings
        ));
        html.push_str("</ul>\n");

        html.push_str("<section class=\"ingredients\">\n<h3>Ingredients</h3>\n<ul>\n");
        for line in &self.ingredients {
            html.push_str(&format!(
                "<li><span class=\"measure\">{}</span> <span class=\"name\">{}</span></li>\n",
                encode_text(&line.measure),
                encode_text(&line.name)
            ));
        }
        html.push_str("</ul>\n</section>\n");

        html.push_str("<section class=\"instructions\">\n<h3>Instructions</h3>\n<ol>\n");
        for step in &self.instructions {
            html.push_str(&format!("<li>{}</li>\n", encode_text(step)));
        }
        html.push_str("</ol>\n</section>\n");

        if let Some(rows) = &self.nutrition {
            html.push_str(
                "<section class=\"nutrition\">\n<h3>Nutrition per serving</h3>\n<dl>\n",
            );
            for (label, value) in rows {
                html.push_str(&format!(
                    "<dt>{}</dt><dd>{}</dd>\n",
                    label,
                    encode_text(value)
                ));
            }
            html.push_str("</dl>\n</section>\n");
        }

        if let Some(url) = &self.video_url {
            html.push_str(&format!(
                "<a class=\"video-link\" href=\"{}\" target=\"_blank\" rel=\"noopener\">Watch on YouTube</a>\n",
                encode_double_quoted_attribute(url)
            ));
        }

        if !self.related_dishes.is_empty() {
            html.push_str("<ul class=\"related-dishes\">\n");
            for dish in &self.related_dishes {
                html.push_str(&format!("<li>{}</li>\n", encode_text(dish)));
            }
            html.push_str("</ul>\n");
        }

        html.push_str("</article>\n");
        html
    }
}

impl fmt::Display for RecipeView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", "=".repeat(self.title.chars().count()))?;
        for (label, value) in &self.meta {
            writeln!(f, "{}: {}", label, value)?;
        }
        writeln!(f, "Servings: {}", self.servings)?;

        writeln!(f, "\nIngredients")?;
        for line in &self.ingredients {
            if line.measure.trim().is_empty() {
                writeln!(f, "  - {}", line.name)?;
            } else {
                writeln!(f, "  - {} {}", line.measure, line.name)?;
            }
        }

        writeln!(f, "\nInstructions")?;
        for (i, step) in self.instructions.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, step)?;
        }

        if let Some(rows) = &self.nutrition {
            writeln!(f, "\nNutrition per serving")?;
            for (label, value) in rows {
                writeln!(f, "  {}: {}", label, value)?;
            }
        }

        if let Some(url) = &self.video_url {
            writeln!(f, "\nVideo: {}", url)?;
        }
        if !self.related_dishes.is_empty() {
            writeln!(f, "\nRelated: {}", self.related_dishes.join(", "))?;
        }
        Ok(())
    }
}

/// Terminal rendering of ingredient substitutes
pub fn render_replacement(replacement: &ReplacementSuggestion) -> String {
    let mut out = format!("Alternatives for {}:\n", replacement.original);
    for alternative in &replacement.alternatives {
        out.push_str(&format!("  - {}\n", alternative));
    }
    if !replacement.notes.trim().is_empty() {
        out.push_str(&format!("\n{}\n", replacement.notes));
    }
    out
}
