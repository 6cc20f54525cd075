use std::time::Instant;

use ai_kitchen::render::render_replacement;
use ai_kitchen::scaling::scale_measure;
use ai_kitchen::units::convert_units;
use ai_kitchen::{Filter, KitchenConfig, RecipeApi};
use clap::{Parser, Subcommand};
use log::debug;

#[derive(Parser)]
#[command(
    name = "ai-kitchen",
    about = "Search recipes, scale servings and convert kitchen units",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Recipe API base URL (overrides kitchen.toml and KITCHEN__BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Print recipes as an HTML fragment instead of text
    #[arg(long, global = true)]
    html: bool,
}

#[derive(Subcommand)]
enum Command {
    /// List popular dishes
    Suggestions,

    /// Generate a recipe for a dish name
    Recipe {
        dish: String,

        /// Scale ingredients to this many servings
        #[arg(long, short)]
        servings: Option<u32>,
    },

    /// Generate a recipe from a comma-separated ingredient list
    Cook {
        ingredients: String,

        #[arg(long, short, value_enum, default_value_t = Filter::Tasty)]
        filter: Filter,

        #[arg(long, short)]
        servings: Option<u32>,
    },

    /// Find existing recipes that use the given ingredients
    Search { ingredients: String },

    /// Suggest substitutes for an ingredient of a recipe
    Substitute {
        ingredient: String,

        /// Recipe the ingredient belongs to
        #[arg(long)]
        recipe: String,
    },

    /// Look up an image for a dish
    Image { dish: String },

    /// Convert a value between kitchen units (works offline)
    Convert { value: String, from: String, to: String },

    /// Scale a measure such as "1 1/2 cups" by a ratio (works offline)
    Scale {
        measure: String,

        #[arg(long, short)]
        ratio: f64,
    },
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let cli = Cli::parse();

    // Offline commands need no configuration
    match cli.command {
        Command::Convert { value, from, to } => match convert_units(&value, &from, &to) {
            Ok(conversion) => println!("{} {} = {}", value.trim(), from, conversion),
            Err(e) => println!("{}", e),
        },
        Command::Scale { measure, ratio } => println!("{}", scale_measure(&measure, ratio)),
        command => {
            if let Err(e) = run(command, cli.base_url, cli.html).await {
                eprintln!("{}", error_line(e.as_ref()));
                std::process::exit(1);
            }
        }
    }
}

async fn run(
    command: Command,
    base_url: Option<String>,
    html: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = KitchenConfig::load()?;
    if let Some(base_url) = base_url {
        config.base_url = base_url;
    }
    debug!("using API at {}", config.base_url);

    let mut kitchen = ai_kitchen::connect(&config)?;

    match command {
        Command::Suggestions => {
            kitchen.load_suggestions().await?;
            for suggestion in kitchen.state().suggestions() {
                match &suggestion.category {
                    Some(category) => {
                        println!("{} {} ({})", suggestion.icon, suggestion.name, category)
                    }
                    None => println!("{} {}", suggestion.icon, suggestion.name),
                }
            }
        }
        Command::Recipe { dish, servings } => {
            kitchen.open_suggestion(&dish).await?;
            print_recipe(&mut kitchen, servings, html);
        }
        Command::Cook {
            ingredients,
            filter,
            servings,
        } => {
            kitchen.generate_with_filter(&ingredients, filter).await?;
            print_recipe(&mut kitchen, servings, html);
        }
        Command::Search { ingredients } => {
            kitchen.search_by_ingredients(&ingredients).await?;
            let results = kitchen.state().search_results();
            if results.is_empty() {
                println!("No recipes found for {}", ingredients.trim());
            }
            for summary in results {
                match &summary.category {
                    Some(category) => println!("{} ({})", summary.name, category),
                    None => println!("{}", summary.name),
                }
            }
        }
        Command::Substitute { ingredient, recipe } => {
            let replacement = kitchen
                .api()
                .suggest_replacement(ingredient.trim(), recipe.trim())
                .await?;
            print!("{}", render_replacement(&replacement));
        }
        Command::Image { dish } => {
            let url = kitchen.api().dish_image(dish.trim()).await?;
            println!("{}", url);
        }
        Command::Convert { .. } | Command::Scale { .. } => {}
    }

    if let Some(message) = kitchen.state().banner(Instant::now()) {
        eprintln!("{}", message);
    }

    Ok(())
}

fn print_recipe<A: RecipeApi>(
    kitchen: &mut ai_kitchen::Kitchen<A>,
    servings: Option<u32>,
    html: bool,
) {
    if let Some(servings) = servings {
        kitchen.set_servings(servings);
    }
    if let Some(view) = kitchen.render() {
        if html {
            print!("{}", view.to_html());
        } else {
            print!("{}", view);
        }
    }
}

/// Human-readable failure line for stderr, using the error's `Display`
fn error_line(err: &dyn std::error::Error) -> String {
    format!("Error: {}", err)
}
