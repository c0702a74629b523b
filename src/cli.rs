use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build a daily meal plan for a user profile
    Recommend {
        /// Path to the user profile JSON file
        #[arg(short, long)]
        profile: String,
        /// Path to the recipe corpus CSV
        #[arg(short, long, default_value = "cleaned_recipes.csv")]
        recipes: String,
        /// Path to the nutrient reference CSV
        #[arg(short, long, default_value = "nutrient_lookup.csv")]
        nutrients: String,
        /// Suppress progress output, printing only the final JSON
        #[arg(short, long)]
        quiet: bool,
    },
    /// Rebuild the nutrient reference CSV from the USDA FoodData Central API
    FetchNutrients {
        /// Where to write the fetched CSV
        #[arg(short, long, default_value = "nutrient_lookup.csv")]
        output: String,
    },
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
