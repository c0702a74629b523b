use anyhow::{Context, Result};
use diet_optim::api_connection::{write_nutrient_csv, FdcClient, REFERENCE_FOODS};
use diet_optim::cli::{parse_args, Command};
use diet_optim::corpus::{load_recipe_corpus, NutrientTable};
use diet_optim::pipeline::DietPlanner;
use diet_optim::plan::DietPlanResult;
use diet_optim::profile::{ProfileError, UserProfile};
use std::path::Path;
use tokio::fs;

const USDA_API_KEY_ENV_VAR: &str = "USDA_API_KEY";

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    match parse_args().command {
        Command::Recommend {
            profile,
            recipes,
            nutrients,
            quiet,
        } => run_recommend(&profile, &recipes, &nutrients, quiet).await,
        Command::FetchNutrients { output } => run_fetch_nutrients(&output).await,
    }
}

async fn run_recommend(
    profile_path: &str,
    recipes_path: &str,
    nutrients_path: &str,
    quiet: bool,
) -> Result<()> {
    let profile_content = fs::read_to_string(profile_path)
        .await
        .with_context(|| format!("Failed to read profile file '{}'", profile_path))?;
    let profile: UserProfile = serde_json::from_str(&profile_content)
        .with_context(|| format!("Failed to parse profile JSON from '{}'", profile_path))?;

    if !quiet {
        println!("Loading recipe corpus from '{}'...", recipes_path);
    }
    let corpus = load_recipe_corpus(Path::new(recipes_path))?;
    let table = NutrientTable::load(Path::new(nutrients_path))?;
    if !quiet {
        println!(
            " > {} recipes, {} reference foods.",
            corpus.len(),
            table.len()
        );
    }

    let planner = DietPlanner::new(corpus, table);
    let progress = |message: String| {
        if !quiet {
            println!("{}", message);
        }
    };

    match planner.recommend(&profile, progress) {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
        Err(error) => {
            // An invalid profile fails the run; anything else degrades to
            // an explicit empty plan so callers always get valid JSON.
            if error.downcast_ref::<ProfileError>().is_some() {
                Err(error)
            } else {
                eprintln!("Recommendation failed: {:#}", error);
                println!("{}", serde_json::to_string_pretty(&DietPlanResult::empty())?);
                Ok(())
            }
        }
    }
}

async fn run_fetch_nutrients(output_path: &str) -> Result<()> {
    println!(
        "Fetching {} reference foods from FoodData Central...",
        REFERENCE_FOODS.len()
    );
    let client = FdcClient::new(USDA_API_KEY_ENV_VAR);
    let rows = client
        .fetch_reference_rows(REFERENCE_FOODS, &|message: String| println!("{}", message))
        .await
        .context("Nutrient fetch failed")?;

    write_nutrient_csv(Path::new(output_path), &rows)?;
    println!(" > Wrote {} rows to '{}'.", rows.len(), output_path);
    Ok(())
}
