pub mod nutrient_table;
pub mod recipe_loader;

pub use nutrient_table::{NutrientRecord, NutrientTable};
pub use recipe_loader::{load_recipe_corpus, parse_r_vector, Recipe};
