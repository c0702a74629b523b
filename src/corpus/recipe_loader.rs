use anyhow::{Context, Result};
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::path::Path;

// Expected column headers in the recipe export.
const NAME_COL: &str = "Name";
const DIET_TYPE_COL: &str = "Type";
const MEAL_TYPE_COL: &str = "MealType";
const CALORIES_COL: &str = "Calories";
const FAT_COL: &str = "FatContent";
const CARB_COL: &str = "CarbohydrateContent";
const PROTEIN_COL: &str = "ProteinContent";
const FIBER_COL: &str = "FiberContent";
const SUGAR_COL: &str = "SugarContent";
const SODIUM_COL: &str = "SodiumContent";
const INSTRUCTIONS_COL: &str = "RecipeInstructions";
const INGREDIENT_PARTS_COL: &str = "RecipeIngredientParts";
const IMAGES_COL: &str = "Images";

const IMAGE_BASE_URL: &str = "https://img.sndimg.com";
const MISSING_IMAGE_TEXT: &str = "Image not found";

/// One recipe row. Numeric fields stay `Option` after coercion: rows with
/// garbled numbers are kept here and excluded later, at candidacy time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    pub diet_type: String,
    pub meal_type: String,
    pub calories: Option<f32>,
    pub fat_g: Option<f32>,
    pub carbs_g: Option<f32>,
    pub protein_g: Option<f32>,
    pub fiber_g: Option<f32>,
    pub sugar_g: Option<f32>,
    pub sodium_mg: Option<f32>,
    pub instructions: String,
    pub ingredient_parts: String,
    pub images: Vec<String>,
}

impl Recipe {
    /// True when all five ranking nutrients coerced to numbers.
    pub fn has_complete_macros(&self) -> bool {
        self.calories.is_some()
            && self.fat_g.is_some()
            && self.carbs_g.is_some()
            && self.protein_g.is_some()
            && self.fiber_g.is_some()
    }

    /// Text searched for ingredient mentions: instructions plus the raw
    /// ingredient-parts field.
    pub fn searchable_text(&self) -> String {
        format!("{} {}", self.instructions, self.ingredient_parts)
    }

    /// First image URL, with bare `/upload...` paths resolved against the
    /// food.com image host.
    pub fn primary_image_url(&self) -> String {
        match self.images.first() {
            None => MISSING_IMAGE_TEXT.to_string(),
            Some(url) if url.starts_with("/upload") => format!("{}{}", IMAGE_BASE_URL, url),
            Some(url) => url.clone(),
        }
    }
}

fn parse_optional_f32(s: &str) -> Option<f32> {
    s.trim().parse::<f32>().ok()
}

/// Parses the R-style vector literal the export uses for list fields,
/// e.g. `c("a", "b")`. `character(0)` is an empty vector. Returns `None`
/// when the text is not in vector form.
pub fn parse_r_vector(text: &str) -> Option<Vec<String>> {
    let trimmed = text.trim();
    if trimmed == "character(0)" {
        return Some(Vec::new());
    }
    if !(trimmed.starts_with("c(") && trimmed.ends_with(')')) {
        return None;
    }
    let inner = &trimmed[2..trimmed.len() - 1];
    let mut items = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    for ch in inner.chars() {
        if ch == '"' {
            if in_quotes {
                items.push(current.clone());
                current.clear();
            }
            in_quotes = !in_quotes;
        } else if in_quotes {
            current.push(ch);
        }
    }
    Some(items)
}

/// Normalizes the `Images` field: R-vector of URLs, a bare URL, or the
/// empty markers all become a plain list.
pub fn clean_image_field(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    if let Some(items) = parse_r_vector(trimmed) {
        return items
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
    }
    let unquoted = trimmed.trim_matches('"').trim();
    if unquoted.is_empty() {
        Vec::new()
    } else {
        vec![unquoted.to_string()]
    }
}

pub fn load_recipe_corpus(csv_path: &Path) -> Result<Vec<Recipe>> {
    if !csv_path.exists() {
        return Err(anyhow::anyhow!("Recipe CSV file not found at: {:?}", csv_path));
    }

    let file = std::fs::File::open(csv_path)
        .with_context(|| format!("Failed to open recipe CSV file at {:?}", csv_path))?;
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(file);

    let headers = rdr.headers()?.clone();
    let col = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| anyhow::anyhow!("Column '{}' not found", name))
    };

    let name_idx = col(NAME_COL)?;
    let diet_idx = col(DIET_TYPE_COL)?;
    let meal_idx = col(MEAL_TYPE_COL)?;
    let calories_idx = col(CALORIES_COL)?;
    let fat_idx = col(FAT_COL)?;
    let carb_idx = col(CARB_COL)?;
    let protein_idx = col(PROTEIN_COL)?;
    let fiber_idx = col(FIBER_COL)?;
    let sugar_idx = col(SUGAR_COL)?;
    let sodium_idx = col(SODIUM_COL)?;
    let instructions_idx = col(INSTRUCTIONS_COL)?;
    let ingredient_parts_idx = col(INGREDIENT_PARTS_COL)?;
    let images_idx = col(IMAGES_COL)?;

    let mut recipes = Vec::new();
    for (row_index, result) in rdr.records().enumerate() {
        let record =
            result.with_context(|| format!("Failed to read record at row index {}", row_index))?;

        let name = record
            .get(name_idx)
            .ok_or_else(|| anyhow::anyhow!("Missing name at row {}", row_index))?
            .trim()
            .to_string();
        if name.is_empty() {
            continue;
        }

        let field = |idx: usize| record.get(idx).unwrap_or("").trim().to_string();

        recipes.push(Recipe {
            name,
            diet_type: field(diet_idx),
            meal_type: field(meal_idx),
            calories: record.get(calories_idx).and_then(parse_optional_f32),
            fat_g: record.get(fat_idx).and_then(parse_optional_f32),
            carbs_g: record.get(carb_idx).and_then(parse_optional_f32),
            protein_g: record.get(protein_idx).and_then(parse_optional_f32),
            fiber_g: record.get(fiber_idx).and_then(parse_optional_f32),
            sugar_g: record.get(sugar_idx).and_then(parse_optional_f32),
            sodium_mg: record.get(sodium_idx).and_then(parse_optional_f32),
            instructions: field(instructions_idx),
            ingredient_parts: field(ingredient_parts_idx),
            images: clean_image_field(&field(images_idx)),
        });
    }

    if recipes.is_empty() {
        return Err(anyhow::anyhow!(
            "No usable recipe rows loaded from {:?}",
            csv_path
        ));
    }

    Ok(recipes)
}
