use anyhow::{Context, Result};
use csv::ReaderBuilder;
use regex::{Regex, RegexBuilder};
use std::collections::HashMap;
use std::path::Path;

// Columns written by the fetch subcommand. Extra columns (sugar, sodium)
// are tolerated and ignored here.
const FOOD_COL: &str = "food";
const CALORIES_COL: &str = "calories";
const PROTEIN_COL: &str = "protein";
const FAT_COL: &str = "fat";
const CARBS_COL: &str = "carbs";
const FIBER_COL: &str = "fiber";

/// Per-100 g nutrient values for one reference food.
#[derive(Debug, Clone, PartialEq)]
pub struct NutrientRecord {
    pub name: String,
    pub calories: f32,
    pub protein_g: f32,
    pub fat_g: f32,
    pub carbs_g: f32,
    pub fiber_g: f32,
}

/// Load-once nutrient reference table. Lookup is by lowercased name; each
/// food also carries a precompiled word-boundary matcher used to spot
/// mentions inside recipe text.
#[derive(Debug)]
pub struct NutrientTable {
    records: Vec<NutrientRecord>,
    index: HashMap<String, usize>,
    matchers: Vec<Regex>,
}

impl NutrientTable {
    pub fn from_records(records: Vec<NutrientRecord>) -> Result<Self> {
        let mut kept: Vec<NutrientRecord> = Vec::with_capacity(records.len());
        let mut index = HashMap::new();
        for record in records {
            let key = record.name.trim().to_lowercase();
            if key.is_empty() || index.contains_key(&key) {
                // Duplicate names keep the first row.
                continue;
            }
            index.insert(key, kept.len());
            kept.push(record);
        }

        let mut matchers = Vec::with_capacity(kept.len());
        for record in &kept {
            let pattern = format!(r"\b{}\b", regex::escape(record.name.trim()));
            let matcher = RegexBuilder::new(&pattern)
                .case_insensitive(true)
                .build()
                .with_context(|| format!("Failed to build matcher for food '{}'", record.name))?;
            matchers.push(matcher);
        }

        Ok(Self {
            records: kept,
            index,
            matchers,
        })
    }

    pub fn load(csv_path: &Path) -> Result<Self> {
        if !csv_path.exists() {
            return Err(anyhow::anyhow!(
                "Nutrient CSV file not found at: {:?}",
                csv_path
            ));
        }

        let file = std::fs::File::open(csv_path)
            .with_context(|| format!("Failed to open nutrient CSV file at {:?}", csv_path))?;
        let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(file);

        let headers = rdr.headers()?.clone();
        let col = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| anyhow::anyhow!("Column '{}' not found", name))
        };

        let food_idx = col(FOOD_COL)?;
        let calories_idx = col(CALORIES_COL)?;
        let protein_idx = col(PROTEIN_COL)?;
        let fat_idx = col(FAT_COL)?;
        let carbs_idx = col(CARBS_COL)?;
        let fiber_idx = col(FIBER_COL)?;

        let mut records = Vec::new();
        for (row_index, result) in rdr.records().enumerate() {
            let record = result
                .with_context(|| format!("Failed to read record at row index {}", row_index))?;

            let name = record.get(food_idx).unwrap_or("").trim().to_string();
            if name.is_empty() {
                continue;
            }

            // Calories must parse; the other fields default to 0 when blank.
            let calories = match record.get(calories_idx).and_then(parse_optional_f32) {
                Some(value) => value,
                None => continue,
            };
            let protein_g = parse_with_default(record.get(protein_idx));
            let fat_g = parse_with_default(record.get(fat_idx));
            let carbs_g = parse_with_default(record.get(carbs_idx));
            let fiber_g = parse_with_default(record.get(fiber_idx));

            let row = NutrientRecord {
                name,
                calories,
                protein_g,
                fat_g,
                carbs_g,
                fiber_g,
            };
            if row.calories < 0.0
                || row.protein_g < 0.0
                || row.fat_g < 0.0
                || row.carbs_g < 0.0
                || row.fiber_g < 0.0
            {
                continue;
            }
            records.push(row);
        }

        if records.is_empty() {
            return Err(anyhow::anyhow!(
                "No usable nutrient rows loaded from {:?}",
                csv_path
            ));
        }

        Self::from_records(records)
    }

    pub fn get(&self, name: &str) -> Option<&NutrientRecord> {
        self.index
            .get(&name.trim().to_lowercase())
            .map(|&i| &self.records[i])
    }

    pub fn records(&self) -> &[NutrientRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the canonical names of every reference food mentioned in
    /// `text` (case-insensitive, whole words), in table order.
    pub fn extract_ingredients(&self, text: &str) -> Vec<String> {
        self.records
            .iter()
            .zip(&self.matchers)
            .filter(|(_, matcher)| matcher.is_match(text))
            .map(|(record, _)| record.name.clone())
            .collect()
    }
}

fn parse_optional_f32(s: &str) -> Option<f32> {
    s.trim().parse::<f32>().ok()
}

fn parse_with_default(field: Option<&str>) -> f32 {
    field.and_then(parse_optional_f32).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn record(name: &str, calories: f32) -> NutrientRecord {
        NutrientRecord {
            name: name.to_string(),
            calories,
            protein_g: 1.0,
            fat_g: 1.0,
            carbs_g: 1.0,
            fiber_g: 1.0,
        }
    }

    fn create_test_csv_file() -> Result<NamedTempFile> {
        let mut file = NamedTempFile::new()?;
        writeln!(
            file,
            "{},{},{},{},{},{},sugar,sodium",
            FOOD_COL, CALORIES_COL, PROTEIN_COL, FAT_COL, CARBS_COL, FIBER_COL
        )?;
        writeln!(file, "chicken breast,165,31,3.6,0,0,0,74")?;
        writeln!(file, "rice,130,2.7,0.3,28,0.4,0.1,1")?;
        writeln!(file, "olive oil,884,0,100,0,0,,2")?;
        writeln!(file, "lentils,116,9,0.4,20,7.9,1.8,2")?;
        writeln!(file, "broken,not_a_number,1,1,1,1,0,0")?;
        writeln!(file, "negative,-5,1,1,1,1,0,0")?;
        writeln!(file, "rice,999,9,9,9,9,9,9")?;
        file.flush()?;
        Ok(file)
    }

    #[test]
    fn test_load_nutrient_table_success() -> Result<()> {
        let file = create_test_csv_file()?;
        let table = NutrientTable::load(file.path())?;

        // broken + negative rows dropped, duplicate rice keeps the first.
        assert_eq!(table.len(), 4);
        assert_eq!(table.get("rice").unwrap().calories, 130.0);
        assert_eq!(table.get("RICE").unwrap().calories, 130.0);
        assert_eq!(table.get(" Olive Oil ").unwrap().fat_g, 100.0);
        // Blank fiber defaults to 0.
        assert_eq!(table.get("olive oil").unwrap().fiber_g, 0.0);
        assert!(table.get("quinoa").is_none());
        Ok(())
    }

    #[test]
    fn test_load_nutrient_table_missing_column() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "{},{}", FOOD_COL, CALORIES_COL)?;
        writeln!(file, "rice,130")?;
        file.flush()?;

        let result = NutrientTable::load(file.path());
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains(&format!("Column '{}' not found", PROTEIN_COL)));
        Ok(())
    }

    #[test]
    fn test_load_nutrient_table_no_usable_rows() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(
            file,
            "{},{},{},{},{},{}",
            FOOD_COL, CALORIES_COL, PROTEIN_COL, FAT_COL, CARBS_COL, FIBER_COL
        )?;
        writeln!(file, "ghost,,1,1,1,1")?;
        file.flush()?;

        let result = NutrientTable::load(file.path());
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("No usable nutrient rows"));
        Ok(())
    }

    #[test]
    fn test_extract_ingredients_word_boundaries() -> Result<()> {
        let table = NutrientTable::from_records(vec![
            record("rice", 130.0),
            record("chicken breast", 165.0),
            record("olive oil", 884.0),
        ])?;

        let found =
            table.extract_ingredients("Grill the Chicken Breast, serve over fried rice.");
        assert_eq!(found, vec!["rice".to_string(), "chicken breast".to_string()]);

        // "price" must not match "rice".
        assert!(table.extract_ingredients("check the price first").is_empty());

        let found = table.extract_ingredients("drizzle with OLIVE OIL");
        assert_eq!(found, vec!["olive oil".to_string()]);
        Ok(())
    }

    #[test]
    fn test_extract_ingredients_deduplicates() -> Result<()> {
        let table = NutrientTable::from_records(vec![record("rice", 130.0)])?;
        let found = table.extract_ingredients("rice with more rice and extra rice");
        assert_eq!(found, vec!["rice".to_string()]);
        Ok(())
    }

    #[test]
    fn test_from_records_skips_duplicates_and_blanks() -> Result<()> {
        let table = NutrientTable::from_records(vec![
            record("rice", 130.0),
            record("  ", 1.0),
            record("Rice", 999.0),
        ])?;
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("rice").unwrap().calories, 130.0);
        Ok(())
    }
}
