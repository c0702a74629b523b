use serde::{Deserialize, Serialize};

pub const FDC_SEARCH_URL: &str = "https://api.nal.usda.gov/fdc/v1/foods/search";

// Nutrient names as they appear in FDC search responses. Energy shows up
// under two names depending on the data type of the matched food.
pub const ENERGY: &str = "Energy";
pub const ENERGY_KCAL: &str = "Energy (kcal)";
pub const PROTEIN: &str = "Protein";
pub const TOTAL_FAT: &str = "Total lipid (fat)";
pub const CARBOHYDRATE: &str = "Carbohydrate, by difference";
pub const FIBER: &str = "Fiber, total dietary";
pub const SUGARS: &str = "Sugars, total including NLEA";
pub const SODIUM: &str = "Sodium, Na";

/// Foods queried when rebuilding the nutrient reference CSV. The portion
/// guideline table covers the same names, so every fetched row can also
/// be bounded during optimization.
pub const REFERENCE_FOODS: &[&str] = &[
    "rice",
    "brown rice",
    "basmati rice",
    "quinoa",
    "oats",
    "wheat flour",
    "semolina",
    "barley",
    "cornmeal",
    "millet",
    "bulgur",
    "bread",
    "white bread",
    "whole wheat bread",
    "pasta",
    "noodles",
    "rice noodles",
    "vermicelli",
    "broccoli",
    "mushroom",
    "pepper",
    "onion",
    "tomato",
    "eggplant",
    "spinach",
    "carrot",
    "potato",
    "sweet potato",
    "cabbage",
    "cauliflower",
    "green peas",
    "zucchini",
    "beetroot",
    "turnip",
    "radish",
    "okra",
    "lettuce",
    "kale",
    "cucumber",
    "pumpkin",
    "corn",
    "sweet corn",
    "asparagus",
    "brussels sprouts",
    "yam",
    "bottle gourd",
    "bitter gourd",
    "ridge gourd",
    "apple",
    "banana",
    "orange",
    "mango",
    "pineapple",
    "peach",
    "pear",
    "grapes",
    "kiwi",
    "watermelon",
    "strawberries",
    "raspberries",
    "blueberries",
    "blackberries",
    "papaya",
    "guava",
    "lemon",
    "lime",
    "figs",
    "dates",
    "avocado",
    "coconut",
    "dragon fruit",
    "lychee",
    "jackfruit",
    "pomegranate",
    "chicken breast",
    "chicken",
    "chicken thigh",
    "turkey",
    "beef",
    "beef steak",
    "pork",
    "duck",
    "bacon",
    "lamb",
    "salmon",
    "tuna",
    "shrimp",
    "sea bass",
    "sardines",
    "mutton",
    "crab",
    "lobster",
    "anchovies",
    "octopus",
    "egg",
    "egg yolk",
    "egg white",
    "milk",
    "whole milk",
    "skim milk",
    "yogurt",
    "greek yogurt",
    "cheese",
    "cottage cheese",
    "cream cheese",
    "butter",
    "ghee",
    "milk chocolate",
    "paneer",
    "evaporated milk",
    "condensed milk",
    "oil",
    "olive oil",
    "sunflower oil",
    "coconut oil",
    "mustard oil",
    "canola oil",
    "vegetable oil",
    "sesame oil",
    "lentils",
    "black beans",
    "kidney beans",
    "chickpeas",
    "green gram",
    "soybeans",
    "tofu",
    "tempeh",
    "white beans",
    "pigeon peas",
    "navy beans",
    "mung beans",
    "split peas",
    "almonds",
    "peanut butter",
    "peanuts",
    "cashews",
    "walnuts",
    "hazelnuts",
    "pistachios",
    "sesame seeds",
    "sunflower seeds",
    "pumpkin seeds",
    "chia seeds",
    "flaxseeds",
    "honey",
    "sugar",
    "jaggery",
    "molasses",
    "maple syrup",
    "jam",
    "mayonnaise",
    "ketchup",
    "soy sauce",
    "mustard",
    "vinegar",
    "barbecue sauce",
    "sriracha",
    "hot sauce",
    "tamarind paste",
    "garlic",
    "ginger",
    "turmeric",
    "coriander powder",
    "cumin",
    "mustard seeds",
    "cardamom",
    "cinnamon",
    "clove",
    "black pepper",
    "nutmeg",
    "fenugreek",
    "fennel",
    "bay leaf",
    "chili powder",
    "red chili",
    "mint leaves",
    "curry leaves",
    "idli",
    "dosa",
    "samosa",
    "puri",
    "paratha",
    "naan",
    "biryani",
    "dal",
    "khichdi",
    "poha",
    "upma",
    "kheer",
    "halwa",
    "pakora",
    "rajma",
    "chole",
    "roti",
    "black coffee",
    "coffee with milk",
    "tea without milk",
    "milk tea",
    "orange juice",
    "apple juice",
    "soft drink",
    "cola",
    "energy drink",
    "beer",
    "red wine",
    "whiskey",
    "salami",
    "sausages",
    "biscuit",
    "crackers",
    "pizza",
    "burger",
    "ice cream",
    "chips",
    "popcorn",
    "chocolate",
    "granola bar",
    "instant noodles",
    "french fries",
    "nachos",
];

#[derive(Debug, Clone, Deserialize)]
pub struct FoodSearchResponse {
    #[serde(default)]
    pub foods: Vec<FoundFood>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FoundFood {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "foodNutrients", default)]
    pub food_nutrients: Vec<FoundNutrient>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FoundNutrient {
    #[serde(rename = "nutrientName")]
    pub nutrient_name: String,
    #[serde(default)]
    pub value: Option<f32>,
}

impl FoundFood {
    pub fn nutrient(&self, name: &str) -> Option<f32> {
        self.food_nutrients
            .iter()
            .find(|nutrient| nutrient.nutrient_name == name)
            .and_then(|nutrient| nutrient.value)
    }

    pub fn energy_kcal(&self) -> Option<f32> {
        self.nutrient(ENERGY).or_else(|| self.nutrient(ENERGY_KCAL))
    }
}

/// One row of the nutrient reference CSV, keyed by the query string
/// rather than the USDA description so lookup names stay stable.
#[derive(Debug, Clone, Serialize)]
pub struct NutrientCsvRow {
    pub food: String,
    pub calories: Option<f32>,
    pub protein: Option<f32>,
    pub fat: Option<f32>,
    pub carbs: Option<f32>,
    pub fiber: Option<f32>,
    pub sugar: Option<f32>,
    pub sodium: Option<f32>,
}

impl NutrientCsvRow {
    pub fn from_search_hit(query: &str, food: &FoundFood) -> Self {
        Self {
            food: query.to_string(),
            calories: food.energy_kcal(),
            protein: food.nutrient(PROTEIN),
            fat: food.nutrient(TOTAL_FAT),
            carbs: food.nutrient(CARBOHYDRATE),
            fiber: food.nutrient(FIBER),
            sugar: food.nutrient(SUGARS),
            sodium: food.nutrient(SODIUM),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RESPONSE: &str = r#"{
        "totalHits": 5432,
        "foods": [
            {
                "fdcId": 169756,
                "description": "Rice, white, long-grain, regular, raw",
                "foodNutrients": [
                    {"nutrientName": "Energy", "value": 365.0, "unitName": "KCAL"},
                    {"nutrientName": "Protein", "value": 7.13, "unitName": "G"},
                    {"nutrientName": "Total lipid (fat)", "value": 0.66, "unitName": "G"},
                    {"nutrientName": "Carbohydrate, by difference", "value": 79.9, "unitName": "G"},
                    {"nutrientName": "Fiber, total dietary", "value": 1.3, "unitName": "G"},
                    {"nutrientName": "Sodium, Na", "value": 5.0, "unitName": "MG"}
                ]
            }
        ]
    }"#;

    #[test]
    fn test_parses_search_response() {
        let parsed: FoodSearchResponse = serde_json::from_str(SAMPLE_RESPONSE).unwrap();
        assert_eq!(parsed.foods.len(), 1);
        let food = &parsed.foods[0];
        assert_eq!(
            food.description.as_deref(),
            Some("Rice, white, long-grain, regular, raw")
        );
        assert_eq!(food.nutrient(PROTEIN), Some(7.13));
        assert_eq!(food.nutrient("Nonexistent"), None);
    }

    #[test]
    fn test_energy_falls_back_to_kcal_name() {
        let parsed: FoodSearchResponse = serde_json::from_str(
            r#"{"foods": [{"description": "x", "foodNutrients": [
                {"nutrientName": "Energy (kcal)", "value": 52.0}
            ]}]}"#,
        )
        .unwrap();
        assert_eq!(parsed.foods[0].energy_kcal(), Some(52.0));
    }

    #[test]
    fn test_csv_row_copies_all_tracked_nutrients() {
        let parsed: FoodSearchResponse = serde_json::from_str(SAMPLE_RESPONSE).unwrap();
        let row = NutrientCsvRow::from_search_hit("rice", &parsed.foods[0]);
        assert_eq!(row.food, "rice");
        assert_eq!(row.calories, Some(365.0));
        assert_eq!(row.carbs, Some(79.9));
        assert_eq!(row.sodium, Some(5.0));
        // Sugar is absent from the sample and stays empty in the CSV.
        assert_eq!(row.sugar, None);
    }

    #[test]
    fn test_reference_food_list_is_complete() {
        assert_eq!(REFERENCE_FOODS.len(), 220);
        assert!(REFERENCE_FOODS.contains(&"rice"));
        assert!(REFERENCE_FOODS.contains(&"nachos"));
        // No query should be blank or carry stray whitespace.
        for food in REFERENCE_FOODS {
            assert_eq!(*food, food.trim());
            assert!(!food.is_empty());
        }
    }
}
