/// Per-meal gram ranges for the reference foods. Keys are matched against
/// lowercased ingredient names by longest contained key, so "basmati rice"
/// wins over "rice" when both apply.
const PORTION_BOUNDS: &[(&str, f32, f32)] = &[
    // Grains and dry staples
    ("rice", 40.0, 100.0),
    ("brown rice", 40.0, 100.0),
    ("basmati rice", 40.0, 100.0),
    ("quinoa", 40.0, 90.0),
    ("oats", 30.0, 80.0),
    ("wheat flour", 30.0, 100.0),
    ("semolina", 30.0, 80.0),
    ("barley", 40.0, 90.0),
    ("cornmeal", 30.0, 80.0),
    ("millet", 40.0, 90.0),
    ("bulgur", 40.0, 90.0),
    // Breads
    ("bread", 30.0, 90.0),
    ("white bread", 30.0, 90.0),
    ("whole wheat bread", 30.0, 90.0),
    ("naan", 60.0, 150.0),
    ("roti", 30.0, 90.0),
    ("puri", 30.0, 90.0),
    ("paratha", 50.0, 150.0),
    // Pasta and noodles
    ("pasta", 50.0, 120.0),
    ("noodles", 50.0, 120.0),
    ("rice noodles", 50.0, 120.0),
    ("vermicelli", 40.0, 100.0),
    ("instant noodles", 60.0, 120.0),
    // Vegetables
    ("broccoli", 50.0, 200.0),
    ("mushroom", 50.0, 150.0),
    ("pepper", 30.0, 120.0),
    ("onion", 30.0, 120.0),
    ("tomato", 50.0, 150.0),
    ("eggplant", 50.0, 200.0),
    ("spinach", 30.0, 150.0),
    ("carrot", 40.0, 150.0),
    ("potato", 80.0, 250.0),
    ("sweet potato", 80.0, 250.0),
    ("cabbage", 50.0, 200.0),
    ("cauliflower", 50.0, 200.0),
    ("green peas", 40.0, 150.0),
    ("zucchini", 50.0, 200.0),
    ("beetroot", 40.0, 150.0),
    ("turnip", 40.0, 150.0),
    ("radish", 20.0, 100.0),
    ("okra", 50.0, 150.0),
    ("lettuce", 20.0, 100.0),
    ("kale", 30.0, 120.0),
    ("cucumber", 40.0, 150.0),
    ("pumpkin", 50.0, 200.0),
    ("corn", 40.0, 150.0),
    ("sweet corn", 40.0, 150.0),
    ("asparagus", 50.0, 150.0),
    ("brussels sprouts", 50.0, 150.0),
    ("yam", 80.0, 250.0),
    ("bottle gourd", 50.0, 200.0),
    ("bitter gourd", 50.0, 150.0),
    ("ridge gourd", 50.0, 200.0),
    // Fruits
    ("apple", 80.0, 200.0),
    ("banana", 60.0, 150.0),
    ("orange", 80.0, 200.0),
    ("mango", 80.0, 200.0),
    ("pineapple", 80.0, 200.0),
    ("peach", 80.0, 180.0),
    ("pear", 80.0, 200.0),
    ("grapes", 50.0, 150.0),
    ("kiwi", 50.0, 150.0),
    ("watermelon", 100.0, 300.0),
    ("strawberries", 50.0, 200.0),
    ("raspberries", 50.0, 150.0),
    ("blueberries", 50.0, 150.0),
    ("blackberries", 50.0, 150.0),
    ("papaya", 80.0, 250.0),
    ("guava", 50.0, 150.0),
    ("lemon", 10.0, 50.0),
    ("lime", 10.0, 40.0),
    ("figs", 20.0, 80.0),
    ("dates", 15.0, 50.0),
    ("avocado", 50.0, 150.0),
    ("coconut", 20.0, 80.0),
    ("dragon fruit", 80.0, 200.0),
    ("lychee", 50.0, 150.0),
    ("jackfruit", 80.0, 200.0),
    ("pomegranate", 50.0, 150.0),
    // Meat, poultry, seafood
    ("chicken", 100.0, 250.0),
    ("chicken breast", 100.0, 200.0),
    ("chicken thigh", 100.0, 200.0),
    ("turkey", 100.0, 200.0),
    ("beef", 100.0, 250.0),
    ("beef steak", 120.0, 250.0),
    ("pork", 100.0, 200.0),
    ("duck", 100.0, 200.0),
    ("bacon", 20.0, 60.0),
    ("lamb", 100.0, 200.0),
    ("salmon", 100.0, 200.0),
    ("tuna", 80.0, 180.0),
    ("shrimp", 80.0, 200.0),
    ("sea bass", 100.0, 200.0),
    ("sardines", 60.0, 150.0),
    ("mutton", 100.0, 200.0),
    ("crab", 80.0, 200.0),
    ("lobster", 80.0, 200.0),
    ("anchovies", 20.0, 80.0),
    ("octopus", 80.0, 180.0),
    ("salami", 20.0, 60.0),
    ("sausages", 50.0, 150.0),
    // Eggs and dairy
    ("egg", 50.0, 120.0),
    ("egg yolk", 15.0, 50.0),
    ("egg white", 30.0, 90.0),
    ("milk", 100.0, 250.0),
    ("whole milk", 100.0, 250.0),
    ("skim milk", 100.0, 250.0),
    ("yogurt", 100.0, 250.0),
    ("greek yogurt", 100.0, 200.0),
    ("cheese", 20.0, 60.0),
    ("cottage cheese", 50.0, 150.0),
    ("cream cheese", 15.0, 50.0),
    ("butter", 5.0, 20.0),
    ("ghee", 5.0, 20.0),
    ("milk chocolate", 20.0, 50.0),
    ("paneer", 50.0, 150.0),
    ("evaporated milk", 30.0, 100.0),
    ("condensed milk", 20.0, 60.0),
    // Oils
    ("oil", 5.0, 20.0),
    ("olive oil", 5.0, 20.0),
    ("sunflower oil", 5.0, 20.0),
    ("coconut oil", 5.0, 20.0),
    ("mustard oil", 5.0, 20.0),
    ("canola oil", 5.0, 20.0),
    ("vegetable oil", 5.0, 20.0),
    ("sesame oil", 5.0, 15.0),
    // Legumes and soy
    ("lentils", 30.0, 100.0),
    ("black beans", 30.0, 100.0),
    ("kidney beans", 30.0, 100.0),
    ("chickpeas", 30.0, 100.0),
    ("green gram", 30.0, 100.0),
    ("soybeans", 30.0, 100.0),
    ("tofu", 80.0, 200.0),
    ("tempeh", 80.0, 200.0),
    ("white beans", 30.0, 100.0),
    ("pigeon peas", 30.0, 100.0),
    ("navy beans", 30.0, 100.0),
    ("mung beans", 30.0, 100.0),
    ("split peas", 30.0, 100.0),
    // Nuts and seeds
    ("almonds", 10.0, 40.0),
    ("peanut butter", 15.0, 40.0),
    ("peanuts", 15.0, 40.0),
    ("cashews", 10.0, 40.0),
    ("walnuts", 10.0, 40.0),
    ("hazelnuts", 10.0, 40.0),
    ("pistachios", 10.0, 40.0),
    ("sesame seeds", 5.0, 20.0),
    ("sunflower seeds", 10.0, 30.0),
    ("pumpkin seeds", 10.0, 30.0),
    ("chia seeds", 5.0, 25.0),
    ("flaxseeds", 5.0, 25.0),
    // Sweeteners and spreads
    ("honey", 5.0, 25.0),
    ("sugar", 5.0, 25.0),
    ("jaggery", 5.0, 25.0),
    ("molasses", 5.0, 25.0),
    ("maple syrup", 5.0, 30.0),
    ("jam", 10.0, 30.0),
    // Condiments and sauces
    ("mayonnaise", 5.0, 30.0),
    ("ketchup", 5.0, 30.0),
    ("soy sauce", 5.0, 20.0),
    ("mustard", 5.0, 20.0),
    ("vinegar", 5.0, 20.0),
    ("barbecue sauce", 10.0, 40.0),
    ("sriracha", 5.0, 20.0),
    ("hot sauce", 5.0, 15.0),
    ("tamarind paste", 5.0, 20.0),
    // Aromatics and spices
    ("garlic", 3.0, 15.0),
    ("ginger", 3.0, 15.0),
    ("turmeric", 1.0, 5.0),
    ("coriander powder", 1.0, 6.0),
    ("cumin", 1.0, 5.0),
    ("mustard seeds", 1.0, 5.0),
    ("cardamom", 1.0, 3.0),
    ("cinnamon", 1.0, 5.0),
    ("clove", 1.0, 3.0),
    ("black pepper", 1.0, 5.0),
    ("nutmeg", 1.0, 3.0),
    ("fenugreek", 1.0, 5.0),
    ("fennel", 1.0, 5.0),
    ("bay leaf", 1.0, 2.0),
    ("chili powder", 1.0, 5.0),
    ("red chili", 2.0, 10.0),
    ("mint leaves", 5.0, 20.0),
    ("curry leaves", 2.0, 10.0),
    // Prepared dishes
    ("idli", 80.0, 200.0),
    ("dosa", 80.0, 200.0),
    ("samosa", 50.0, 150.0),
    ("biryani", 150.0, 350.0),
    ("dal", 100.0, 250.0),
    ("khichdi", 150.0, 300.0),
    ("poha", 100.0, 250.0),
    ("upma", 100.0, 250.0),
    ("kheer", 100.0, 200.0),
    ("halwa", 50.0, 150.0),
    ("pakora", 50.0, 150.0),
    ("rajma", 100.0, 250.0),
    ("chole", 100.0, 250.0),
    // Beverages
    ("black coffee", 100.0, 250.0),
    ("coffee with milk", 100.0, 250.0),
    ("tea without milk", 100.0, 250.0),
    ("milk tea", 100.0, 250.0),
    ("orange juice", 100.0, 300.0),
    ("apple juice", 100.0, 300.0),
    ("soft drink", 150.0, 330.0),
    ("cola", 150.0, 330.0),
    ("energy drink", 150.0, 330.0),
    ("beer", 200.0, 500.0),
    ("red wine", 100.0, 250.0),
    ("whiskey", 30.0, 60.0),
    // Snacks and fast food
    ("biscuit", 20.0, 60.0),
    ("crackers", 20.0, 60.0),
    ("pizza", 100.0, 300.0),
    ("burger", 150.0, 300.0),
    ("ice cream", 50.0, 150.0),
    ("chips", 25.0, 80.0),
    ("popcorn", 20.0, 60.0),
    ("chocolate", 20.0, 60.0),
    ("granola bar", 25.0, 70.0),
    ("french fries", 70.0, 150.0),
    ("nachos", 50.0, 150.0),
];

/// Range for ingredients with no category match.
const DEFAULT_BOUNDS: GramRange = GramRange {
    min_g: 30.0,
    max_g: 120.0,
};

// Bound scaling for small and large meals.
const SMALL_MEAL_CALORIES: f32 = 300.0;
const LARGE_MEAL_CALORIES: f32 = 600.0;
const SMALL_MEAL_SCALE: f32 = 0.8;
const LARGE_MEAL_SCALE: f32 = 1.2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GramRange {
    pub min_g: f32,
    pub max_g: f32,
}

impl GramRange {
    pub fn midpoint(&self) -> f32 {
        (self.min_g + self.max_g) / 2.0
    }

    fn scaled(&self, factor: f32) -> GramRange {
        GramRange {
            min_g: self.min_g * factor,
            max_g: self.max_g * factor,
        }
    }
}

/// Gram-range lookup for ingredient portions.
#[derive(Debug, Clone)]
pub struct PortionGuidelines {
    entries: Vec<(String, GramRange)>,
}

impl Default for PortionGuidelines {
    fn default() -> Self {
        Self {
            entries: PORTION_BOUNDS
                .iter()
                .map(|(name, min_g, max_g)| {
                    (
                        name.to_string(),
                        GramRange {
                            min_g: *min_g,
                            max_g: *max_g,
                        },
                    )
                })
                .collect(),
        }
    }
}

impl PortionGuidelines {
    pub fn from_entries(entries: impl IntoIterator<Item = (String, GramRange)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Longest contained key wins; unmatched names get the default range.
    pub fn bounds_for(&self, ingredient: &str) -> GramRange {
        let needle = ingredient.trim().to_lowercase();
        self.entries
            .iter()
            .filter(|(key, _)| needle.contains(key.as_str()))
            .max_by_key(|(key, _)| key.len())
            .map(|(_, range)| *range)
            .unwrap_or(DEFAULT_BOUNDS)
    }

    /// Bounds adjusted for the size of the meal: tightened for light meals,
    /// widened for heavy ones.
    pub fn scaled_bounds_for(&self, ingredient: &str, meal_calorie_target: f32) -> GramRange {
        let range = self.bounds_for(ingredient);
        if meal_calorie_target < SMALL_MEAL_CALORIES {
            range.scaled(SMALL_MEAL_SCALE)
        } else if meal_calorie_target > LARGE_MEAL_CALORIES {
            range.scaled(LARGE_MEAL_SCALE)
        } else {
            range
        }
    }
}
