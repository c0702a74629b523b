use crate::corpus::Recipe;
use crate::profile::{HealthCondition, UserProfile};

/// Diabetes predicate: per-serving sugar ceiling in grams.
const MAX_SUGAR_G: f32 = 10.0;
/// Hypertension predicate: per-serving sodium ceiling in milligrams.
const MAX_SODIUM_MG: f32 = 400.0;
/// Asthma predicate: instruction text must not mention this marker.
const ASTHMA_MARKER: &str = "dairy";

/// Keeps the recipes compatible with the profile's diet type, meal type,
/// health conditions, allergies and exclusion list. Every stage is a pure
/// per-recipe predicate, so the stages commute and re-filtering a filtered
/// set is a no-op.
pub fn filter_candidates<'a>(corpus: &'a [Recipe], profile: &UserProfile) -> Vec<&'a Recipe> {
    corpus
        .iter()
        .filter(|recipe| matches_profile(recipe, profile))
        .collect()
}

pub fn matches_profile(recipe: &Recipe, profile: &UserProfile) -> bool {
    text_matches(&recipe.diet_type, &profile.diet_type)
        && text_matches(&recipe.meal_type, &profile.meal_type)
        && satisfies_all_conditions(recipe, profile)
        && !is_excluded(recipe, &profile.exclude_recipe_names)
}

fn text_matches(recipe_value: &str, profile_value: &str) -> bool {
    recipe_value.trim().eq_ignore_ascii_case(profile_value.trim())
}

fn satisfies_all_conditions(recipe: &Recipe, profile: &UserProfile) -> bool {
    profile
        .health_conditions
        .iter()
        .all(|condition| satisfies_condition(recipe, *condition, &profile.allergies))
}

/// A recipe with a missing sugar or sodium value fails the corresponding
/// predicate rather than passing silently.
pub fn satisfies_condition(
    recipe: &Recipe,
    condition: HealthCondition,
    allergies: &[String],
) -> bool {
    match condition {
        HealthCondition::Diabetes => recipe.sugar_g.map_or(false, |sugar| sugar <= MAX_SUGAR_G),
        HealthCondition::Hypertension => recipe
            .sodium_mg
            .map_or(false, |sodium| sodium <= MAX_SODIUM_MG),
        HealthCondition::Asthma => !recipe
            .instructions
            .to_lowercase()
            .contains(ASTHMA_MARKER),
        HealthCondition::Allergy => {
            let haystack = recipe.searchable_text().to_lowercase();
            allergies.iter().all(|allergen| {
                let needle = allergen.trim().to_lowercase();
                needle.is_empty() || !haystack.contains(&needle)
            })
        }
    }
}

fn is_excluded(recipe: &Recipe, excluded_names: &[String]) -> bool {
    excluded_names
        .iter()
        .any(|name| text_matches(&recipe.name, name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{Gender, Goal};

    fn recipe(name: &str, diet: &str, meal: &str) -> Recipe {
        Recipe {
            name: name.to_string(),
            diet_type: diet.to_string(),
            meal_type: meal.to_string(),
            calories: Some(400.0),
            fat_g: Some(10.0),
            carbs_g: Some(50.0),
            protein_g: Some(20.0),
            fiber_g: Some(5.0),
            sugar_g: Some(5.0),
            sodium_mg: Some(200.0),
            instructions: "Cook everything well.".to_string(),
            ingredient_parts: "rice; beans".to_string(),
            images: vec![],
        }
    }

    fn profile() -> UserProfile {
        UserProfile {
            age: 30,
            gender: Gender::Male,
            height_cm: 175.0,
            weight_kg: 60.0,
            activity_type: "cycling".to_string(),
            goal: Goal::Maintain,
            diet_type: "vegetarian".to_string(),
            meal_type: "lunch".to_string(),
            health_conditions: vec![],
            allergies: vec![],
            exclude_recipe_names: vec![],
            meal_frequency: 3,
        }
    }

    #[test]
    fn test_diet_and_meal_type_equality() {
        let corpus = vec![
            recipe("A", "Vegetarian", "Lunch"),
            recipe("B", "vegan", "lunch"),
            recipe("C", "vegetarian", "dinner"),
        ];
        let kept = filter_candidates(&corpus, &profile());
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "A");
    }

    #[test]
    fn test_diabetes_sugar_ceiling() {
        let mut sweet = recipe("Sweet", "vegetarian", "lunch");
        sweet.sugar_g = Some(10.5);
        let mut unknown = recipe("Unknown", "vegetarian", "lunch");
        unknown.sugar_g = None;
        let ok = recipe("Ok", "vegetarian", "lunch");

        let mut p = profile();
        p.health_conditions = vec![HealthCondition::Diabetes];
        let corpus = vec![sweet, unknown, ok];
        let kept = filter_candidates(&corpus, &p);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "Ok");
    }

    #[test]
    fn test_hypertension_sodium_ceiling() {
        let mut salty = recipe("Salty", "vegetarian", "lunch");
        salty.sodium_mg = Some(401.0);
        let boundary = {
            let mut r = recipe("Boundary", "vegetarian", "lunch");
            r.sodium_mg = Some(400.0);
            r
        };

        let mut p = profile();
        p.health_conditions = vec![HealthCondition::Hypertension];
        let corpus = vec![salty, boundary];
        let kept = filter_candidates(&corpus, &p);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "Boundary");
    }

    #[test]
    fn test_asthma_drops_dairy_mentions() {
        let mut creamy = recipe("Creamy", "vegetarian", "lunch");
        creamy.instructions = "Stir in the Dairy cream.".to_string();
        let plain = recipe("Plain", "vegetarian", "lunch");

        let mut p = profile();
        p.health_conditions = vec![HealthCondition::Asthma];
        let corpus = vec![creamy, plain];
        let kept = filter_candidates(&corpus, &p);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "Plain");
    }

    #[test]
    fn test_allergy_substring_over_instructions_and_ingredients() {
        let mut nutty = recipe("Nutty", "vegetarian", "lunch");
        nutty.ingredient_parts = "peanut butter; bread".to_string();
        let mut hidden = recipe("Hidden", "vegetarian", "lunch");
        hidden.instructions = "Sprinkle crushed Peanuts on top.".to_string();
        let safe = recipe("Safe", "vegetarian", "lunch");

        let mut p = profile();
        p.health_conditions = vec![HealthCondition::Allergy];
        p.allergies = vec!["peanut".to_string()];
        let corpus = vec![nutty, hidden, safe];
        let kept = filter_candidates(&corpus, &p);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "Safe");
    }

    #[test]
    fn test_blank_allergen_is_ignored() {
        let r = recipe("Any", "vegetarian", "lunch");
        assert!(satisfies_condition(
            &r,
            HealthCondition::Allergy,
            &["  ".to_string()]
        ));
    }

    #[test]
    fn test_exclusion_list_by_name() {
        let corpus = vec![
            recipe("Lentil Salad", "vegetarian", "lunch"),
            recipe("Bean Bowl", "vegetarian", "lunch"),
        ];
        let mut p = profile();
        p.exclude_recipe_names = vec!["lentil salad".to_string()];
        let kept = filter_candidates(&corpus, &p);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "Bean Bowl");
    }

    #[test]
    fn test_condition_order_does_not_matter() {
        let mut risky = recipe("Risky", "vegetarian", "lunch");
        risky.sugar_g = Some(20.0);
        risky.sodium_mg = Some(500.0);
        let corpus = vec![risky, recipe("Fine", "vegetarian", "lunch")];

        let mut forward = profile();
        forward.health_conditions = vec![HealthCondition::Diabetes, HealthCondition::Hypertension];
        let mut reversed = profile();
        reversed.health_conditions = vec![HealthCondition::Hypertension, HealthCondition::Diabetes];

        let kept_forward: Vec<String> = filter_candidates(&corpus, &forward)
            .iter()
            .map(|r| r.name.clone())
            .collect();
        let kept_reversed: Vec<String> = filter_candidates(&corpus, &reversed)
            .iter()
            .map(|r| r.name.clone())
            .collect();
        assert_eq!(kept_forward, kept_reversed);
        assert_eq!(kept_forward, vec!["Fine".to_string()]);
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let corpus = vec![
            recipe("A", "vegetarian", "lunch"),
            recipe("B", "vegan", "lunch"),
        ];
        let mut p = profile();
        p.health_conditions = vec![HealthCondition::Diabetes];

        let once: Vec<Recipe> = filter_candidates(&corpus, &p)
            .into_iter()
            .cloned()
            .collect();
        let twice: Vec<Recipe> = filter_candidates(&once, &p)
            .into_iter()
            .cloned()
            .collect();
        assert_eq!(once.len(), twice.len());
        assert!(once
            .iter()
            .zip(&twice)
            .all(|(a, b)| a.name == b.name));
    }
}
