//! Output types for a finished recommendation run.
//!
//! `DietPlanResult` is the JSON surface of the whole pipeline. Metric
//! fields are optional so the short-circuit outcomes (no candidates at
//! all, or none with complete macros) serialize as explicit nulls
//! rather than fabricated numbers.

use serde::Serialize;

use crate::corpus::Recipe;
use crate::optim::{MealNutrition, Portion};
use crate::targets::{round2, EnergyTargets};

/// One accepted meal with its optimized portions.
///
/// Realized macros come from the portion optimizer; sugar and sodium
/// are per-serving values carried over from the recipe row because the
/// reference table does not track them per ingredient.
#[derive(Debug, Clone, Serialize)]
pub struct OptimizedMeal {
    pub name: String,
    pub target_calories: f32,
    pub calories: f32,
    pub protein_g: f32,
    pub fat_g: f32,
    pub carbs_g: f32,
    pub fiber_g: f32,
    pub sugar_g: Option<f32>,
    pub sodium_mg: Option<f32>,
    pub image: String,
    pub portions: Vec<String>,
    pub instructions: String,
    pub calorie_match_pct: f32,
}

impl OptimizedMeal {
    pub fn from_parts(
        recipe: &Recipe,
        target_calories: f32,
        nutrition: &MealNutrition,
        portions: &[Portion],
        instructions: String,
    ) -> Self {
        let calorie_match_pct = if target_calories > 0.0 {
            round2(nutrition.calories / target_calories * 100.0)
        } else {
            0.0
        };
        Self {
            name: recipe.name.clone(),
            target_calories: round2(target_calories),
            calories: round2(nutrition.calories),
            protein_g: round2(nutrition.protein_g),
            fat_g: round2(nutrition.fat_g),
            carbs_g: round2(nutrition.carbs_g),
            fiber_g: round2(nutrition.fiber_g),
            sugar_g: recipe.sugar_g,
            sodium_mg: recipe.sodium_mg,
            image: recipe.primary_image_url(),
            portions: portions.iter().map(|p| p.display.clone()).collect(),
            instructions,
            calorie_match_pct,
        }
    }
}

/// Complete pipeline output.
#[derive(Debug, Clone, Serialize)]
pub struct DietPlanResult {
    pub bmr: Option<f32>,
    pub bmi: Option<f32>,
    pub tdee: Option<f32>,
    pub calorie_target: Option<f32>,
    pub actual_calories: Option<f32>,
    pub diet_plan: Vec<OptimizedMeal>,
    pub calorie_accuracy: Option<f32>,
}

impl DietPlanResult {
    /// Shape returned when filtering leaves no candidates at all.
    pub fn empty() -> Self {
        Self {
            bmr: None,
            bmi: None,
            tdee: None,
            calorie_target: None,
            actual_calories: None,
            diet_plan: Vec::new(),
            calorie_accuracy: None,
        }
    }

    /// Metrics computed but no candidate survived macro coercion.
    pub fn with_targets_only(targets: &EnergyTargets) -> Self {
        Self::assemble(targets, Vec::new(), 0.0)
    }

    pub fn assemble(targets: &EnergyTargets, meals: Vec<OptimizedMeal>, total_calories: f32) -> Self {
        let actual = round2(total_calories);
        let accuracy = if targets.calorie_target > 0.0 {
            Some(round2(actual / targets.calorie_target * 100.0))
        } else {
            None
        };
        Self {
            bmr: Some(targets.bmr),
            bmi: Some(targets.bmi),
            tdee: Some(targets.tdee),
            calorie_target: Some(targets.calorie_target),
            actual_calories: Some(actual),
            diet_plan: meals,
            calorie_accuracy: accuracy,
        }
    }
}
