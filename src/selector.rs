//! Greedy meal selection over the ranked candidate list.
//!
//! The selector walks the ranking once, top score first. Each candidate
//! gets one shot: it is portion-optimized against its share of the
//! remaining calories and either accepted or passed over for good.

use crate::corpus::NutrientTable;
use crate::instructions;
use crate::optim::{MacroTargets, PortionOptimizer};
use crate::plan::OptimizedMeal;
use crate::ranker::ScoredRecipe;

#[derive(Debug, Clone)]
pub struct SelectorConfig {
    /// Fraction of the daily target treated as close enough to stop.
    pub tolerance: f32,
    /// Floor for one meal's calorie share.
    pub meal_calories_min: f32,
    /// Ceiling for one meal's calorie share.
    pub meal_calories_max: f32,
    /// A meal is kept only when its realized calories land in this band
    /// around the per-meal target.
    pub acceptance_band: (f32, f32),
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            tolerance: 0.05,
            meal_calories_min: 200.0,
            meal_calories_max: 800.0,
            acceptance_band: (0.95, 1.05),
        }
    }
}

/// Meals accepted by one selection pass plus their calorie sum.
#[derive(Debug, Default)]
pub struct SelectionOutcome {
    pub meals: Vec<OptimizedMeal>,
    pub total_calories: f32,
}

pub struct MealSelector<'a> {
    table: &'a NutrientTable,
    optimizer: &'a PortionOptimizer,
    config: SelectorConfig,
}

impl<'a> MealSelector<'a> {
    pub fn new(
        table: &'a NutrientTable,
        optimizer: &'a PortionOptimizer,
        config: SelectorConfig,
    ) -> Self {
        Self {
            table,
            optimizer,
            config,
        }
    }

    pub fn select(
        &self,
        ranked: &[ScoredRecipe<'_>],
        calorie_target: f32,
        max_meals: u32,
        progress: &impl Fn(String),
    ) -> SelectionOutcome {
        let mut outcome = SelectionOutcome::default();
        for scored in ranked {
            if self.is_satisfied(&outcome, calorie_target, max_meals) {
                break;
            }
            let remaining = calorie_target - outcome.total_calories;
            let meals_left = max_meals - outcome.meals.len() as u32;
            let sub_target = (remaining / meals_left as f32)
                .max(self.config.meal_calories_min)
                .min(self.config.meal_calories_max);

            let recipe = scored.recipe;
            let ingredients = self.table.extract_ingredients(&recipe.searchable_text());
            if ingredients.is_empty() {
                progress(format!(
                    " > Skipping '{}': no reference ingredients found.",
                    recipe.name
                ));
                continue;
            }

            let targets = MacroTargets::from_meal_calories(sub_target);
            let optimized = self.optimizer.optimize(&ingredients, self.table, &targets, None);
            let realized = optimized.nutrition.calories;
            let (lower, upper) = self.config.acceptance_band;
            let in_band = realized >= lower * sub_target && realized <= upper * sub_target;
            if optimized.portions.is_empty() || !in_band {
                progress(format!(
                    " > Skipping '{}': {:.0} kcal realized vs {:.0} kcal wanted.",
                    recipe.name, realized, sub_target
                ));
                continue;
            }

            progress(format!(
                " > Accepted '{}' at {:.0} kcal ({} portions).",
                recipe.name,
                realized,
                optimized.portions.len()
            ));
            let rendered =
                instructions::inject_quantities(&recipe.instructions, &optimized.portions);
            outcome.meals.push(OptimizedMeal::from_parts(
                recipe,
                sub_target,
                &optimized.nutrition,
                &optimized.portions,
                rendered,
            ));
            outcome.total_calories += realized;
        }
        outcome
    }

    fn is_satisfied(&self, outcome: &SelectionOutcome, calorie_target: f32, max_meals: u32) -> bool {
        outcome.meals.len() as u32 >= max_meals
            || outcome.total_calories >= (1.0 - self.config.tolerance) * calorie_target
    }
}
