use crate::corpus::{NutrientRecord, NutrientTable};
use crate::optim::guidelines::PortionGuidelines;
use crate::optim::solver::{minimize_with_band, BandConstraint, SolveOptions};
use serde::Serialize;

// Optimizer nutrient order: calories, protein, fat, carbs, fiber.
const TARGET_DIMS: usize = 5;
const OBJECTIVE_WEIGHTS: [f32; TARGET_DIMS] = [3.0, 2.0, 1.0, 1.0, 0.5];
const TARGET_EPSILON: f32 = 1e-6;

/// Absolute nutrient targets for one meal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacroTargets {
    pub calories: f32,
    pub protein_g: f32,
    pub fat_g: f32,
    pub carbs_g: f32,
    pub fiber_g: f32,
}

impl MacroTargets {
    /// Macro split for a meal: 25% of energy from protein, 25% from fat,
    /// 50% from carbs (4/9/4 kcal per gram), fiber at 3.5 g per 100 kcal.
    pub fn from_meal_calories(calories: f32) -> Self {
        Self {
            calories,
            protein_g: 0.25 * calories / 4.0,
            fat_g: 0.25 * calories / 9.0,
            carbs_g: 0.50 * calories / 4.0,
            fiber_g: 0.035 * calories,
        }
    }

    fn as_array(&self) -> [f32; TARGET_DIMS] {
        [
            self.calories,
            self.protein_g,
            self.fat_g,
            self.carbs_g,
            self.fiber_g,
        ]
    }
}

/// How the portions were produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PortionOutcome {
    /// Solver finished with the calorie band satisfied.
    Optimized,
    /// Solver missed the band; midpoints scaled toward the target instead.
    ScaledMidpoints,
    /// Numeric breakdown; plain midpoints for the first few ingredients.
    FixedMidpoints,
    /// No ingredient was present in the nutrient table.
    NoValidIngredients,
}

#[derive(Debug, Clone, Serialize)]
pub struct Portion {
    pub ingredient: String,
    pub grams: u32,
    pub display: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MealNutrition {
    pub calories: f32,
    pub protein_g: f32,
    pub fat_g: f32,
    pub carbs_g: f32,
    pub fiber_g: f32,
}

#[derive(Debug, Clone)]
pub struct OptimizedPortions {
    pub portions: Vec<Portion>,
    pub nutrition: MealNutrition,
    pub outcome: PortionOutcome,
}

impl OptimizedPortions {
    fn empty(outcome: PortionOutcome) -> Self {
        Self {
            portions: Vec::new(),
            nutrition: MealNutrition::default(),
            outcome,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OptimizerConfig {
    /// Hard calorie window as fractions of the target.
    pub calorie_band: (f32, f32),
    /// Soft limits on total meal mass in grams.
    pub mass_window_g: (f32, f32),
    pub mass_penalty_weight: f32,
    /// Portions below this many grams are dropped from the rendering.
    pub min_portion_grams: f32,
    /// Ingredient cap for the degraded fallback.
    pub degraded_ingredient_cap: usize,
    pub solver: SolveOptions,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            calorie_band: (0.95, 1.05),
            mass_window_g: (150.0, 600.0),
            mass_penalty_weight: 0.5,
            min_portion_grams: 3.0,
            degraded_ingredient_cap: 3,
            solver: SolveOptions::default(),
        }
    }
}

/// Sizes ingredient portions so the meal lands on its macro targets.
pub struct PortionOptimizer {
    guidelines: PortionGuidelines,
    config: OptimizerConfig,
}

impl Default for PortionOptimizer {
    fn default() -> Self {
        Self::new(PortionGuidelines::default(), OptimizerConfig::default())
    }
}

impl PortionOptimizer {
    pub fn new(guidelines: PortionGuidelines, config: OptimizerConfig) -> Self {
        Self { guidelines, config }
    }

    /// Optimizes gram portions for `ingredient_names` against `targets`.
    /// `mass_window_g` overrides the default soft mass limits when set.
    ///
    /// Never fails: infeasible or numerically broken solves degrade through
    /// the fallback ladder recorded in the returned outcome.
    pub fn optimize(
        &self,
        ingredient_names: &[String],
        table: &NutrientTable,
        targets: &MacroTargets,
        mass_window_g: Option<(f32, f32)>,
    ) -> OptimizedPortions {
        let valid: Vec<&NutrientRecord> = ingredient_names
            .iter()
            .filter_map(|name| table.get(name))
            .collect();
        if valid.is_empty() {
            return OptimizedPortions::empty(PortionOutcome::NoValidIngredients);
        }

        let midpoints_g: Vec<f32> = valid
            .iter()
            .map(|record| {
                self.guidelines
                    .scaled_bounds_for(&record.name, targets.calories)
                    .midpoint()
            })
            .collect();

        if !targets.calories.is_finite() || targets.calories <= 0.0 {
            return self.fixed_midpoint_fallback(&valid, &midpoints_g);
        }

        // Per-100 g nutrient rows; decision variables are in 100 g units.
        let rows: Vec<[f32; TARGET_DIMS]> = valid
            .iter()
            .map(|r| [r.calories, r.protein_g, r.fat_g, r.carbs_g, r.fiber_g])
            .collect();
        let target_array = targets.as_array();
        let mass_window = mass_window_g.unwrap_or(self.config.mass_window_g);
        let mass_weight = self.config.mass_penalty_weight;

        let bounds: Vec<(f32, f32)> = valid
            .iter()
            .map(|record| {
                let range = self
                    .guidelines
                    .scaled_bounds_for(&record.name, targets.calories);
                (range.min_g / 100.0, range.max_g / 100.0)
            })
            .collect();
        let initial: Vec<f32> = midpoints_g.iter().map(|g| g / 100.0).collect();

        let objective = |x: &[f32]| -> f32 {
            let mut total = 0.0_f32;
            for k in 0..TARGET_DIMS {
                let pred: f32 = rows.iter().zip(x).map(|(row, xi)| row[k] * xi).sum();
                let denom = target_array[k] + TARGET_EPSILON;
                let rel = (pred - target_array[k]) / denom;
                total += OBJECTIVE_WEIGHTS[k] * rel * rel;
            }
            total + mass_weight * mass_hinge(x, mass_window)
        };
        let gradient = |x: &[f32], g: &mut [f32]| {
            for gi in g.iter_mut() {
                *gi = 0.0;
            }
            for k in 0..TARGET_DIMS {
                let pred: f32 = rows.iter().zip(x.iter()).map(|(row, xi)| row[k] * xi).sum();
                let denom = target_array[k] + TARGET_EPSILON;
                let common = 2.0 * OBJECTIVE_WEIGHTS[k] * (pred - target_array[k]) / (denom * denom);
                for (gi, row) in g.iter_mut().zip(&rows) {
                    *gi += common * row[k];
                }
            }
            let slope = mass_hinge_slope(x, mass_window);
            if slope != 0.0 {
                for gi in g.iter_mut() {
                    *gi += mass_weight * slope;
                }
            }
        };

        let band = BandConstraint {
            coefficients: rows.iter().map(|row| row[0]).collect(),
            lower: self.config.calorie_band.0 * targets.calories,
            upper: self.config.calorie_band.1 * targets.calories,
        };

        let solution = match minimize_with_band(
            objective,
            gradient,
            &bounds,
            &band,
            &initial,
            &self.config.solver,
        ) {
            Ok(x) => x,
            Err(_) => return self.fixed_midpoint_fallback(&valid, &midpoints_g),
        };

        let realized_cal = band.value(&solution);
        let slack = 1e-3 * targets.calories;
        if realized_cal >= band.lower - slack && realized_cal <= band.upper + slack {
            let grams: Vec<f32> = solution.iter().map(|x| x * 100.0).collect();
            self.render(&valid, &grams, PortionOutcome::Optimized)
        } else {
            self.scaled_midpoint_fallback(&valid, &midpoints_g, targets)
        }
    }

    /// Midpoints nudged toward the calorie target by a tightly clamped
    /// uniform factor.
    fn scaled_midpoint_fallback(
        &self,
        valid: &[&NutrientRecord],
        midpoints_g: &[f32],
        targets: &MacroTargets,
    ) -> OptimizedPortions {
        let base_cal: f32 = valid
            .iter()
            .zip(midpoints_g)
            .map(|(record, grams)| record.calories * grams / 100.0)
            .sum();
        let factor = if base_cal > 0.0 {
            (targets.calories / base_cal).max(0.95).min(1.05)
        } else {
            1.0
        };
        let grams: Vec<f32> = midpoints_g.iter().map(|g| g * factor).collect();
        self.render(valid, &grams, PortionOutcome::ScaledMidpoints)
    }

    fn fixed_midpoint_fallback(
        &self,
        valid: &[&NutrientRecord],
        midpoints_g: &[f32],
    ) -> OptimizedPortions {
        let cap = self.config.degraded_ingredient_cap.min(valid.len());
        self.render(
            &valid[..cap],
            &midpoints_g[..cap],
            PortionOutcome::FixedMidpoints,
        )
    }

    /// Rounds grams to integers, drops portions below the minimum and sums
    /// the nutrition of what is actually rendered.
    fn render(
        &self,
        valid: &[&NutrientRecord],
        grams: &[f32],
        outcome: PortionOutcome,
    ) -> OptimizedPortions {
        let mut portions = Vec::new();
        let mut nutrition = MealNutrition::default();
        for (record, &raw_grams) in valid.iter().zip(grams) {
            let rounded = raw_grams.round();
            if !(rounded >= self.config.min_portion_grams) {
                continue;
            }
            let scale = rounded / 100.0;
            nutrition.calories += record.calories * scale;
            nutrition.protein_g += record.protein_g * scale;
            nutrition.fat_g += record.fat_g * scale;
            nutrition.carbs_g += record.carbs_g * scale;
            nutrition.fiber_g += record.fiber_g * scale;
            let grams_int = rounded as u32;
            portions.push(Portion {
                ingredient: record.name.clone(),
                grams: grams_int,
                display: format!("{}g {}", grams_int, record.name),
            });
        }
        OptimizedPortions {
            portions,
            nutrition,
            outcome,
        }
    }
}

/// Linear penalty (in 100 g units) for total mass outside the window.
fn mass_hinge(x: &[f32], window_g: (f32, f32)) -> f32 {
    let total_g: f32 = x.iter().sum::<f32>() * 100.0;
    if total_g > window_g.1 {
        (total_g - window_g.1) / 100.0
    } else if total_g < window_g.0 {
        (window_g.0 - total_g) / 100.0
    } else {
        0.0
    }
}

fn mass_hinge_slope(x: &[f32], window_g: (f32, f32)) -> f32 {
    let total_g: f32 = x.iter().sum::<f32>() * 100.0;
    if total_g > window_g.1 {
        1.0
    } else if total_g < window_g.0 {
        -1.0
    } else {
        0.0
    }
}
