use crate::corpus::Recipe;
use rayon::prelude::*;
use std::cmp::Ordering;

/// Dimensions of the ranking vector, in order: calories, fat, carbs,
/// protein, fiber.
pub const NUTRIENT_DIMS: usize = 5;

/// Daily fiber reference used in the target vector (grams). Unlike the
/// macros it is not derived from the calorie target.
const FIBER_TARGET_G: f32 = 10.0;

/// Daily target vector for a calorie target: 25% of calories from fat,
/// 50% from carbs, 25% from protein, converted to grams (9 kcal/g fat,
/// 4 kcal/g carbs and protein).
pub fn target_nutrient_vector(calorie_target: f32) -> [f32; NUTRIENT_DIMS] {
    [
        calorie_target,
        0.25 * calorie_target / 9.0,
        0.50 * calorie_target / 4.0,
        0.25 * calorie_target / 4.0,
        FIBER_TARGET_G,
    ]
}

/// Per-serving ranking vector; `None` when any of the five nutrients is
/// missing.
pub fn recipe_vector(recipe: &Recipe) -> Option<[f32; NUTRIENT_DIMS]> {
    Some([
        recipe.calories?,
        recipe.fat_g?,
        recipe.carbs_g?,
        recipe.protein_g?,
        recipe.fiber_g?,
    ])
}

/// Column-wise min-max scaler fitted on the candidate matrix only. The
/// target vector is transformed with the candidates' statistics, so its
/// scaled values may fall outside [0, 1].
#[derive(Debug, Clone)]
pub struct MinMaxScaler {
    mins: [f32; NUTRIENT_DIMS],
    maxs: [f32; NUTRIENT_DIMS],
}

impl MinMaxScaler {
    pub fn fit(rows: &[[f32; NUTRIENT_DIMS]]) -> Self {
        let mut mins = [f32::INFINITY; NUTRIENT_DIMS];
        let mut maxs = [f32::NEG_INFINITY; NUTRIENT_DIMS];
        for row in rows {
            for dim in 0..NUTRIENT_DIMS {
                mins[dim] = mins[dim].min(row[dim]);
                maxs[dim] = maxs[dim].max(row[dim]);
            }
        }
        Self { mins, maxs }
    }

    pub fn transform(&self, row: &[f32; NUTRIENT_DIMS]) -> [f32; NUTRIENT_DIMS] {
        let mut scaled = [0.0_f32; NUTRIENT_DIMS];
        for dim in 0..NUTRIENT_DIMS {
            let range = self.maxs[dim] - self.mins[dim];
            // A constant column carries no signal; scale it to 0.
            scaled[dim] = if range > 0.0 {
                (row[dim] - self.mins[dim]) / range
            } else {
                0.0
            };
        }
        scaled
    }
}

fn magnitude(v: &[f32; NUTRIENT_DIMS]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

fn cosine_similarity(a: &[f32; NUTRIENT_DIMS], b: &[f32; NUTRIENT_DIMS]) -> f32 {
    let mag_a = magnitude(a);
    let mag_b = magnitude(b);
    if mag_a == 0.0 || mag_b == 0.0 {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    dot / (mag_a * mag_b)
}

#[derive(Debug, Clone)]
pub struct ScoredRecipe<'a> {
    pub recipe: &'a Recipe,
    pub score: f32,
}

/// Ranks candidates by cosine similarity between their scaled nutrient
/// vectors and the scaled target. Candidates missing any ranking nutrient
/// are skipped. The sort is stable: ties keep corpus order.
pub fn rank_candidates<'a>(
    candidates: &[&'a Recipe],
    calorie_target: f32,
) -> Vec<ScoredRecipe<'a>> {
    let usable: Vec<(&Recipe, [f32; NUTRIENT_DIMS])> = candidates
        .iter()
        .filter_map(|recipe| recipe_vector(recipe).map(|vector| (*recipe, vector)))
        .collect();
    if usable.is_empty() {
        return Vec::new();
    }

    let rows: Vec<[f32; NUTRIENT_DIMS]> = usable.iter().map(|(_, vector)| *vector).collect();
    let scaler = MinMaxScaler::fit(&rows);
    let scaled_target = scaler.transform(&target_nutrient_vector(calorie_target));

    let mut scored: Vec<ScoredRecipe<'a>> = usable
        .par_iter()
        .map(|(recipe, vector)| ScoredRecipe {
            recipe: *recipe,
            score: cosine_similarity(&scaled_target, &scaler.transform(vector)),
        })
        .collect();

    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    scored
}
