//! End-to-end recommendation pipeline.
//!
//! Stage order matters: candidate filtering runs before any energy math
//! so an impossible profile costs nothing, and the two empty-corpus
//! short-circuits return early with well-defined shapes instead of
//! erroring.

use anyhow::Result;

use crate::corpus::{NutrientTable, Recipe};
use crate::filter::filter_candidates;
use crate::optim::PortionOptimizer;
use crate::plan::DietPlanResult;
use crate::profile::UserProfile;
use crate::ranker::rank_candidates;
use crate::selector::{MealSelector, SelectorConfig};
use crate::targets::{bmi_category, compute_energy_targets, ActivityTable};

pub struct DietPlanner {
    corpus: Vec<Recipe>,
    table: NutrientTable,
    activities: ActivityTable,
    optimizer: PortionOptimizer,
    selector_config: SelectorConfig,
}

impl DietPlanner {
    pub fn new(corpus: Vec<Recipe>, table: NutrientTable) -> Self {
        Self::with_components(
            corpus,
            table,
            ActivityTable::default(),
            PortionOptimizer::default(),
            SelectorConfig::default(),
        )
    }

    pub fn with_components(
        corpus: Vec<Recipe>,
        table: NutrientTable,
        activities: ActivityTable,
        optimizer: PortionOptimizer,
        selector_config: SelectorConfig,
    ) -> Self {
        Self {
            corpus,
            table,
            activities,
            optimizer,
            selector_config,
        }
    }

    pub fn recipe_count(&self) -> usize {
        self.corpus.len()
    }

    /// Runs the whole pipeline for one profile.
    ///
    /// Fails only on an invalid profile. An empty candidate pool after
    /// filtering yields a result with null metrics; a pool that loses
    /// every row to macro coercion yields metrics with an empty plan.
    pub fn recommend(
        &self,
        profile: &UserProfile,
        progress: impl Fn(String),
    ) -> Result<DietPlanResult> {
        profile.validate()?;

        let candidates = filter_candidates(&self.corpus, profile);
        progress(format!(
            " > {} of {} recipes match the profile filters.",
            candidates.len(),
            self.corpus.len()
        ));
        if candidates.is_empty() {
            return Ok(DietPlanResult::empty());
        }

        let energy = compute_energy_targets(profile, &self.activities);
        progress(format!(
            " > BMI {} ({}), BMR {} kcal, daily target {} kcal.",
            energy.bmi,
            bmi_category(energy.bmi),
            energy.bmr,
            energy.calorie_target
        ));

        let complete: Vec<&Recipe> = candidates
            .into_iter()
            .filter(|recipe| recipe.has_complete_macros())
            .collect();
        if complete.is_empty() {
            progress(" > No candidate carries complete nutrition data.".to_string());
            return Ok(DietPlanResult::with_targets_only(&energy));
        }

        let ranked = rank_candidates(&complete, energy.calorie_target);
        progress(format!(
            " > Ranked {} candidates by nutritional fit.",
            ranked.len()
        ));

        let selector = MealSelector::new(&self.table, &self.optimizer, self.selector_config.clone());
        let outcome = selector.select(
            &ranked,
            energy.calorie_target,
            profile.meal_frequency,
            &progress,
        );
        progress(format!(
            " > Planned {} meals totalling {:.0} kcal.",
            outcome.meals.len(),
            outcome.total_calories
        ));

        Ok(DietPlanResult::assemble(
            &energy,
            outcome.meals,
            outcome.total_calories,
        ))
    }
}
