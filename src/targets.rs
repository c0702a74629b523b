use crate::profile::{Gender, Goal, UserProfile};
use serde::Serialize;

// Activity multipliers applied to BMR (lowercased activity name).
const DEFAULT_ACTIVITY_MULTIPLIERS: &[(&str, f32)] = &[
    ("walking", 1.2),
    ("yoga", 1.3),
    ("dancing", 1.45),
    ("weight training", 1.55),
    ("cycling", 1.6),
    ("basketball", 1.7),
    ("swimming", 1.75),
    ("tennis", 1.75),
    ("running", 1.8),
    ("hiit", 1.9),
];

/// Fallback when the activity is not in the table (sedentary baseline).
const FALLBACK_ACTIVITY_MULTIPLIER: f32 = 1.2;

/// Calorie adjustment applied on top of TDEE for weight loss / gain.
const GOAL_CALORIE_DELTA: f32 = 500.0;

/// Activity name -> TDEE multiplier lookup. The default table covers the
/// activities the recommendation flow knows about; tests swap in smaller
/// tables via `from_entries`.
#[derive(Debug, Clone)]
pub struct ActivityTable {
    entries: Vec<(String, f32)>,
}

impl Default for ActivityTable {
    fn default() -> Self {
        Self::from_entries(
            DEFAULT_ACTIVITY_MULTIPLIERS
                .iter()
                .map(|(name, mult)| (name.to_string(), *mult)),
        )
    }
}

impl ActivityTable {
    pub fn from_entries(entries: impl IntoIterator<Item = (String, f32)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn multiplier_for(&self, activity: &str) -> f32 {
        let needle = activity.trim().to_lowercase();
        self.entries
            .iter()
            .find(|(name, _)| *name == needle)
            .map(|(_, mult)| *mult)
            .unwrap_or(FALLBACK_ACTIVITY_MULTIPLIER)
    }
}

/// Daily energy metrics for one profile, all rounded to 2 decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnergyTargets {
    pub bmr: f32,
    pub tdee: f32,
    pub calorie_target: f32,
    pub bmi: f32,
}

pub(crate) fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

/// Mifflin-St Jeor resting energy expenditure.
pub fn calculate_bmr(gender: Gender, weight_kg: f32, height_cm: f32, age: u32) -> f32 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age as f32;
    match gender {
        Gender::Male => base + 5.0,
        Gender::Female => base - 161.0,
    }
}

pub fn calculate_tdee(bmr: f32, activity_multiplier: f32) -> f32 {
    bmr * activity_multiplier
}

pub fn calorie_target_for_goal(tdee: f32, goal: Goal) -> f32 {
    match goal {
        Goal::WeightLoss => tdee - GOAL_CALORIE_DELTA,
        Goal::Maintain => tdee,
        Goal::WeightGain => tdee + GOAL_CALORIE_DELTA,
    }
}

pub fn calculate_bmi(weight_kg: f32, height_cm: f32) -> f32 {
    let height_m = height_cm / 100.0;
    round2(weight_kg / (height_m * height_m))
}

pub fn bmi_category(bmi: f32) -> &'static str {
    if bmi < 18.5 {
        "Underweight"
    } else if bmi < 25.0 {
        "Normal"
    } else if bmi < 29.9 {
        "Overweight"
    } else {
        "Obese"
    }
}

pub fn compute_energy_targets(profile: &UserProfile, activities: &ActivityTable) -> EnergyTargets {
    let bmr = calculate_bmr(
        profile.gender,
        profile.weight_kg,
        profile.height_cm,
        profile.age,
    );
    let tdee = calculate_tdee(bmr, activities.multiplier_for(&profile.activity_type));
    let calorie_target = calorie_target_for_goal(tdee, profile.goal);
    EnergyTargets {
        bmr: round2(bmr),
        tdee: round2(tdee),
        calorie_target: round2(calorie_target),
        bmi: calculate_bmi(profile.weight_kg, profile.height_cm),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Gender;

    #[test]
    fn test_bmr_male_and_female() {
        // 10*60 + 6.25*175 - 5*30 + 5 = 1548.75
        assert_eq!(calculate_bmr(Gender::Male, 60.0, 175.0, 30), 1548.75);
        assert_eq!(calculate_bmr(Gender::Female, 60.0, 175.0, 30), 1382.75);
    }

    #[test]
    fn test_tdee_uses_activity_multiplier() {
        let table = ActivityTable::default();
        let bmr = calculate_bmr(Gender::Male, 60.0, 175.0, 30);
        assert_eq!(calculate_tdee(bmr, table.multiplier_for("cycling")), 2478.0);
        assert_eq!(calculate_tdee(bmr, table.multiplier_for("HIIT")), 1548.75 * 1.9);
    }

    #[test]
    fn test_unknown_activity_falls_back() {
        let table = ActivityTable::default();
        assert_eq!(table.multiplier_for("skydiving"), 1.2);
        assert_eq!(table.multiplier_for(""), 1.2);
        assert_eq!(table.multiplier_for(" Weight Training "), 1.55);
    }

    #[test]
    fn test_calorie_target_per_goal() {
        assert_eq!(calorie_target_for_goal(2478.0, Goal::Maintain), 2478.0);
        assert_eq!(calorie_target_for_goal(2478.0, Goal::WeightLoss), 1978.0);
        assert_eq!(calorie_target_for_goal(2478.0, Goal::WeightGain), 2978.0);
    }

    #[test]
    fn test_bmi_value_and_rounding() {
        // 60 / 1.75^2 = 19.5918...
        assert_eq!(calculate_bmi(60.0, 175.0), 19.59);
        assert_eq!(calculate_bmi(80.0, 180.0), 24.69);
    }

    #[test]
    fn test_bmi_categories() {
        assert_eq!(bmi_category(18.4), "Underweight");
        assert_eq!(bmi_category(18.5), "Normal");
        assert_eq!(bmi_category(24.95), "Normal");
        assert_eq!(bmi_category(25.0), "Overweight");
        assert_eq!(bmi_category(29.89), "Overweight");
        assert_eq!(bmi_category(29.9), "Obese");
        assert_eq!(bmi_category(35.0), "Obese");
    }

    #[test]
    fn test_compute_energy_targets_end_to_end() {
        let profile = UserProfile {
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
        };
        let targets = compute_energy_targets(&profile, &ActivityTable::default());
        assert_eq!(targets.bmr, 1548.75);
        assert_eq!(targets.tdee, 2478.0);
        assert_eq!(targets.calorie_target, 2478.0);
        assert_eq!(targets.bmi, 19.59);

        let mut loss_profile = profile.clone();
        loss_profile.goal = Goal::WeightLoss;
        assert_eq!(
            compute_energy_targets(&loss_profile, &ActivityTable::default()).calorie_target,
            1978.0
        );
        let mut gain_profile = profile;
        gain_profile.goal = Goal::WeightGain;
        assert_eq!(
            compute_energy_targets(&gain_profile, &ActivityTable::default()).calorie_target,
            2978.0
        );
    }
}
