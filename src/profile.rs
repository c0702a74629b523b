use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

// Accepted numeric ranges, inclusive.
const AGE_RANGE: (f32, f32) = (1.0, 120.0);
const HEIGHT_CM_RANGE: (f32, f32) = (1.0, 250.0);
const WEIGHT_KG_RANGE: (f32, f32) = (1.0, 500.0);

fn default_meal_frequency() -> u32 {
    3
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// Dietary goal. Parsed case-insensitively; `wt_loss` / `wt_gain` are
/// accepted as synonyms for backwards compatibility with older client
/// payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    WeightLoss,
    Maintain,
    WeightGain,
}

impl<'de> Deserialize<'de> for Goal {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        match raw.trim().to_lowercase().as_str() {
            "weight_loss" | "wt_loss" => Ok(Goal::WeightLoss),
            "maintain" => Ok(Goal::Maintain),
            "weight_gain" | "wt_gain" => Ok(Goal::WeightGain),
            other => Err(serde::de::Error::custom(format!(
                "unknown goal '{}', expected weight_loss, maintain or weight_gain",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthCondition {
    Diabetes,
    Hypertension,
    Asthma,
    Allergy,
}

/// User profile driving a single recommendation run.
///
/// `diet_type`, `meal_type` and `activity_type` are free text and matched
/// case-insensitively against the corpus / multiplier table. The `allergy`
/// health condition reads the `allergies` list; the other conditions ignore
/// it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub age: u32,
    pub gender: Gender,
    pub height_cm: f32,
    pub weight_kg: f32,
    pub activity_type: String,
    pub goal: Goal,
    pub diet_type: String,
    pub meal_type: String,
    #[serde(default)]
    pub health_conditions: Vec<HealthCondition>,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub exclude_recipe_names: Vec<String>,
    #[serde(default = "default_meal_frequency")]
    pub meal_frequency: u32,
}

#[derive(Debug, PartialEq)]
pub enum ProfileError {
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
}

impl fmt::Display for ProfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileError::OutOfRange {
                field,
                value,
                min,
                max,
            } => {
                write!(
                    f,
                    "Profile field '{}' = {} outside allowed range [{}, {}]",
                    field, value, min, max
                )
            }
        }
    }
}

impl Error for ProfileError {}

fn check_range(field: &'static str, value: f32, range: (f32, f32)) -> Result<(), ProfileError> {
    let (min, max) = range;
    // Written so NaN fails the check instead of slipping through.
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(ProfileError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

impl UserProfile {
    /// Checks the numeric fields against their allowed ranges. Violations
    /// are reported to the caller, never clamped.
    pub fn validate(&self) -> Result<(), ProfileError> {
        check_range("age", self.age as f32, AGE_RANGE)?;
        check_range("height_cm", self.height_cm, HEIGHT_CM_RANGE)?;
        check_range("weight_kg", self.weight_kg, WEIGHT_KG_RANGE)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_profile() -> UserProfile {
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
    fn test_valid_profile_passes() {
        assert!(sample_profile().validate().is_ok());
    }

    #[test]
    fn test_age_out_of_range() {
        let mut profile = sample_profile();
        profile.age = 0;
        assert!(profile.validate().is_err());
        profile.age = 121;
        let err = profile.validate().unwrap_err();
        assert!(err.to_string().contains("age"));
        assert!(err.to_string().contains("121"));
    }

    #[test]
    fn test_height_and_weight_bounds() {
        let mut profile = sample_profile();
        profile.height_cm = 0.5;
        assert!(profile.validate().is_err());
        profile.height_cm = 250.0;
        assert!(profile.validate().is_ok());

        profile.weight_kg = 500.5;
        assert!(profile.validate().is_err());
        profile.weight_kg = 1.0;
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn test_nan_height_is_rejected() {
        let mut profile = sample_profile();
        profile.height_cm = f32::NAN;
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_goal_synonyms_deserialize() {
        let goal: Goal = serde_json::from_str("\"wt_loss\"").unwrap();
        assert_eq!(goal, Goal::WeightLoss);
        let goal: Goal = serde_json::from_str("\"weight_gain\"").unwrap();
        assert_eq!(goal, Goal::WeightGain);
        let goal: Goal = serde_json::from_str("\"maintain\"").unwrap();
        assert_eq!(goal, Goal::Maintain);
        assert!(serde_json::from_str::<Goal>("\"bulk\"").is_err());
    }

    #[test]
    fn test_goal_parsing_ignores_case() {
        let goal: Goal = serde_json::from_str("\"WT_LOSS\"").unwrap();
        assert_eq!(goal, Goal::WeightLoss);
        let goal: Goal = serde_json::from_str("\"Maintain\"").unwrap();
        assert_eq!(goal, Goal::Maintain);
        let goal: Goal = serde_json::from_str("\"Weight_Gain\"").unwrap();
        assert_eq!(goal, Goal::WeightGain);
    }

    #[test]
    fn test_goal_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&Goal::WeightLoss).unwrap(),
            "\"weight_loss\""
        );
    }

    #[test]
    fn test_profile_json_defaults() {
        let json = r#"{
            "age": 30,
            "gender": "male",
            "height_cm": 175.0,
            "weight_kg": 60.0,
            "activity_type": "cycling",
            "goal": "maintain",
            "diet_type": "vegetarian",
            "meal_type": "lunch"
        }"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.meal_frequency, 3);
        assert!(profile.health_conditions.is_empty());
        assert!(profile.allergies.is_empty());
        assert!(profile.exclude_recipe_names.is_empty());
    }

    #[test]
    fn test_health_conditions_deserialize() {
        let json = r#"["diabetes", "hypertension", "asthma", "allergy"]"#;
        let conditions: Vec<HealthCondition> = serde_json::from_str(json).unwrap();
        assert_eq!(
            conditions,
            vec![
                HealthCondition::Diabetes,
                HealthCondition::Hypertension,
                HealthCondition::Asthma,
                HealthCondition::Allergy,
            ]
        );
    }
}
