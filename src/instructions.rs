//! Rewrites recipe instructions so each step carries the optimized
//! ingredient quantities.

use regex::{Regex, RegexBuilder};

use crate::corpus::parse_r_vector;
use crate::optim::Portion;

/// Placeholder shown when a recipe has no usable instruction text.
pub const NO_INSTRUCTIONS_TEXT: &str = "No instructions available.";

/// Steps at or below this length are treated as punctuation fragments.
const MIN_STEP_CHARS: usize = 3;

/// Splits raw instruction text into individual steps.
///
/// R-style `c("...", "...")` vectors keep their element boundaries;
/// anything else is split on sentence punctuation.
pub fn split_steps(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    let pieces = match parse_r_vector(trimmed) {
        Some(items) => items,
        None => trimmed
            .split(['.', '!', '?', ';'])
            .map(str::to_string)
            .collect(),
    };
    pieces
        .into_iter()
        .map(|piece| piece.trim().to_string())
        .filter(|piece| piece.chars().count() > MIN_STEP_CHARS)
        .collect()
}

/// Produces the final numbered instruction block for one meal.
///
/// Each step gets at most one substitution per ingredient: the first
/// whole-word occurrence is replaced with the portion's display string.
/// Always consumes the recipe's raw text, never its own output.
pub fn inject_quantities(raw_instructions: &str, portions: &[Portion]) -> String {
    let steps = split_steps(raw_instructions);
    if steps.is_empty() {
        return NO_INSTRUCTIONS_TEXT.to_string();
    }

    let matchers: Vec<(Regex, &str)> = portions
        .iter()
        .filter_map(|portion| {
            ingredient_matcher(&portion.ingredient).map(|regex| (regex, portion.display.as_str()))
        })
        .collect();

    let mut lines = Vec::with_capacity(steps.len());
    for (index, step) in steps.iter().enumerate() {
        let mut text = step.clone();
        for (regex, display) in &matchers {
            text = regex.replace(&text, *display).into_owned();
        }
        lines.push(format!("{}. {}", index + 1, tidy_step(&text)));
    }
    lines.join("\n")
}

fn ingredient_matcher(ingredient: &str) -> Option<Regex> {
    RegexBuilder::new(&format!(r"\b{}\b", regex::escape(ingredient)))
        .case_insensitive(true)
        .build()
        .ok()
}

/// Strips stale enumeration left over from the source text, then
/// capitalizes the first letter. A step that strips down to nothing
/// keeps its original text.
fn tidy_step(text: &str) -> String {
    let stripped = text.trim_start_matches(|c: char| {
        c.is_ascii_digit() || c == '.' || c == ')' || c == '(' || c == '-' || c.is_whitespace()
    });
    let base = if stripped.is_empty() { text } else { stripped };
    capitalize_first(base.trim())
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn portion(ingredient: &str, grams: u32) -> Portion {
        Portion {
            ingredient: ingredient.to_string(),
            grams,
            display: format!("{}g {}", grams, ingredient),
        }
    }

    #[test]
    fn test_splits_r_vector_instructions() {
        let raw = r#"c("Preheat the oven", "Season the chicken", "Bake until done")"#;
        let steps = split_steps(raw);
        assert_eq!(
            steps,
            vec!["Preheat the oven", "Season the chicken", "Bake until done"]
        );
    }

    #[test]
    fn test_splits_plain_sentences() {
        let steps = split_steps("Boil water. Add rice! Serve hot?");
        assert_eq!(steps, vec!["Boil water", "Add rice", "Serve hot"]);
    }

    #[test]
    fn test_drops_short_fragments() {
        let steps = split_steps("Mix. Stir the pot. Eat.");
        assert_eq!(steps, vec!["Stir the pot"]);
    }

    #[test]
    fn test_empty_text_yields_placeholder() {
        assert_eq!(inject_quantities("", &[portion("rice", 80)]), NO_INSTRUCTIONS_TEXT);
        assert_eq!(inject_quantities("   ", &[]), NO_INSTRUCTIONS_TEXT);
    }

    #[test]
    fn test_empty_r_vector_yields_placeholder() {
        assert_eq!(inject_quantities("character(0)", &[]), NO_INSTRUCTIONS_TEXT);
    }

    #[test]
    fn test_injects_first_occurrence_only() {
        let raw = r#"c("Add rice and rinse the rice again")"#;
        let rendered = inject_quantities(raw, &[portion("rice", 80)]);
        assert_eq!(rendered, "1. Add 80g rice and rinse the rice again");
    }

    #[test]
    fn test_injection_is_case_insensitive_and_whole_word() {
        let raw = "Top with RICE over low heat; compare the price later";
        let rendered = inject_quantities(raw, &[portion("rice", 80)]);
        assert_eq!(
            rendered,
            "1. Top with 80g rice over low heat\n2. Compare the price later"
        );
    }

    #[test]
    fn test_same_ingredient_substituted_in_every_step() {
        let raw = r#"c("Rinse the rice well", "Cook the rice slowly")"#;
        let rendered = inject_quantities(raw, &[portion("rice", 120)]);
        assert_eq!(
            rendered,
            "1. Rinse the 120g rice well\n2. Cook the 120g rice slowly"
        );
    }

    #[test]
    fn test_multi_word_ingredient_substitution() {
        let raw = r#"c("Drizzle olive oil over the salad")"#;
        let rendered = inject_quantities(raw, &[portion("olive oil", 15)]);
        assert_eq!(rendered, "1. Drizzle 15g olive oil over the salad");
    }

    #[test]
    fn test_strips_stale_enumeration_and_capitalizes() {
        let raw = r#"c("1) preheat the oven", "2. simmer gently", "- serve warm")"#;
        let rendered = inject_quantities(raw, &[]);
        assert_eq!(
            rendered,
            "1. Preheat the oven\n2. Simmer gently\n3. Serve warm"
        );
    }

    #[test]
    fn test_step_that_strips_to_nothing_keeps_original_text() {
        let rendered = inject_quantities(r#"c("1234")"#, &[]);
        assert_eq!(rendered, "1. 1234");
    }
}
