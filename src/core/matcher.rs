use crate::core::{
    filters::matches_criteria,
    fuzzy::matches_any,
    scoring::completion_score,
};
use crate::models::{
    FilterCriteria, IngredientRole, RecipeCombination, RecipeMatch, RecipeSource, TierThresholds,
};

/// Result of ranking a candidate set
#[derive(Debug)]
pub struct MatchOutcome {
    pub matches: Vec<RecipeMatch>,
    pub total_candidates: usize,
}

/// Ingredient/recipe matching engine
///
/// Pure and stateless per call: every operation reads the rows it is given
/// and returns a value, so concurrent requests share one engine with no
/// coordination. Constructed once at startup and handed to consumers through
/// the application state.
#[derive(Debug, Clone)]
pub struct MatchingEngine {
    thresholds: TierThresholds,
}

impl MatchingEngine {
    pub fn new(thresholds: TierThresholds) -> Self {
        Self { thresholds }
    }

    pub fn with_default_thresholds() -> Self {
        Self {
            thresholds: TierThresholds::default(),
        }
    }

    /// Distinct main ingredients of the rows surviving the criteria
    ///
    /// Unset criteria fields are wildcards, so all-unset criteria return
    /// every distinct main ingredient in the table. No match is an empty
    /// vector, not an error. First-seen order is preserved.
    pub fn valid_main_ingredients(
        &self,
        rows: &[RecipeCombination],
        criteria: &FilterCriteria,
    ) -> Vec<String> {
        let mut mains: Vec<String> = Vec::new();
        for row in rows.iter().filter(|row| matches_criteria(row, criteria)) {
            let main = row.main_ingredient.trim();
            if !main.is_empty() && !mains.iter().any(|seen| seen == main) {
                mains.push(main.to_string());
            }
        }
        mains
    }

    /// Deduplicated union of supporting ingredients across the rows that
    /// survive the criteria and carry the given main ingredient
    pub fn valid_supporting_ingredients(
        &self,
        rows: &[RecipeCombination],
        main_ingredient: &str,
        criteria: &FilterCriteria,
    ) -> Vec<String> {
        let main = main_ingredient.trim();
        let mut supporting: Vec<String> = Vec::new();
        for row in rows.iter().filter(|row| {
            row.main_ingredient.trim() == main && matches_criteria(row, criteria)
        }) {
            for ingredient in &row.supporting_ingredients {
                let ingredient = ingredient.trim();
                if !ingredient.is_empty() && !supporting.iter().any(|seen| seen == ingredient) {
                    supporting.push(ingredient.to_string());
                }
            }
        }
        supporting
    }

    /// Fuzzy-check a single ingredient name against the valid candidates for
    /// its role under the given criteria
    pub fn is_ingredient_valid(
        &self,
        rows: &[RecipeCombination],
        name: &str,
        criteria: &FilterCriteria,
        role: &IngredientRole,
    ) -> bool {
        let candidates = match role {
            IngredientRole::Main => self.valid_main_ingredients(rows, criteria),
            IngredientRole::Supporting { main_ingredient } => {
                self.valid_supporting_ingredients(rows, main_ingredient, criteria)
            }
        };

        matches_any(name, &candidates)
    }

    /// Score a single candidate against the selection
    pub fn completion_score(
        &self,
        source: &RecipeSource,
        selected_ingredients: &[String],
    ) -> RecipeMatch {
        completion_score(source, selected_ingredients, &self.thresholds)
    }

    /// Score every candidate and order the results by tier
    ///
    /// Complete matches come first, then near-complete, then partial. Within
    /// a tier the candidate order is preserved rather than re-sorted by
    /// score; a stable sort on the tier alone keeps that guarantee.
    pub fn rank_recipes(
        &self,
        sources: &[RecipeSource],
        selected_ingredients: &[String],
    ) -> MatchOutcome {
        let total_candidates = sources.len();

        let mut matches: Vec<RecipeMatch> = sources
            .iter()
            .map(|source| completion_score(source, selected_ingredients, &self.thresholds))
            .collect();

        matches.sort_by_key(|m| m.tier);

        MatchOutcome {
            matches,
            total_candidates,
        }
    }
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::with_default_thresholds()
    }
}
