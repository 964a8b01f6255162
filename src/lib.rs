//! Ladle Algo - Recipe matching service for the Ladle recipe discovery app
//!
//! This library provides the ingredient/recipe matching engine used by the
//! Ladle app: criteria filtering over the recipe combination table, fuzzy
//! ingredient validity checks, and completion-percentage ranking.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{generate_recipes, names_match, MatchingEngine};
pub use models::{
    FilterCriteria, IngredientRole, MatchTier, MealType, RecipeCombination, RecipeMatch,
    RecipeSource, TasteProfile, TierThresholds,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        assert!(names_match("chicken breast", "chicken"));
        let engine = MatchingEngine::with_default_thresholds();
        assert!(engine
            .valid_main_ingredients(&[], &FilterCriteria::default())
            .is_empty());
    }
}
