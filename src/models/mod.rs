// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    FilterCriteria, GeneratorPreferences, Ingredient, IngredientPriority, IngredientRole,
    MatchTier, MealType, RecipeCombination, RecipeMatch, RecipeSource, TasteProfile,
    TierThresholds,
};
pub use requests::{
    CheckIngredientRequest, FindSuggestionsRequest, GenerateSuggestionsRequest,
    ValidMainsRequest, ValidSupportingRequest,
};
pub use responses::{
    CheckIngredientResponse, ErrorResponse, HealthResponse, SuggestionsResponse,
    ValidIngredientsResponse,
};
