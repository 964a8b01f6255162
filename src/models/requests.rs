use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{FilterCriteria, GeneratorPreferences};

/// Request to rank recipe suggestions against a selection
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindSuggestionsRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "selected_ingredients", rename = "selectedIngredients")]
    pub selected_ingredients: Vec<String>,
    #[serde(default)]
    pub criteria: FilterCriteria,
    #[serde(default)]
    #[serde(alias = "dietary_restrictions", rename = "dietaryRestrictions")]
    pub dietary_restrictions: Vec<String>,
    #[serde(default = "default_limit")]
    pub limit: u16,
}

fn default_limit() -> u16 {
    20
}

/// Request for the valid main ingredients under the criteria
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ValidMainsRequest {
    #[serde(default)]
    pub criteria: FilterCriteria,
}

/// Request for the valid supporting ingredients of a chosen main
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ValidSupportingRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "main_ingredient", rename = "mainIngredient")]
    pub main_ingredient: String,
    #[serde(default)]
    pub criteria: FilterCriteria,
}

/// Request to check one ingredient name for validity
///
/// `is_main` selects the role; a supporting check also needs the chosen
/// main ingredient, which the handler enforces.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CheckIngredientRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub criteria: FilterCriteria,
    #[serde(alias = "is_main", rename = "isMain")]
    pub is_main: bool,
    #[serde(default)]
    #[serde(alias = "main_ingredient", rename = "mainIngredient")]
    pub main_ingredient: Option<String>,
}

/// Request to expand recipe templates against a selection
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GenerateSuggestionsRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "selected_ingredients", rename = "selectedIngredients")]
    pub selected_ingredients: Vec<String>,
    pub preferences: GeneratorPreferences,
}
