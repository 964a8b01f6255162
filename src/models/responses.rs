use serde::{Deserialize, Serialize};

use crate::models::domain::RecipeMatch;

/// Response for the suggestion endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionsResponse {
    pub matches: Vec<RecipeMatch>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
}

/// Response carrying a list of valid ingredient names
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidIngredientsResponse {
    pub ingredients: Vec<String>,
    pub count: usize,
}

/// Response for a single-ingredient validity check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckIngredientResponse {
    pub name: String,
    pub valid: bool,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
