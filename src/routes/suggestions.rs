use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::core::{matches_criteria, matches_dietary, generate_recipes, MatchingEngine};
use crate::models::{
    CheckIngredientRequest, CheckIngredientResponse, ErrorResponse, FindSuggestionsRequest,
    GenerateSuggestionsRequest, HealthResponse, IngredientRole, RecipeSource,
    SuggestionsResponse, ValidIngredientsResponse, ValidMainsRequest, ValidSupportingRequest,
};
use crate::services::{CacheKey, CacheManager, IngredientCatalog, PostgresClient};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub postgres: Arc<PostgresClient>,
    pub cache: Arc<CacheManager>,
    pub catalog: Arc<IngredientCatalog>,
    pub engine: MatchingEngine,
}

/// Configure all suggestion-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/suggestions/find", web::post().to(find_suggestions))
        .route("/suggestions/generate", web::post().to(generate_suggestions))
        .route("/ingredients/valid-mains", web::post().to(valid_mains))
        .route(
            "/ingredients/valid-supporting",
            web::post().to(valid_supporting),
        )
        .route("/ingredients/check", web::post().to(check_ingredient))
        .route("/catalog/ingredients", web::get().to(catalog_ingredients));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let pg_healthy = state.postgres.health_check().await.unwrap_or(false);

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Rank stored recipe combinations against a selection
///
/// POST /api/v1/suggestions/find
///
/// Request body:
/// ```json
/// {
///   "selectedIngredients": ["egg", "spinach"],
///   "criteria": {"mealType": "breakfast"},
///   "dietaryRestrictions": ["vegetarian"],
///   "limit": 20
/// }
/// ```
async fn find_suggestions(
    state: web::Data<AppState>,
    req: web::Json<FindSuggestionsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for find_suggestions request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    // Cap limit at 100 to prevent excessive responses
    let limit = req.limit.min(100) as usize;

    tracing::info!(
        "Finding suggestions for {} selected ingredients, limit: {}",
        req.selected_ingredients.len(),
        limit
    );

    let rows = match state.postgres.fetch_combinations(&req.criteria).await {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!("Failed to fetch combinations: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch combinations".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    // Re-check criteria in memory and apply dietary restrictions; absence of
    // matches is an empty result, never an error
    let sources: Vec<RecipeSource> = rows
        .iter()
        .filter(|row| matches_criteria(row, &req.criteria))
        .filter(|row| matches_dietary(row, &req.dietary_restrictions))
        .map(RecipeSource::from)
        .collect();

    let mut outcome = state.engine.rank_recipes(&sources, &req.selected_ingredients);
    outcome.matches.truncate(limit);

    tracing::info!(
        "Returning {} suggestions (from {} candidates)",
        outcome.matches.len(),
        outcome.total_candidates
    );

    HttpResponse::Ok().json(SuggestionsResponse {
        matches: outcome.matches,
        total_candidates: outcome.total_candidates,
    })
}

/// Expand recipe templates against a selection and rank the results
///
/// POST /api/v1/suggestions/generate
async fn generate_suggestions(
    state: web::Data<AppState>,
    req: web::Json<GenerateSuggestionsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let sources = generate_recipes(&req.selected_ingredients, &req.preferences);
    let outcome = state.engine.rank_recipes(&sources, &req.selected_ingredients);

    HttpResponse::Ok().json(SuggestionsResponse {
        matches: outcome.matches,
        total_candidates: outcome.total_candidates,
    })
}

/// Valid main ingredients under the criteria
///
/// POST /api/v1/ingredients/valid-mains
async fn valid_mains(
    state: web::Data<AppState>,
    req: web::Json<ValidMainsRequest>,
) -> impl Responder {
    let cache_key = CacheKey::valid_mains(&req.criteria);
    if let Ok(ingredients) = state.cache.get::<Vec<String>>(&cache_key).await {
        let count = ingredients.len();
        return HttpResponse::Ok().json(ValidIngredientsResponse { ingredients, count });
    }

    let rows = match state.postgres.fetch_combinations(&req.criteria).await {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!("Failed to fetch combinations: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch combinations".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let ingredients = state.engine.valid_main_ingredients(&rows, &req.criteria);

    if let Err(e) = state.cache.set(&cache_key, &ingredients).await {
        tracing::warn!("Failed to cache valid mains: {}", e);
    }

    let count = ingredients.len();
    HttpResponse::Ok().json(ValidIngredientsResponse { ingredients, count })
}

/// Valid supporting ingredients for a chosen main
///
/// POST /api/v1/ingredients/valid-supporting
async fn valid_supporting(
    state: web::Data<AppState>,
    req: web::Json<ValidSupportingRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let cache_key = CacheKey::valid_supporting(&req.main_ingredient, &req.criteria);
    if let Ok(ingredients) = state.cache.get::<Vec<String>>(&cache_key).await {
        let count = ingredients.len();
        return HttpResponse::Ok().json(ValidIngredientsResponse { ingredients, count });
    }

    let rows = match state
        .postgres
        .fetch_combinations_for_main(&req.main_ingredient, &req.criteria)
        .await
    {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!("Failed to fetch combinations: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch combinations".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let ingredients =
        state
            .engine
            .valid_supporting_ingredients(&rows, &req.main_ingredient, &req.criteria);

    if let Err(e) = state.cache.set(&cache_key, &ingredients).await {
        tracing::warn!("Failed to cache valid supporting ingredients: {}", e);
    }

    let count = ingredients.len();
    HttpResponse::Ok().json(ValidIngredientsResponse { ingredients, count })
}

/// Check one ingredient name for validity in its role
///
/// POST /api/v1/ingredients/check
///
/// A supporting-role check requires the chosen main ingredient; the role is
/// resolved here, once, before the engine sees it.
async fn check_ingredient(
    state: web::Data<AppState>,
    req: web::Json<CheckIngredientRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let role = if req.is_main {
        IngredientRole::Main
    } else {
        match req.main_ingredient.as_deref().map(str::trim) {
            Some(main) if !main.is_empty() => IngredientRole::Supporting {
                main_ingredient: main.to_string(),
            },
            _ => {
                return HttpResponse::BadRequest().json(ErrorResponse {
                    error: "Missing main ingredient".to_string(),
                    message: "Supporting-ingredient checks require mainIngredient".to_string(),
                    status_code: 400,
                });
            }
        }
    };

    let rows = match &role {
        IngredientRole::Main => state.postgres.fetch_combinations(&req.criteria).await,
        IngredientRole::Supporting { main_ingredient } => {
            state
                .postgres
                .fetch_combinations_for_main(main_ingredient, &req.criteria)
                .await
        }
    };

    let rows = match rows {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!("Failed to fetch combinations: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch combinations".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let valid = state
        .engine
        .is_ingredient_valid(&rows, &req.name, &req.criteria, &role);

    HttpResponse::Ok().json(CheckIngredientResponse {
        name: req.name.clone(),
        valid,
    })
}

/// The seeded ingredient catalog, optionally filtered by dietary tags
///
/// GET /api/v1/catalog/ingredients?dietary=vegetarian,gluten-free
async fn catalog_ingredients(
    state: web::Data<AppState>,
    query: web::Query<std::collections::HashMap<String, String>>,
) -> impl Responder {
    let restrictions: Vec<String> = query
        .get("dietary")
        .map(|raw| {
            raw.split(',')
                .map(|tag| tag.trim().to_string())
                .filter(|tag| !tag.is_empty())
                .collect()
        })
        .unwrap_or_default();

    let ingredients = state.catalog.matching_dietary(&restrictions);
    let count = ingredients.len();

    HttpResponse::Ok().json(serde_json::json!({
        "ingredients": ingredients,
        "count": count,
    }))
}
