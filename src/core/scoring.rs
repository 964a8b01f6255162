use crate::core::fuzzy::normalize;
use crate::models::{MatchTier, RecipeMatch, RecipeSource, TierThresholds};

/// Score one candidate recipe against the user's selected ingredients
///
/// For `Classic` sources the recipe's ingredient list is intersected
/// case-insensitively with the selection: available = the intersection,
/// missing = the complement, percentage = |available| / |ingredients|.
/// A recipe with no ingredients scores exactly 0, never an error.
///
/// `Scored` sources already carry the used/missed split and only the
/// percentage is derived from it.
pub fn completion_score(
    source: &RecipeSource,
    selected_ingredients: &[String],
    thresholds: &TierThresholds,
) -> RecipeMatch {
    let (title, available, missing) = match source {
        RecipeSource::Classic { title, ingredients } => {
            let selection: Vec<String> = selected_ingredients.iter().map(|s| normalize(s)).collect();

            let mut available = Vec::new();
            let mut missing = Vec::new();
            for ingredient in dedupe(ingredients) {
                if selection.contains(&normalize(&ingredient)) {
                    available.push(ingredient);
                } else {
                    missing.push(ingredient);
                }
            }
            (title.clone(), available, missing)
        }
        RecipeSource::Scored {
            title,
            used_ingredients,
            missed_ingredients,
        } => (
            title.clone(),
            used_ingredients.clone(),
            missed_ingredients.clone(),
        ),
    };

    let total = available.len() + missing.len();
    let completion_percentage = if total == 0 {
        0.0
    } else {
        available.len() as f64 / total as f64
    };

    RecipeMatch {
        title,
        completion_percentage,
        available_ingredients: available,
        missing_ingredients: missing,
        tier: classify_tier(completion_percentage, thresholds),
    }
}

/// Classify a completion percentage into its tier
#[inline]
pub fn classify_tier(percentage: f64, thresholds: &TierThresholds) -> MatchTier {
    if percentage >= thresholds.complete {
        MatchTier::Complete
    } else if percentage >= thresholds.near_complete {
        MatchTier::NearComplete
    } else {
        MatchTier::Partial
    }
}

/// Deduplicate an ingredient list case-insensitively, first occurrence wins
fn dedupe(ingredients: &[String]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::with_capacity(ingredients.len());
    let mut out = Vec::with_capacity(ingredients.len());
    for ingredient in ingredients {
        let key = normalize(ingredient);
        if key.is_empty() || seen.contains(&key) {
            continue;
        }
        seen.push(key);
        out.push(ingredient.clone());
    }
    out
}
