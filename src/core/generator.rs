use crate::core::fuzzy::normalize;
use crate::models::{GeneratorPreferences, MealType, RecipeSource, TasteProfile};

/// One recipe template: a title pattern plus the pantry staples the dish
/// needs beyond the user's own ingredients
struct RecipeTemplate {
    title: &'static str,
    staples: &'static [&'static str],
}

const BREAKFAST_SWEET: &[RecipeTemplate] = &[
    RecipeTemplate {
        title: "{main} porridge",
        staples: &["oats", "milk", "honey"],
    },
    RecipeTemplate {
        title: "{main} pancakes",
        staples: &["flour", "egg", "milk"],
    },
];

const BREAKFAST_SAVORY: &[RecipeTemplate] = &[
    RecipeTemplate {
        title: "{main} omelette",
        staples: &["egg", "butter"],
    },
    RecipeTemplate {
        title: "{main} breakfast hash",
        staples: &["potato", "onion", "butter"],
    },
];

const LUNCH_SWEET: &[RecipeTemplate] = &[RecipeTemplate {
    title: "{main} fruit bowl",
    staples: &["yogurt", "honey"],
}];

const LUNCH_SAVORY: &[RecipeTemplate] = &[
    RecipeTemplate {
        title: "{main} grain bowl",
        staples: &["rice", "olive oil", "lemon"],
    },
    RecipeTemplate {
        title: "{main} soup",
        staples: &["onion", "garlic", "stock"],
    },
];

const DINNER_SWEET: &[RecipeTemplate] = &[RecipeTemplate {
    title: "honey-glazed {main}",
    staples: &["honey", "butter"],
}];

const DINNER_SAVORY: &[RecipeTemplate] = &[
    RecipeTemplate {
        title: "roast {main}",
        staples: &["potato", "garlic", "olive oil"],
    },
    RecipeTemplate {
        title: "{main} stir fry",
        staples: &["soy sauce", "garlic", "rice"],
    },
];

fn templates_for(preferences: &GeneratorPreferences) -> &'static [RecipeTemplate] {
    match (preferences.meal_type, preferences.taste_profile) {
        (MealType::Breakfast, TasteProfile::Sweet) => BREAKFAST_SWEET,
        (MealType::Breakfast, TasteProfile::Savory) => BREAKFAST_SAVORY,
        (MealType::Lunch, TasteProfile::Sweet) => LUNCH_SWEET,
        (MealType::Lunch, TasteProfile::Savory) => LUNCH_SAVORY,
        (MealType::Dinner, TasteProfile::Sweet) => DINNER_SWEET,
        (MealType::Dinner, TasteProfile::Savory) => DINNER_SAVORY,
    }
}

/// Expand the recipe templates for the given preferences against the user's
/// selected ingredients
///
/// Deterministic template expansion with no network I/O, no retries, and no
/// failure modes: the same inputs always produce the same records. Records
/// come out in the `Scored` shape because the generator knows the selection
/// and resolves used/missed itself. The selection is used by construction;
/// staples the user does not hold are missed.
pub fn generate_recipes(
    selected_ingredients: &[String],
    preferences: &GeneratorPreferences,
) -> Vec<RecipeSource> {
    let selection: Vec<String> = selected_ingredients
        .iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    let Some(main) = selection.first() else {
        return Vec::new();
    };

    templates_for(preferences)
        .iter()
        .map(|template| {
            let mut used: Vec<String> = selection.clone();
            let mut missed: Vec<String> = Vec::new();

            for staple in template.staples {
                let held = selection.iter().any(|s| normalize(s) == normalize(staple));
                if !held {
                    missed.push((*staple).to_string());
                } else if !used.iter().any(|u| normalize(u) == normalize(staple)) {
                    used.push((*staple).to_string());
                }
            }

            RecipeSource::Scored {
                title: template.title.replace("{main}", main),
                used_ingredients: used,
                missed_ingredients: missed,
            }
        })
        .collect()
}
