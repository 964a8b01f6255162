use serde::{Deserialize, Serialize};

/// Meal slot a recipe combination is intended for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "meal_type", rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Some(MealType::Breakfast),
            "lunch" => Some(MealType::Lunch),
            "dinner" => Some(MealType::Dinner),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
        }
    }
}

/// Overall taste direction of a combination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "taste_profile", rename_all = "lowercase")]
pub enum TasteProfile {
    Sweet,
    Savory,
}

impl TasteProfile {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "sweet" => Some(TasteProfile::Sweet),
            "savory" => Some(TasteProfile::Savory),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TasteProfile::Sweet => "sweet",
            TasteProfile::Savory => "savory",
        }
    }
}

/// Whether a catalog ingredient anchors a dish or complements one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngredientPriority {
    Main,
    Complementary,
}

/// Catalog ingredient, seeded at startup and read-only afterwards
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(rename = "dietaryTags", default)]
    pub dietary_tags: Vec<String>,
    #[serde(rename = "isCommon", default)]
    pub is_common: bool,
    #[serde(rename = "searchTerms", default)]
    pub search_terms: Vec<String>,
    pub priority: IngredientPriority,
}

/// One row of the recipe combination table
///
/// Ingredient fields are free-text references to catalog ingredient names;
/// there is no foreign key, and matching against them is fuzzy by design.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeCombination {
    pub id: i64,
    #[serde(rename = "mealType")]
    pub meal_type: MealType,
    #[serde(rename = "mainIngredient")]
    pub main_ingredient: String,
    #[serde(rename = "supportingIngredients")]
    pub supporting_ingredients: Vec<String>,
    #[serde(rename = "tasteProfile")]
    pub taste_profile: TasteProfile,
    #[serde(rename = "dietaryTags", default)]
    pub dietary_tags: Vec<String>,
    #[serde(rename = "cookTimeMinutes")]
    pub cook_time_minutes: u32,
    pub appliance: String,
}

impl RecipeCombination {
    /// Full ingredient list: main ingredient first, then supporting
    pub fn ingredient_names(&self) -> Vec<String> {
        let mut names = Vec::with_capacity(1 + self.supporting_ingredients.len());
        names.push(self.main_ingredient.clone());
        names.extend(self.supporting_ingredients.iter().cloned());
        names
    }

    /// Display title for ranked output, e.g. "chicken dinner"
    pub fn display_name(&self) -> String {
        format!("{} {}", self.main_ingredient, self.meal_type.as_str())
    }
}

/// User preference criteria; unset fields are wildcards
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(rename = "mealType", default)]
    pub meal_type: Option<MealType>,
    #[serde(rename = "tasteProfile", default)]
    pub taste_profile: Option<TasteProfile>,
    #[serde(rename = "cookTimeMinutes", default)]
    pub cook_time_minutes: Option<u32>,
    #[serde(default)]
    pub appliances: Vec<String>,
}

impl FilterCriteria {
    pub fn is_wildcard(&self) -> bool {
        self.meal_type.is_none()
            && self.taste_profile.is_none()
            && self.cook_time_minutes.is_none()
            && self.appliances.is_empty()
    }
}

/// Candidate recipe as it reaches the ranking engine
///
/// Exactly two shapes exist and they are resolved once, at the system
/// boundary. `Classic` carries a plain ingredient list and the engine splits
/// it against the selection itself; `Scored` already carries the used/missed
/// split and the engine only derives the percentage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "lowercase")]
pub enum RecipeSource {
    Classic {
        title: String,
        ingredients: Vec<String>,
    },
    Scored {
        title: String,
        #[serde(rename = "usedIngredients")]
        used_ingredients: Vec<String>,
        #[serde(rename = "missedIngredients")]
        missed_ingredients: Vec<String>,
    },
}

impl RecipeSource {
    pub fn title(&self) -> &str {
        match self {
            RecipeSource::Classic { title, .. } => title,
            RecipeSource::Scored { title, .. } => title,
        }
    }
}

impl From<&RecipeCombination> for RecipeSource {
    fn from(row: &RecipeCombination) -> Self {
        RecipeSource::Classic {
            title: row.display_name(),
            ingredients: row.ingredient_names(),
        }
    }
}

/// Completion tier of a ranked match
///
/// Ordering matters: ranked output lists tiers in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    Complete,
    NearComplete,
    Partial,
}

/// Scored recipe match, derived per request and never persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeMatch {
    pub title: String,
    #[serde(rename = "completionPercentage")]
    pub completion_percentage: f64,
    #[serde(rename = "availableIngredients")]
    pub available_ingredients: Vec<String>,
    #[serde(rename = "missingIngredients")]
    pub missing_ingredients: Vec<String>,
    pub tier: MatchTier,
}

/// Tier cut-offs for ranked output
#[derive(Debug, Clone, Copy)]
pub struct TierThresholds {
    pub complete: f64,
    pub near_complete: f64,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            complete: 1.0,
            near_complete: 0.8,
        }
    }
}

/// Role an ingredient plays in a validity check
///
/// Supporting-ingredient validity is always relative to a chosen main; the
/// HTTP boundary resolves the role before the engine sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum IngredientRole {
    Main,
    Supporting {
        #[serde(rename = "mainIngredient")]
        main_ingredient: String,
    },
}

/// Input to the template recipe generator
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GeneratorPreferences {
    #[serde(rename = "mealType")]
    pub meal_type: MealType,
    #[serde(rename = "tasteProfile")]
    pub taste_profile: TasteProfile,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meal_type_parse() {
        assert_eq!(MealType::parse("dinner"), Some(MealType::Dinner));
        assert_eq!(MealType::parse(" Breakfast "), Some(MealType::Breakfast));
        assert_eq!(MealType::parse("brunch"), None);
    }

    #[test]
    fn test_taste_profile_parse() {
        assert_eq!(TasteProfile::parse("SAVORY"), Some(TasteProfile::Savory));
        assert_eq!(TasteProfile::parse("umami"), None);
    }

    #[test]
    fn test_combination_ingredient_names_main_first() {
        let row = RecipeCombination {
            id: 1,
            meal_type: MealType::Dinner,
            main_ingredient: "chicken".to_string(),
            supporting_ingredients: vec!["rice".to_string(), "peas".to_string()],
            taste_profile: TasteProfile::Savory,
            dietary_tags: vec![],
            cook_time_minutes: 30,
            appliance: "oven".to_string(),
        };

        assert_eq!(row.ingredient_names(), vec!["chicken", "rice", "peas"]);
        assert_eq!(row.display_name(), "chicken dinner");
    }

    #[test]
    fn test_recipe_source_tagged_deserialization() {
        let classic: RecipeSource = serde_json::from_str(
            r#"{"format":"classic","title":"omelette","ingredients":["egg","feta"]}"#,
        )
        .unwrap();
        assert!(matches!(classic, RecipeSource::Classic { .. }));

        let scored: RecipeSource = serde_json::from_str(
            r#"{"format":"scored","title":"salad","usedIngredients":["feta"],"missedIngredients":["olive"]}"#,
        )
        .unwrap();
        assert!(matches!(scored, RecipeSource::Scored { .. }));
    }

    #[test]
    fn test_tier_order_matches_declaration() {
        assert!(MatchTier::Complete < MatchTier::NearComplete);
        assert!(MatchTier::NearComplete < MatchTier::Partial);
    }
}
