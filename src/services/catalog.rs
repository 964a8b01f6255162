use std::path::Path;
use thiserror::Error;

use crate::core::fuzzy::names_match;
use crate::core::fuzzy::normalize;
use crate::models::{Ingredient, IngredientPriority};

/// Errors that can occur while loading the ingredient catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse catalog file: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Catalog is empty")]
    Empty,
}

/// Seeded ingredient catalog
///
/// Loaded once at startup from a JSON seed file and read-only afterwards;
/// every consumer shares one instance through the application state.
pub struct IngredientCatalog {
    ingredients: Vec<Ingredient>,
}

impl IngredientCatalog {
    /// Load the catalog from a JSON seed file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        let ingredients: Vec<Ingredient> = serde_json::from_str(&raw)?;

        if ingredients.is_empty() {
            return Err(CatalogError::Empty);
        }

        Ok(Self { ingredients })
    }

    /// Build a catalog from already-loaded ingredients (tests, tools)
    pub fn from_ingredients(ingredients: Vec<Ingredient>) -> Self {
        Self { ingredients }
    }

    pub fn all(&self) -> &[Ingredient] {
        &self.ingredients
    }

    pub fn len(&self) -> usize {
        self.ingredients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }

    /// Look an ingredient up by fuzzy name, checking search terms too
    pub fn find(&self, name: &str) -> Option<&Ingredient> {
        self.ingredients.iter().find(|ingredient| {
            names_match(name, &ingredient.name)
                || ingredient
                    .search_terms
                    .iter()
                    .any(|term| names_match(name, term))
        })
    }

    /// Ingredients carrying every requested dietary tag
    pub fn matching_dietary(&self, restrictions: &[String]) -> Vec<&Ingredient> {
        self.ingredients
            .iter()
            .filter(|ingredient| {
                restrictions.iter().all(|restriction| {
                    let restriction = normalize(restriction);
                    ingredient
                        .dietary_tags
                        .iter()
                        .any(|tag| normalize(tag) == restriction)
                })
            })
            .collect()
    }

    /// Main-priority ingredients only
    pub fn mains(&self) -> Vec<&Ingredient> {
        self.ingredients
            .iter()
            .filter(|ingredient| ingredient.priority == IngredientPriority::Main)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_ingredient(id: &str, name: &str, priority: IngredientPriority) -> Ingredient {
        Ingredient {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            category: "test".to_string(),
            tags: vec![],
            dietary_tags: vec!["vegetarian".to_string()],
            is_common: false,
            search_terms: vec![],
            priority,
        }
    }

    fn create_catalog() -> IngredientCatalog {
        IngredientCatalog::from_ingredients(vec![
            create_ingredient("1", "chicken", IngredientPriority::Main),
            create_ingredient("2", "spinach", IngredientPriority::Complementary),
        ])
    }

    #[test]
    fn test_fuzzy_find() {
        let catalog = create_catalog();
        assert!(catalog.find("chicken breast").is_some());
        assert!(catalog.find("tofu").is_none());
    }

    #[test]
    fn test_find_via_search_terms() {
        let mut ingredient = create_ingredient("3", "scallion", IngredientPriority::Complementary);
        ingredient.search_terms = vec!["green onion".to_string()];
        let catalog = IngredientCatalog::from_ingredients(vec![ingredient]);

        assert!(catalog.find("green onion").is_some());
    }

    #[test]
    fn test_mains_partition() {
        let catalog = create_catalog();
        let mains = catalog.mains();
        assert_eq!(mains.len(), 1);
        assert_eq!(mains[0].name, "chicken");
    }

    #[test]
    fn test_dietary_filter() {
        let catalog = create_catalog();
        assert_eq!(catalog.matching_dietary(&["Vegetarian".to_string()]).len(), 2);
        assert!(catalog.matching_dietary(&["vegan".to_string()]).is_empty());
    }

    #[test]
    fn test_parse_error_on_malformed_seed() {
        let dir = std::env::temp_dir().join("ladle-catalog-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(
            IngredientCatalog::load_from_file(&path),
            Err(CatalogError::ParseError(_))
        ));
    }
}
