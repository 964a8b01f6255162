// Unit tests for Ladle Algo

use ladle_algo::core::{matches_criteria, matches_dietary, names_match, MatchingEngine};
use ladle_algo::models::{
    FilterCriteria, IngredientRole, MatchTier, MealType, RecipeCombination, RecipeSource,
    TasteProfile,
};

fn create_combination(
    id: i64,
    meal_type: MealType,
    main: &str,
    supporting: &[&str],
    taste: TasteProfile,
    cook_time: u32,
    appliance: &str,
) -> RecipeCombination {
    RecipeCombination {
        id,
        meal_type,
        main_ingredient: main.to_string(),
        supporting_ingredients: supporting.iter().map(|s| s.to_string()).collect(),
        taste_profile: taste,
        dietary_tags: vec![],
        cook_time_minutes: cook_time,
        appliance: appliance.to_string(),
    }
}

#[test]
fn test_fuzzy_match_exact() {
    assert!(names_match("chicken", "Chicken"));
}

#[test]
fn test_fuzzy_match_substring_both_directions() {
    assert!(names_match("chicken breast", "chicken"));
    assert!(names_match("chicken", "chicken breast"));
}

#[test]
fn test_fuzzy_match_shared_token() {
    assert!(names_match("smoked sweet paprika", "paprika powder"));
}

#[test]
fn test_fuzzy_match_rejects_short_tokens() {
    assert!(!names_match("pain au chocolat", "au jus"));
}

#[test]
fn test_criteria_wildcard_accepts_all() {
    let row = create_combination(
        1,
        MealType::Dinner,
        "chicken",
        &["rice"],
        TasteProfile::Savory,
        30,
        "oven",
    );
    assert!(matches_criteria(&row, &FilterCriteria::default()));
}

#[test]
fn test_criteria_taste_profile_mismatch() {
    let row = create_combination(
        1,
        MealType::Dinner,
        "chicken",
        &["rice"],
        TasteProfile::Savory,
        30,
        "oven",
    );
    let criteria = FilterCriteria {
        taste_profile: Some(TasteProfile::Sweet),
        ..Default::default()
    };
    assert!(!matches_criteria(&row, &criteria));
}

#[test]
fn test_dietary_filter_needs_all_tags() {
    let mut row = create_combination(
        1,
        MealType::Dinner,
        "tofu",
        &["rice"],
        TasteProfile::Savory,
        20,
        "stovetop",
    );
    row.dietary_tags = vec!["vegan".to_string(), "gluten-free".to_string()];

    assert!(matches_dietary(&row, &["vegan".to_string()]));
    assert!(!matches_dietary(
        &row,
        &["vegan".to_string(), "nut-free".to_string()]
    ));
}

#[test]
fn test_completion_score_bounds_and_partition() {
    let engine = MatchingEngine::with_default_thresholds();
    let source = RecipeSource::Classic {
        title: "frittata".to_string(),
        ingredients: vec![
            "egg".to_string(),
            "spinach".to_string(),
            "feta".to_string(),
            "onion".to_string(),
        ],
    };

    let result = engine.completion_score(&source, &["egg".to_string(), "feta".to_string()]);

    assert!(result.completion_percentage >= 0.0 && result.completion_percentage <= 1.0);

    // available and missing partition the recipe's ingredient list
    let mut combined = result.available_ingredients.clone();
    combined.extend(result.missing_ingredients.clone());
    combined.sort();
    let mut expected = vec!["egg", "spinach", "feta", "onion"];
    expected.sort_unstable();
    assert_eq!(combined, expected);

    for ingredient in &result.available_ingredients {
        assert!(!result.missing_ingredients.contains(ingredient));
    }
}

#[test]
fn test_completion_score_zero_ingredients() {
    let engine = MatchingEngine::with_default_thresholds();
    let source = RecipeSource::Classic {
        title: "empty".to_string(),
        ingredients: vec![],
    };

    let result = engine.completion_score(&source, &["egg".to_string()]);
    assert_eq!(result.completion_percentage, 0.0);
}

#[test]
fn test_near_complete_example() {
    let engine = MatchingEngine::with_default_thresholds();
    let source = RecipeSource::Classic {
        title: "spinach frittata".to_string(),
        ingredients: vec![
            "egg".to_string(),
            "spinach".to_string(),
            "feta".to_string(),
            "onion".to_string(),
        ],
    };
    let selection = vec!["egg".to_string(), "spinach".to_string(), "feta".to_string()];

    let result = engine.completion_score(&source, &selection);

    assert!((result.completion_percentage - 0.75).abs() < f64::EPSILON);
    assert_eq!(result.available_ingredients, vec!["egg", "spinach", "feta"]);
    assert_eq!(result.missing_ingredients, vec!["onion"]);
    assert_eq!(result.tier, MatchTier::NearComplete);
}

#[test]
fn test_is_ingredient_valid_roles() {
    let engine = MatchingEngine::with_default_thresholds();
    let rows = vec![
        create_combination(
            1,
            MealType::Dinner,
            "chicken",
            &["rice", "broccoli"],
            TasteProfile::Savory,
            30,
            "oven",
        ),
        create_combination(
            2,
            MealType::Breakfast,
            "egg",
            &["spinach"],
            TasteProfile::Savory,
            10,
            "stovetop",
        ),
    ];
    let criteria = FilterCriteria::default();

    assert!(engine.is_ingredient_valid(&rows, "chicken thigh", &criteria, &IngredientRole::Main));

    let supporting_role = IngredientRole::Supporting {
        main_ingredient: "chicken".to_string(),
    };
    assert!(engine.is_ingredient_valid(&rows, "broccoli florets", &criteria, &supporting_role));
    assert!(!engine.is_ingredient_valid(&rows, "spinach", &criteria, &supporting_role));
}

#[test]
fn test_rank_tier_grouping() {
    let engine = MatchingEngine::with_default_thresholds();

    // percentages 1.0, 0.9, 0.5 in source order
    let sources = vec![
        RecipeSource::Scored {
            title: "complete".to_string(),
            used_ingredients: vec!["a".to_string()],
            missed_ingredients: vec![],
        },
        RecipeSource::Scored {
            title: "near".to_string(),
            used_ingredients: (0..9).map(|i| format!("u{i}")).collect(),
            missed_ingredients: vec!["m".to_string()],
        },
        RecipeSource::Scored {
            title: "partial".to_string(),
            used_ingredients: vec!["a".to_string()],
            missed_ingredients: vec!["b".to_string()],
        },
    ];

    let outcome = engine.rank_recipes(&sources, &[]);

    assert_eq!(outcome.matches[0].tier, MatchTier::Complete);
    assert_eq!(outcome.matches[1].tier, MatchTier::NearComplete);
    assert_eq!(outcome.matches[2].tier, MatchTier::Partial);
}
