// Core algorithm exports
pub mod filters;
pub mod fuzzy;
pub mod generator;
pub mod matcher;
pub mod scoring;

pub use filters::{matches_criteria, matches_dietary};
pub use fuzzy::{matches_any, names_match, normalize};
pub use generator::generate_recipes;
pub use matcher::{MatchOutcome, MatchingEngine};
pub use scoring::{classify_tier, completion_score};
