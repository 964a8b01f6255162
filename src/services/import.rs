use csv::{Reader, ReaderBuilder, StringRecord};
use serde::Serialize;
use std::io::Read;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{MealType, TasteProfile};
use crate::services::postgres::{NewRecipeCombination, PostgresClient, PostgresError};

/// Column layout of a combination import file, after the header row
const COLUMNS: [&str; 6] = [
    "mealType",
    "mainIngredient",
    "supportingIngredients",
    "tasteProfile",
    "cookTime",
    "appliance",
];

/// Errors that abort an import run
///
/// Bad rows are not errors: they are skipped and counted. These cover the
/// reader and the storage layer, which are not retried.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Failed to read import file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Storage error: {0}")]
    StorageError(#[from] PostgresError),
}

/// Why a single row was rejected
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RowError {
    #[error("unreadable row: {0}")]
    Unreadable(String),

    #[error("expected 6 fields, found {found}")]
    TooFewFields { found: usize },

    #[error("field '{0}' is empty")]
    EmptyField(&'static str),

    #[error("invalid meal type '{0}'")]
    InvalidMealType(String),

    #[error("invalid taste profile '{0}'")]
    InvalidTasteProfile(String),

    #[error("invalid cook time '{0}'")]
    InvalidCookTime(String),
}

/// Outcome of a completed import run
#[derive(Debug, Clone, Serialize)]
pub struct ImportReport {
    #[serde(rename = "runId")]
    pub run_id: Uuid,
    pub inserted: usize,
    pub skipped: usize,
}

/// Outcome of a validation-only pass over an import file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOutcome {
    pub valid: usize,
    pub skipped: usize,
}

/// Parse and validate one CSV record into an insertable combination row
pub fn parse_record(record: &StringRecord) -> Result<NewRecipeCombination, RowError> {
    if record.len() < COLUMNS.len() {
        return Err(RowError::TooFewFields {
            found: record.len(),
        });
    }

    let meal_type_raw = field(record, 0)?;
    let meal_type = MealType::parse(meal_type_raw)
        .ok_or_else(|| RowError::InvalidMealType(meal_type_raw.to_string()))?;

    let main_ingredient = field(record, 1)?.to_string();
    let supporting_ingredients = split_ingredient_list(field(record, 2)?);

    let taste_raw = field(record, 3)?;
    let taste_profile = TasteProfile::parse(taste_raw)
        .ok_or_else(|| RowError::InvalidTasteProfile(taste_raw.to_string()))?;

    let cook_raw = field(record, 4)?;
    let cook_time_minutes: u32 = cook_raw
        .parse()
        .map_err(|_| RowError::InvalidCookTime(cook_raw.to_string()))?;

    let appliance = field(record, 5)?.to_string();

    // optional seventh column: dietary tags, same list format
    let dietary_tags = record
        .get(6)
        .map(split_ingredient_list)
        .unwrap_or_default();

    Ok(NewRecipeCombination {
        meal_type,
        main_ingredient,
        supporting_ingredients,
        taste_profile,
        dietary_tags,
        cook_time_minutes,
        appliance,
    })
}

/// Split a comma-delimited list field after quote-stripping
///
/// Source files quote list items inconsistently; stray single and double
/// quotes around an item are removed before trimming, and empty items are
/// dropped.
pub fn split_ingredient_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|item| item.trim().trim_matches(|c| c == '"' || c == '\'').trim())
        .filter(|item| !item.is_empty())
        .map(|item| item.to_string())
        .collect()
}

fn field<'a>(record: &'a StringRecord, index: usize) -> Result<&'a str, RowError> {
    let value = record.get(index).unwrap_or("").trim();
    if value.is_empty() {
        return Err(RowError::EmptyField(COLUMNS[index]));
    }
    Ok(value)
}

fn build_reader<R: Read>(reader: R) -> Reader<R> {
    ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader)
}

fn parse_row(result: Result<StringRecord, csv::Error>) -> Result<NewRecipeCombination, RowError> {
    let record = result.map_err(|error| RowError::Unreadable(error.to_string()))?;
    parse_record(&record)
}

/// Validate an import file without touching storage (dry-run)
pub fn scan<R: Read>(reader: R) -> Result<ScanOutcome, ImportError> {
    let mut csv_reader = build_reader(reader);
    let mut outcome = ScanOutcome {
        valid: 0,
        skipped: 0,
    };

    for (index, result) in csv_reader.records().enumerate() {
        match parse_row(result) {
            Ok(_) => outcome.valid += 1,
            Err(error) => {
                outcome.skipped += 1;
                // data rows start on line 2, after the header
                tracing::warn!("Skipping row at line {}: {}", index + 2, error);
            }
        }
    }

    Ok(outcome)
}

/// Replace the recipe combination table with the contents of an import file
///
/// Existing rows are deleted up front, then validated rows are inserted in
/// fixed-size batches, one transaction per batch, to bound memory and
/// transaction size. The run is not transactional across the whole file: a
/// crash mid-import leaves a partially-replaced table, which is why imports
/// run as an exclusive offline operation. Bad rows are skipped and counted,
/// never fatal; storage failures abort the run and are not retried.
pub async fn import_combinations<R: Read>(
    store: &PostgresClient,
    reader: R,
    batch_size: usize,
) -> Result<ImportReport, ImportError> {
    let run_id = Uuid::new_v4();
    let batch_size = batch_size.max(1);

    tracing::info!("Starting combination import run {}", run_id);

    let cleared = store.clear_combinations().await?;
    tracing::info!("Replacing table: {} existing rows deleted", cleared);

    let mut csv_reader = build_reader(reader);
    let mut batch: Vec<NewRecipeCombination> = Vec::with_capacity(batch_size);
    let mut inserted = 0usize;
    let mut skipped = 0usize;

    for (index, result) in csv_reader.records().enumerate() {
        match parse_row(result) {
            Ok(combination) => {
                batch.push(combination);
                if batch.len() >= batch_size {
                    store.insert_combinations(&batch).await?;
                    inserted += batch.len();
                    batch.clear();
                }
            }
            Err(error) => {
                skipped += 1;
                tracing::warn!("Skipping row at line {}: {}", index + 2, error);
            }
        }
    }

    if !batch.is_empty() {
        store.insert_combinations(&batch).await?;
        inserted += batch.len();
    }

    tracing::info!(
        "Import run {} finished: {} inserted, {} skipped",
        run_id,
        inserted,
        skipped
    );

    Ok(ImportReport {
        run_id,
        inserted,
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(fields: &[&str]) -> StringRecord {
        StringRecord::from(fields.to_vec())
    }

    #[test]
    fn test_parse_valid_record() {
        let row = parse_record(&record(&[
            "dinner",
            "chicken",
            "rice, peas, garlic",
            "savory",
            "30",
            "oven",
        ]))
        .unwrap();

        assert_eq!(row.meal_type, MealType::Dinner);
        assert_eq!(row.main_ingredient, "chicken");
        assert_eq!(row.supporting_ingredients, vec!["rice", "peas", "garlic"]);
        assert_eq!(row.taste_profile, TasteProfile::Savory);
        assert_eq!(row.cook_time_minutes, 30);
        assert_eq!(row.appliance, "oven");
        assert!(row.dietary_tags.is_empty());
    }

    #[test]
    fn test_parse_rejects_bad_cook_time() {
        let result = parse_record(&record(&[
            "dinner", "chicken", "rice", "savory", "abc", "oven",
        ]));
        assert_eq!(
            result.unwrap_err(),
            RowError::InvalidCookTime("abc".to_string())
        );
    }

    #[test]
    fn test_parse_rejects_negative_cook_time() {
        let result = parse_record(&record(&[
            "dinner", "chicken", "rice", "savory", "-5", "oven",
        ]));
        assert!(matches!(result, Err(RowError::InvalidCookTime(_))));
    }

    #[test]
    fn test_parse_rejects_short_record() {
        let result = parse_record(&record(&["dinner", "chicken", "rice"]));
        assert_eq!(result.unwrap_err(), RowError::TooFewFields { found: 3 });
    }

    #[test]
    fn test_parse_rejects_unknown_meal_type() {
        let result = parse_record(&record(&[
            "brunch", "chicken", "rice", "savory", "30", "oven",
        ]));
        assert_eq!(
            result.unwrap_err(),
            RowError::InvalidMealType("brunch".to_string())
        );
    }

    #[test]
    fn test_parse_rejects_empty_main() {
        let result = parse_record(&record(&["dinner", "  ", "rice", "savory", "30", "oven"]));
        assert_eq!(result.unwrap_err(), RowError::EmptyField("mainIngredient"));
    }

    #[test]
    fn test_optional_dietary_column() {
        let row = parse_record(&record(&[
            "dinner",
            "chicken",
            "rice",
            "savory",
            "30",
            "oven",
            "gluten-free, dairy-free",
        ]))
        .unwrap();
        assert_eq!(row.dietary_tags, vec!["gluten-free", "dairy-free"]);
    }

    #[test]
    fn test_split_strips_quotes() {
        assert_eq!(
            split_ingredient_list(r#""rice", 'peas',  beans , "#),
            vec!["rice", "peas", "beans"]
        );
    }

    #[test]
    fn test_scan_counts_skipped_rows() {
        let csv = "mealType,mainIngredient,supportingIngredients,tasteProfile,cookTime,appliance\n\
                   dinner,chicken,\"rice, peas\",savory,30,oven\n\
                   dinner,beef,\"potato, onion\",savory,abc,oven\n\
                   breakfast,egg,\"spinach, feta\",savory,10,stovetop\n";

        let outcome = scan(csv.as_bytes()).unwrap();
        assert_eq!(
            outcome,
            ScanOutcome {
                valid: 2,
                skipped: 1
            }
        );
    }

    #[test]
    fn test_scan_skips_header_only_file() {
        let csv = "mealType,mainIngredient,supportingIngredients,tasteProfile,cookTime,appliance\n";
        let outcome = scan(csv.as_bytes()).unwrap();
        assert_eq!(
            outcome,
            ScanOutcome {
                valid: 0,
                skipped: 0
            }
        );
    }
}
