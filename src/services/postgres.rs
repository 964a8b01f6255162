use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;

use crate::core::fuzzy::normalize;
use crate::models::{FilterCriteria, MealType, RecipeCombination, TasteProfile};

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),
}

/// Combination row about to be inserted by the bulk importer (no id yet)
#[derive(Debug, Clone)]
pub struct NewRecipeCombination {
    pub meal_type: MealType,
    pub main_ingredient: String,
    pub supporting_ingredients: Vec<String>,
    pub taste_profile: TasteProfile,
    pub dietary_tags: Vec<String>,
    pub cook_time_minutes: u32,
    pub appliance: String,
}

const COMBINATION_COLUMNS: &str = "id, meal_type, main_ingredient, supporting_ingredients, \
     taste_profile, dietary_tags, cook_time_minutes, appliance";

/// PostgreSQL client for the recipe combination table
///
/// The matching read path only issues criteria-filtered SELECTs; the bulk
/// importer is the single writer and replaces the table delete-then-insert,
/// one transaction per batch.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
    ) -> Result<Self, PostgresError> {
        tracing::info!("Connecting to PostgreSQL with URL: {}", url);

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
        )
        .await
    }

    /// Fetch combination rows matching the criteria
    ///
    /// Unset criteria fields do not constrain the query; the appliance set
    /// matches by membership, case-insensitively. Rows come back in id order
    /// so in-memory re-filtering sees a stable source order.
    pub async fn fetch_combinations(
        &self,
        criteria: &FilterCriteria,
    ) -> Result<Vec<RecipeCombination>, PostgresError> {
        let query = format!(
            r#"
            SELECT {COMBINATION_COLUMNS}
            FROM recipe_combinations
            WHERE ($1::meal_type IS NULL OR meal_type = $1)
              AND ($2::taste_profile IS NULL OR taste_profile = $2)
              AND ($3::int IS NULL OR cook_time_minutes = $3)
              AND (cardinality($4::text[]) = 0 OR lower(appliance) = ANY($4))
            ORDER BY id
        "#
        );

        let rows = sqlx::query(&query)
            .bind(criteria.meal_type)
            .bind(criteria.taste_profile)
            .bind(criteria.cook_time_minutes.map(|minutes| minutes as i32))
            .bind(normalized_appliances(criteria))
            .fetch_all(&self.pool)
            .await?;

        let combinations = rows
            .iter()
            .map(row_to_combination)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!("Fetched {} combination rows", combinations.len());

        Ok(combinations)
    }

    /// Fetch combination rows for one main ingredient, plus the criteria
    pub async fn fetch_combinations_for_main(
        &self,
        main_ingredient: &str,
        criteria: &FilterCriteria,
    ) -> Result<Vec<RecipeCombination>, PostgresError> {
        let query = format!(
            r#"
            SELECT {COMBINATION_COLUMNS}
            FROM recipe_combinations
            WHERE main_ingredient = $5
              AND ($1::meal_type IS NULL OR meal_type = $1)
              AND ($2::taste_profile IS NULL OR taste_profile = $2)
              AND ($3::int IS NULL OR cook_time_minutes = $3)
              AND (cardinality($4::text[]) = 0 OR lower(appliance) = ANY($4))
            ORDER BY id
        "#
        );

        let rows = sqlx::query(&query)
            .bind(criteria.meal_type)
            .bind(criteria.taste_profile)
            .bind(criteria.cook_time_minutes.map(|minutes| minutes as i32))
            .bind(normalized_appliances(criteria))
            .bind(main_ingredient.trim())
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(row_to_combination)
            .collect::<Result<Vec<_>, _>>()
            .map_err(Into::into)
    }

    /// Delete every combination row ahead of a bulk import
    pub async fn clear_combinations(&self) -> Result<u64, PostgresError> {
        let result = sqlx::query("DELETE FROM recipe_combinations")
            .execute(&self.pool)
            .await?;

        tracing::info!("Cleared {} combination rows", result.rows_affected());

        Ok(result.rows_affected())
    }

    /// Insert one import batch inside a single transaction
    pub async fn insert_combinations(
        &self,
        batch: &[NewRecipeCombination],
    ) -> Result<(), PostgresError> {
        let mut tx = self.pool.begin().await?;

        for row in batch {
            sqlx::query(
                r#"
                INSERT INTO recipe_combinations
                    (meal_type, main_ingredient, supporting_ingredients,
                     taste_profile, dietary_tags, cook_time_minutes, appliance)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
            )
            .bind(row.meal_type)
            .bind(&row.main_ingredient)
            .bind(&row.supporting_ingredients)
            .bind(row.taste_profile)
            .bind(&row.dietary_tags)
            .bind(row.cook_time_minutes as i32)
            .bind(&row.appliance)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::debug!("Inserted batch of {} combination rows", batch.len());

        Ok(())
    }

    /// Count combination rows (import reporting, smoke checks)
    pub async fn count_combinations(&self) -> Result<i64, PostgresError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM recipe_combinations")
            .fetch_one(&self.pool)
            .await?;

        Ok(row.try_get("total")?)
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

fn row_to_combination(row: &sqlx::postgres::PgRow) -> Result<RecipeCombination, sqlx::Error> {
    let cook_time: i32 = row.try_get("cook_time_minutes")?;

    Ok(RecipeCombination {
        id: row.try_get("id")?,
        meal_type: row.try_get("meal_type")?,
        main_ingredient: row.try_get("main_ingredient")?,
        supporting_ingredients: row.try_get("supporting_ingredients")?,
        taste_profile: row.try_get("taste_profile")?,
        dietary_tags: row.try_get("dietary_tags")?,
        cook_time_minutes: cook_time.max(0) as u32,
        appliance: row.try_get("appliance")?,
    })
}

fn normalized_appliances(criteria: &FilterCriteria) -> Vec<String> {
    criteria
        .appliances
        .iter()
        .map(|appliance| normalize(appliance))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_appliances() {
        let criteria = FilterCriteria {
            appliances: vec![" Air Fryer ".to_string(), "OVEN".to_string()],
            ..Default::default()
        };

        assert_eq!(normalized_appliances(&criteria), vec!["air fryer", "oven"]);
    }

    #[test]
    fn test_wildcard_criteria_bind_no_constraints() {
        let criteria = FilterCriteria::default();
        assert!(criteria.is_wildcard());
        assert!(normalized_appliances(&criteria).is_empty());
    }
}
