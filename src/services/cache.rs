use redis::aio::ConnectionManager;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::models::FilterCriteria;

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    RedisError(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Cache miss: {0}")]
    CacheMiss(String),
}

/// Two-tier cache for valid-ingredient lookups
///
/// L1 is an in-process moka cache, L2 is Redis shared across instances.
/// Entries expire on TTL only: the bulk importer runs as a separate offline
/// process, so cached results age out rather than being invalidated across
/// processes.
pub struct CacheManager {
    redis: Arc<tokio::sync::Mutex<ConnectionManager>>,
    l1_cache: moka::future::Cache<String, Vec<u8>>,
    ttl_secs: u64,
}

impl CacheManager {
    /// Create a new cache manager
    pub async fn new(redis_url: &str, l1_size: u64, ttl_secs: u64) -> Result<Self, CacheError> {
        let client = redis::Client::open(redis_url)?;
        let redis = redis::aio::ConnectionManager::new(client).await?;

        let l1_cache = moka::future::CacheBuilder::new(l1_size)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Ok(Self {
            redis: Arc::new(tokio::sync::Mutex::new(redis)),
            l1_cache,
            ttl_secs,
        })
    }

    /// Get a value from cache (L1 first, then L2)
    pub async fn get<T>(&self, key: &str) -> Result<T, CacheError>
    where
        T: for<'de> Deserialize<'de>,
    {
        if let Some(bytes) = self.l1_cache.get(key).await {
            tracing::trace!("L1 cache hit: {}", key);
            return Ok(serde_json::from_slice(&bytes)?);
        }

        let mut conn = self.redis.lock().await;
        let value: Option<String> = redis::cmd("GET")
            .arg(key)
            .query_async(&mut *conn)
            .await?;
        drop(conn);

        if let Some(json) = value {
            tracing::trace!("L2 cache hit: {}", key);

            self.l1_cache
                .insert(key.to_string(), json.as_bytes().to_vec())
                .await;

            return Ok(serde_json::from_str(&json)?);
        }

        tracing::trace!("Cache miss: {}", key);
        Err(CacheError::CacheMiss(key.to_string()))
    }

    /// Set a value in cache (both L1 and L2)
    pub async fn set<T>(&self, key: &str, value: &T) -> Result<(), CacheError>
    where
        T: Serialize,
    {
        let json = serde_json::to_string(value)?;

        self.l1_cache
            .insert(key.to_string(), json.as_bytes().to_vec())
            .await;

        let mut conn = self.redis.lock().await;
        redis::cmd("SETEX")
            .arg(key)
            .arg(self.ttl_secs)
            .arg(json)
            .query_async::<()>(&mut *conn)
            .await?;
        drop(conn);

        tracing::trace!("Cache set: {}", key);
        Ok(())
    }

    /// Delete a value from both cache tiers
    pub async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.l1_cache.invalidate(key).await;
        let mut conn = self.redis.lock().await;
        redis::cmd("DEL")
            .arg(key)
            .query_async::<()>(&mut *conn)
            .await?;
        Ok(())
    }

    /// Current L1 entry count
    pub fn l1_size(&self) -> u64 {
        self.l1_cache.entry_count()
    }
}

/// Cache key builder
///
/// Keys embed a stable fingerprint of the criteria so distinct preference
/// combinations never collide.
pub struct CacheKey;

impl CacheKey {
    /// Key for the valid main ingredients under the criteria
    pub fn valid_mains(criteria: &FilterCriteria) -> String {
        format!("valid-mains:{}", Self::fingerprint(criteria))
    }

    /// Key for the valid supporting ingredients of a main
    pub fn valid_supporting(main_ingredient: &str, criteria: &FilterCriteria) -> String {
        format!(
            "valid-supporting:{}:{}",
            main_ingredient.trim().to_lowercase(),
            Self::fingerprint(criteria)
        )
    }

    fn fingerprint(criteria: &FilterCriteria) -> String {
        let meal = criteria
            .meal_type
            .map_or("*", |meal_type| meal_type.as_str());
        let taste = criteria
            .taste_profile
            .map_or("*", |taste_profile| taste_profile.as_str());
        let cook_time = criteria
            .cook_time_minutes
            .map_or_else(|| "*".to_string(), |minutes| minutes.to_string());

        let mut appliances: Vec<String> = criteria
            .appliances
            .iter()
            .map(|appliance| appliance.trim().to_lowercase())
            .collect();
        appliances.sort();

        format!("{}:{}:{}:{}", meal, taste, cook_time, appliances.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MealType, TasteProfile};

    #[tokio::test]
    #[ignore = "Requires Redis"]
    async fn test_cache_set_get() {
        let cache = CacheManager::new("redis://127.0.0.1:6379", 1000, 60)
            .await
            .expect("Failed to create cache");

        let key = "test_key";
        let value = vec!["chicken".to_string()];

        cache.set(key, &value).await.unwrap();
        let result: Vec<String> = cache.get(key).await.unwrap();
        assert_eq!(result, value);

        cache.delete(key).await.unwrap();
        assert!(cache.get::<Vec<String>>(key).await.is_err());
    }

    #[test]
    fn test_wildcard_key() {
        let key = CacheKey::valid_mains(&FilterCriteria::default());
        assert_eq!(key, "valid-mains:*:*:*:");
    }

    #[test]
    fn test_key_embeds_criteria() {
        let criteria = FilterCriteria {
            meal_type: Some(MealType::Dinner),
            taste_profile: Some(TasteProfile::Savory),
            cook_time_minutes: Some(30),
            appliances: vec!["Oven".to_string(), "air fryer".to_string()],
        };

        let key = CacheKey::valid_mains(&criteria);
        assert_eq!(key, "valid-mains:dinner:savory:30:air fryer,oven");
    }

    #[test]
    fn test_appliance_order_does_not_change_key() {
        let a = FilterCriteria {
            appliances: vec!["oven".to_string(), "stovetop".to_string()],
            ..Default::default()
        };
        let b = FilterCriteria {
            appliances: vec!["stovetop".to_string(), "oven".to_string()],
            ..Default::default()
        };

        assert_eq!(CacheKey::valid_mains(&a), CacheKey::valid_mains(&b));
    }

    #[test]
    fn test_supporting_key_includes_main() {
        let key = CacheKey::valid_supporting(" Chicken ", &FilterCriteria::default());
        assert!(key.starts_with("valid-supporting:chicken:"));
    }
}
