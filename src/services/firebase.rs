use crate::models::SchoolRecord;
use moka::future::Cache;
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when reading from the school store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Store returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Firebase Realtime Database REST client
///
/// The school catalogue lives at `/schools` and changes rarely, so a small
/// in-process TTL cache fronts the fetch. No retries: a failed fetch fails
/// the request that triggered it.
pub struct FirebaseClient {
    database_url: String,
    auth_token: Option<String>,
    client: Client,
    cache: Option<Cache<&'static str, Arc<Vec<SchoolRecord>>>>,
}

const SCHOOLS_PATH: &str = "schools";
const CACHE_KEY: &str = "schools";

impl FirebaseClient {
    /// Create a new store client. A zero `cache_ttl_secs` disables caching.
    pub fn new(database_url: String, auth_token: Option<String>, cache_ttl_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        let cache = (cache_ttl_secs > 0).then(|| {
            Cache::builder()
                .max_capacity(1)
                .time_to_live(Duration::from_secs(cache_ttl_secs))
                .build()
        });

        Self {
            database_url,
            auth_token,
            client,
            cache,
        }
    }

    fn schools_url(&self) -> String {
        let base = self.database_url.trim_end_matches('/');
        match &self.auth_token {
            Some(token) => format!("{}/{}.json?auth={}", base, SCHOOLS_PATH, token),
            None => format!("{}/{}.json", base, SCHOOLS_PATH),
        }
    }

    /// Fetch the full school collection, read-only.
    ///
    /// An empty store yields an empty vector; malformed entries are skipped
    /// rather than failing the whole list.
    pub async fn fetch_all_schools(&self) -> Result<Vec<SchoolRecord>, StoreError> {
        if let Some(cache) = &self.cache {
            if let Some(schools) = cache.get(CACHE_KEY).await {
                tracing::trace!("School list cache hit ({} schools)", schools.len());
                return Ok(schools.as_ref().clone());
            }
        }

        tracing::debug!("Fetching school list from store");

        let response = self.client.get(self.schools_url()).send().await?;

        if !response.status().is_success() {
            return Err(StoreError::ApiError(format!(
                "Failed to fetch schools: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;
        let schools = parse_school_payload(json)?;

        tracing::debug!("Fetched {} schools from store", schools.len());

        if let Some(cache) = &self.cache {
            cache.insert(CACHE_KEY, Arc::new(schools.clone())).await;
        }

        Ok(schools)
    }
}

/// The realtime database returns `null` for an empty path, a plain array
/// for integer-keyed data, and an object keyed by push id otherwise.
fn parse_school_payload(json: Value) -> Result<Vec<SchoolRecord>, StoreError> {
    let schools = match json {
        Value::Null => vec![],
        Value::Array(items) => items
            .into_iter()
            .filter(|item| !item.is_null())
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        Value::Object(map) => map
            .into_iter()
            .filter_map(|(_, item)| serde_json::from_value(item).ok())
            .collect(),
        other => {
            return Err(StoreError::InvalidResponse(format!(
                "Unexpected payload shape: {}",
                other
            )));
        }
    };

    Ok(schools)
}
