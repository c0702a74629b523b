use anyhow::Context;
use dotenv::dotenv;
use reqwest::Client;
use std::env;
use std::error::Error;
use std::fmt;
use std::path::Path;
use std::time::Duration;
use tokio::time::sleep;

use super::endpoints::{FoodSearchResponse, FoundFood, NutrientCsvRow, FDC_SEARCH_URL};

/// Pause between search requests. FDC throttles keyed requests, and the
/// reference list is small enough that one request a second finishes in
/// a few minutes.
const REQUEST_PAUSE: Duration = Duration::from_secs(1);

#[derive(Debug)]
pub enum FdcConnectionError {
    MissingApiKey(String),
    NetworkError(reqwest::Error),
    SerializationError(serde_json::Error),
    ApiError {
        status: reqwest::StatusCode,
        error_body: String,
    },
}

impl fmt::Display for FdcConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FdcConnectionError::MissingApiKey(key_name) => {
                write!(f, "API key not found in environment: {}", key_name)
            }
            FdcConnectionError::NetworkError(err) => write!(f, "Network error: {}", err),
            FdcConnectionError::SerializationError(err) => {
                write!(f, "Serialization error: {}", err)
            }
            FdcConnectionError::ApiError { status, error_body } => {
                write!(f, "API error {}: {}", status, error_body)
            }
        }
    }
}

impl Error for FdcConnectionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FdcConnectionError::NetworkError(err) => Some(err),
            FdcConnectionError::SerializationError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for FdcConnectionError {
    fn from(err: reqwest::Error) -> Self {
        FdcConnectionError::NetworkError(err)
    }
}

impl From<serde_json::Error> for FdcConnectionError {
    fn from(err: serde_json::Error) -> Self {
        FdcConnectionError::SerializationError(err)
    }
}

/// Client for the USDA FoodData Central search endpoint. The API key is
/// resolved from the environment at request time, never stored.
pub struct FdcClient {
    api_key_env_var: String,
    client: Client,
}

impl FdcClient {
    pub fn new(api_key_env_var: &str) -> Self {
        dotenv().ok();
        Self {
            api_key_env_var: api_key_env_var.to_string(),
            client: Client::new(),
        }
    }

    fn api_key(&self) -> Result<String, FdcConnectionError> {
        env::var(&self.api_key_env_var)
            .map_err(|_| FdcConnectionError::MissingApiKey(self.api_key_env_var.clone()))
    }

    /// Returns the best FDC hit for one query, or `None` when the search
    /// comes back empty.
    pub async fn search_food(&self, query: &str) -> Result<Option<FoundFood>, FdcConnectionError> {
        let api_key = self.api_key()?;
        let response = self
            .client
            .get(FDC_SEARCH_URL)
            .query(&[
                ("api_key", api_key.as_str()),
                ("query", query),
                ("pageSize", "1"),
            ])
            .send()
            .await?;

        if response.status().is_success() {
            let body = response.text().await?;
            let search: FoodSearchResponse = serde_json::from_str(&body)?;
            Ok(search.foods.into_iter().next())
        } else {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            Err(FdcConnectionError::ApiError { status, error_body })
        }
    }

    /// Queries every food once, pausing between requests. A missing key
    /// fails the run before the first request; failures on individual
    /// foods are reported and skipped.
    pub async fn fetch_reference_rows(
        &self,
        foods: &[&str],
        progress: &impl Fn(String),
    ) -> Result<Vec<NutrientCsvRow>, FdcConnectionError> {
        self.api_key()?;

        let mut rows = Vec::with_capacity(foods.len());
        for (index, food) in foods.iter().enumerate() {
            match self.search_food(food).await {
                Ok(Some(hit)) => rows.push(NutrientCsvRow::from_search_hit(food, &hit)),
                Ok(None) => progress(format!(" > No data found for {}", food)),
                Err(error) => progress(format!(" > Skipping {}: {}", food, error)),
            }
            if index + 1 < foods.len() {
                sleep(REQUEST_PAUSE).await;
            }
        }
        Ok(rows)
    }
}

/// Writes fetched rows as the nutrient reference CSV consumed by
/// `NutrientTable::load`. Missing nutrient values become empty cells.
pub fn write_nutrient_csv(path: &Path, rows: &[NutrientCsvRow]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create nutrient CSV at {:?}", path))?;
    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("Failed to write nutrient row for '{}'", row.food))?;
    }
    writer.flush().context("Failed to flush nutrient CSV")?;
    Ok(())
}
