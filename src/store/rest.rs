//! Hosted store REST backend
//!
//! Reads and writes table rows through the store's REST API:
//! `GET {url}/rest/v1/{table}?select=*`. Every request carries the project
//! API key in both the `apikey` and bearer `Authorization` headers.

use crate::config::StoreConfig;
use crate::constants::store::{REST_PATH, USER_AGENT};
use crate::error::{Error, Result};
use crate::fleet::{ContainerRow, RouteRow};
use crate::store::FleetSource;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, warn};

/// REST client for the hosted store
#[derive(Debug, Clone)]
pub struct RestStore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    containers_table: String,
    routes_table: String,
}

impl RestStore {
    /// Create a client for the store at `base_url`
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(Error::Config(
                "Store URL is not set (config key store.url)".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            containers_table: crate::constants::store::CONTAINERS_TABLE.to_string(),
            routes_table: crate::constants::store::ROUTES_TABLE.to_string(),
        })
    }

    /// Create a client from the `[store]` config section
    pub fn from_config(config: &StoreConfig) -> Result<Self> {
        let mut store = Self::new(
            &config.url,
            &config.api_key,
            Duration::from_secs(config.timeout_secs),
        )?;
        store.containers_table = config.containers_table.clone();
        store.routes_table = config.routes_table.clone();
        Ok(store)
    }

    /// REST endpoint of a table
    pub fn table_url(&self, table: &str) -> String {
        format!(
            "{}{}/{}",
            self.base_url,
            REST_PATH,
            urlencoding::encode(table)
        )
    }

    async fn fetch_table<T: DeserializeOwned>(&self, table: &str) -> Result<Vec<T>> {
        let url = format!("{}?select=*", self.table_url(table));
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| Error::Store(format!("Request for {} failed: {}", table, e)))?;

        if !response.status().is_success() {
            return Err(Error::Store(format!(
                "Store returned status {} for table {}",
                response.status(),
                table
            )));
        }

        let raw: Vec<serde_json::Value> = response
            .json()
            .await
            .map_err(|e| Error::Store(format!("Failed to parse {} rows: {}", table, e)))?;

        // A row that cannot be read at all is dropped; the rest still render
        let total = raw.len();
        let rows: Vec<T> = raw
            .into_iter()
            .enumerate()
            .filter_map(|(i, value)| match serde_json::from_value(value) {
                Ok(row) => Some(row),
                Err(e) => {
                    warn!("Skipping {} row {}: {}", table, i, e);
                    None
                }
            })
            .collect();

        info!("Fetched {} of {} rows from {}", rows.len(), total, table);
        Ok(rows)
    }

    async fn insert_rows<T: Serialize>(&self, table: &str, rows: &[T]) -> Result<()> {
        let url = self.table_url(table);
        debug!("POST {} ({} rows)", url, rows.len());

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.api_key)
            .header("Prefer", "return=minimal")
            .bearer_auth(&self.api_key)
            .json(rows)
            .send()
            .await
            .map_err(|e| Error::Store(format!("Insert into {} failed: {}", table, e)))?;

        if !response.status().is_success() {
            return Err(Error::Store(format!(
                "Store returned status {} inserting into {}",
                response.status(),
                table
            )));
        }

        info!("Inserted {} rows into {}", rows.len(), table);
        Ok(())
    }

    /// Insert container rows
    pub async fn insert_containers(&self, rows: &[ContainerRow]) -> Result<()> {
        self.insert_rows(&self.containers_table, rows).await
    }

    /// Insert route rows
    pub async fn insert_routes(&self, rows: &[RouteRow]) -> Result<()> {
        self.insert_rows(&self.routes_table, rows).await
    }
}

impl FleetSource for RestStore {
    fn name(&self) -> &str {
        "rest"
    }

    async fn fetch_containers(&self) -> Result<Vec<ContainerRow>> {
        self.fetch_table(&self.containers_table).await
    }

    async fn fetch_routes(&self) -> Result<Vec<RouteRow>> {
        self.fetch_table(&self.routes_table).await
    }
}
