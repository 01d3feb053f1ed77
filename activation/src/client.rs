//! HTTP client for the vendor's allow-list.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{NaiveDate, Utc};
use timbro_types::TenantId;

use crate::{ActivationInfo, ActivationStatus};

/// Fetches the published allow-list and resolves one tenant's status.
///
/// Consulted once per session at startup, never on the scan path.
#[derive(Clone)]
pub struct ActivationClient {
    http: reqwest::Client,
    database_url: String,
}

impl ActivationClient {
    /// Point the client at the raw URL of the published JSON list.
    pub fn new(database_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .connect_timeout(Duration::from_secs(5))
            .build()?;
        Ok(Self {
            http,
            database_url: database_url.into(),
        })
    }

    /// Check a tenant's activation status as of today (UTC).
    pub async fn check_tenant(&self, tenant: &TenantId) -> ActivationStatus {
        self.check_tenant_on(tenant, Utc::now().date_naive()).await
    }

    /// Same as [`check_tenant`](Self::check_tenant) with an explicit date.
    pub async fn check_tenant_on(&self, tenant: &TenantId, today: NaiveDate) -> ActivationStatus {
        let list = match self.fetch_list().await {
            Ok(list) => list,
            Err(reason) => {
                tracing::warn!(%tenant, %reason, "activation check failed");
                return ActivationStatus::Error;
            }
        };

        match list.get(tenant.as_str()) {
            Some(info) => info.evaluate(today),
            None => ActivationStatus::NotFound,
        }
    }

    async fn fetch_list(&self) -> Result<HashMap<String, ActivationInfo>, String> {
        // Cache-busting parameter; gist-style hosts serve stale bodies
        // otherwise.
        let url = format!(
            "{}?cachebust={}",
            self.database_url,
            Utc::now().timestamp_millis()
        );

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| format!("request failed: {e}"))?;

        if !response.status().is_success() {
            return Err(format!("list host returned HTTP {}", response.status()));
        }

        response
            .json()
            .await
            .map_err(|e| format!("invalid allow-list JSON: {e}"))
    }
}
