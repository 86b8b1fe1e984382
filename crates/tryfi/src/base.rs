//! Base stations (charging bases that relay collar traffic).

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tryfi_api::BaseResponse;

use crate::TryFiError;
use crate::mapping::parse_optional_timestamp;

/// A TryFi base station.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaseStation {
    pub base_id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub online: bool,
    /// Left as reported; its shape differs between firmware versions.
    pub online_quality: Option<serde_json::Value>,
    pub network_name: Option<String>,
    /// When the base last reported its own details.
    pub info_last_updated: Option<DateTime<Utc>>,
    pub last_seen_at: Option<DateTime<Utc>>,
    /// When this record was fetched.
    pub last_updated: DateTime<Utc>,
}

impl BaseStation {
    pub fn from_response(response: &BaseResponse, now: DateTime<Utc>) -> Result<Self, TryFiError> {
        Ok(Self {
            base_id: response.base_id.clone(),
            name: response.name.clone(),
            latitude: response.position.latitude,
            longitude: response.position.longitude,
            online: response.online,
            online_quality: response.online_quality.clone(),
            network_name: response.network_name.clone(),
            info_last_updated: parse_optional_timestamp(
                "infoLastUpdated",
                response.info_last_updated.as_deref(),
            )?,
            last_seen_at: parse_optional_timestamp("lastSeenAt", response.last_seen_at.as_deref())?,
            last_updated: now,
        })
    }
}

impl fmt::Display for BaseStation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Last Updated - {} - Base ID: {} Name: {} Online Status: {} Wifi Network: {} Located: {},{}",
            self.last_updated,
            self.base_id,
            self.name,
            self.online,
            self.network_name.as_deref().unwrap_or(""),
            self.latitude,
            self.longitude
        )
    }
}
