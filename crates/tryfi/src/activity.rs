//! Pet location, step and rest statistics.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;
use tryfi_api::{ActivityResponse, ActivitySummary, RestFeed, RestStatsResponse, StatsResponse};

use crate::TryFiError;
use crate::mapping::{parse_optional_timestamp, parse_timestamp};

/// Where a pet is and what it is doing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    /// `Rest`, `OngoingWalk`, ...
    pub activity_type: String,
    pub area_name: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    /// When the current activity started.
    pub start_time: DateTime<Utc>,
    pub place_name: Option<String>,
    pub place_address: Option<String>,
    pub last_report: Option<DateTime<Utc>>,
    pub last_updated: DateTime<Utc>,
}

impl Location {
    /// Walks report a trail of positions; the pet is at the last one.
    pub fn from_response(response: &ActivityResponse, now: DateTime<Utc>) -> Result<Self, TryFiError> {
        let walk_end = response
            .positions
            .as_ref()
            .and_then(|positions| positions.last())
            .map(|p| p.position);

        let position = match response.typename.as_str() {
            "OngoingWalk" => walk_end,
            _ => response.position.or(walk_end),
        }
        .ok_or_else(|| {
            TryFiError::MalformedResponse(format!(
                "{} activity without a position",
                response.typename
            ))
        })?;

        let place = response.place.as_ref();

        Ok(Self {
            activity_type: response.typename.clone(),
            area_name: response.area_name.clone(),
            latitude: position.latitude,
            longitude: position.longitude,
            start_time: parse_timestamp("start", &response.start)?,
            place_name: place.and_then(|p| p.name.clone()),
            place_address: place.and_then(|p| p.address.clone()),
            last_report: parse_optional_timestamp(
                "lastReportTimestamp",
                response.last_report_timestamp.as_deref(),
            )?,
            last_updated: now,
        })
    }
}

/// Steps and distance over one period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeriodStats {
    pub step_goal: u64,
    pub total_steps: u64,
    /// Metres.
    pub total_distance: f64,
}

impl From<&ActivitySummary> for PeriodStats {
    fn from(summary: &ActivitySummary) -> Self {
        Self {
            step_goal: summary.step_goal,
            total_steps: summary.total_steps,
            total_distance: summary.total_distance,
        }
    }
}

/// Daily, weekly and monthly step statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ActivityStats {
    pub daily: PeriodStats,
    pub weekly: PeriodStats,
    pub monthly: PeriodStats,
    pub last_updated: DateTime<Utc>,
}

impl ActivityStats {
    pub fn from_response(response: &StatsResponse, now: DateTime<Utc>) -> Self {
        Self {
            daily: (&response.daily_stat).into(),
            weekly: (&response.weekly_stat).into(),
            monthly: (&response.monthly_stat).into(),
            last_updated: now,
        }
    }
}

/// Seconds of sleep and naps over one period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SleepTotals {
    pub sleep_secs: u64,
    pub nap_secs: u64,
}

impl SleepTotals {
    /// Reads the latest rest summary of a feed; an empty feed is all zeroes.
    fn from_feed(feed: &RestFeed) -> Self {
        let mut totals = Self::default();
        let Some(summary) = feed.rest_summaries.first() else {
            return totals;
        };

        for amount in &summary.data.sleep_amounts {
            match amount.kind.as_str() {
                "SLEEP" => totals.sleep_secs = amount.duration,
                "NAP" => totals.nap_secs = amount.duration,
                other => debug!(kind = other, "ignoring unknown sleep amount type"),
            }
        }
        totals
    }
}

/// Daily, weekly and monthly rest statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RestStats {
    pub daily: SleepTotals,
    pub weekly: SleepTotals,
    pub monthly: SleepTotals,
    pub last_updated: DateTime<Utc>,
}

impl RestStats {
    pub fn from_response(response: &RestStatsResponse, now: DateTime<Utc>) -> Self {
        Self {
            daily: SleepTotals::from_feed(&response.daily_stat),
            weekly: SleepTotals::from_feed(&response.weekly_stat),
            monthly: SleepTotals::from_feed(&response.monthly_stat),
            last_updated: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 30, 0).unwrap()
    }

    fn location(value: serde_json::Value) -> Result<Location, TryFiError> {
        let response: ActivityResponse = serde_json::from_value(value).unwrap();
        Location::from_response(&response, now())
    }

    #[test]
    fn test_rest_location() {
        let loc = location(json!({
            "__typename": "Rest",
            "areaName": "Home",
            "lastReportTimestamp": "2024-01-01T12:00:00Z",
            "position": { "latitude": 40.7128, "longitude": -74.0060 },
            "place": { "name": "Home", "address": "123 Main St" },
            "start": "2024-01-01T11:00:00Z"
        }))
        .unwrap();

        assert_eq!(
            loc,
            Location {
                activity_type: "Rest".to_string(),
                area_name: Some("Home".to_string()),
                latitude: 40.7128,
                longitude: -74.0060,
                start_time: Utc.with_ymd_and_hms(2024, 1, 1, 11, 0, 0).unwrap(),
                place_name: Some("Home".to_string()),
                place_address: Some("123 Main St".to_string()),
                last_report: Some(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()),
                last_updated: now(),
            }
        );
    }

    #[test]
    fn test_walk_uses_last_position() {
        let loc = location(json!({
            "__typename": "OngoingWalk",
            "areaName": "Park",
            "positions": [
                { "position": { "latitude": 40.7128, "longitude": -74.0060 } },
                { "position": { "latitude": 40.7130, "longitude": -74.0062 } }
            ],
            "start": "2024-01-01T11:30:00Z"
        }))
        .unwrap();

        assert_eq!(loc.activity_type, "OngoingWalk");
        assert_eq!(loc.latitude, 40.7130);
        assert_eq!(loc.longitude, -74.0062);
        assert_eq!(loc.last_report, None);
    }

    #[test]
    fn test_location_without_place() {
        let loc = location(json!({
            "__typename": "Rest",
            "areaName": "Unknown",
            "position": { "latitude": 40.7128, "longitude": -74.0060 },
            "start": "2024-01-01T11:00:00Z"
        }))
        .unwrap();

        assert_eq!(loc.place_name, None);
        assert_eq!(loc.place_address, None);
    }

    #[test]
    fn test_walk_without_positions_is_malformed() {
        let result = location(json!({
            "__typename": "OngoingWalk",
            "positions": [],
            "start": "2024-01-01T11:30:00Z"
        }));
        assert!(matches!(result, Err(TryFiError::MalformedResponse(_))));
    }

    #[test]
    fn test_activity_stats() {
        let response: StatsResponse = serde_json::from_value(json!({
            "dailyStat": { "stepGoal": 5000, "totalSteps": 3000, "totalDistance": 2000.5 },
            "weeklyStat": { "stepGoal": 35000, "totalSteps": 21000, "totalDistance": 14000.75 },
            "monthlyStat": { "stepGoal": 150000, "totalSteps": 90000, "totalDistance": 60000.25 }
        }))
        .unwrap();

        let stats = ActivityStats::from_response(&response, now());
        assert_eq!(
            stats.daily,
            PeriodStats {
                step_goal: 5000,
                total_steps: 3000,
                total_distance: 2000.5
            }
        );
        assert_eq!(stats.weekly.total_steps, 21000);
        assert_eq!(stats.monthly.total_distance, 60000.25);
    }

    #[test]
    fn test_rest_stats() {
        let feed = |sleep: u64, nap: u64| {
            json!({
                "restSummaries": [{
                    "data": {
                        "sleepAmounts": [
                            { "type": "SLEEP", "duration": sleep },
                            { "type": "NAP", "duration": nap }
                        ]
                    }
                }]
            })
        };
        let response: RestStatsResponse = serde_json::from_value(json!({
            "dailyStat": feed(28800, 3600),
            "weeklyStat": feed(201600, 25200),
            "monthlyStat": { "restSummaries": [] }
        }))
        .unwrap();

        let rest = RestStats::from_response(&response, now());
        assert_eq!(
            rest.daily,
            SleepTotals {
                sleep_secs: 28800,
                nap_secs: 3600
            }
        );
        assert_eq!(rest.weekly.nap_secs, 25200);
        assert_eq!(rest.monthly, SleepTotals::default());
    }

    #[test]
    fn test_rest_stats_bad_duration_is_rejected() {
        let result = serde_json::from_value::<RestStatsResponse>(json!({
            "dailyStat": {
                "restSummaries": [{
                    "data": { "sleepAmounts": [{ "type": "SLEEP", "duration": "invalid_int" }] }
                }]
            },
            "weeklyStat": { "restSummaries": [] },
            "monthlyStat": { "restSummaries": [] }
        }));
        assert!(result.is_err());
    }
}
