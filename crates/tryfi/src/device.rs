//! Collars and their LED colours.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;
use tryfi_api::documents::{PET_MODE_LOST, PET_MODE_NORMAL};
use tryfi_api::{AvailableLedColor, ConnectionStateResponse, DeviceResponse};

use crate::TryFiError;
use crate::mapping::{accurate_led_status, battery_percent, led_off_at, parse_optional_timestamp, parse_timestamp};

/// Collar operating mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DeviceMode {
    Normal,
    Lost,
    /// A mode this client does not know about.
    Other(String),
}

impl DeviceMode {
    pub fn from_api(mode: &str) -> Self {
        match mode {
            PET_MODE_NORMAL => Self::Normal,
            PET_MODE_LOST => Self::Lost,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Normal => PET_MODE_NORMAL,
            Self::Lost => PET_MODE_LOST,
            Self::Other(mode) => mode,
        }
    }
}

impl fmt::Display for DeviceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the collar last reached the cloud.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ConnectionState {
    /// Bluetooth to a family member's phone.
    User { first_name: String, last_name: String },
    /// Via a base station.
    Base { base_id: String },
    Cellular { signal_strength_percent: Option<u32> },
    /// Any other `__typename`.
    Unknown(String),
}

impl ConnectionState {
    fn from_response(response: &ConnectionStateResponse) -> Result<Self, TryFiError> {
        match response.typename.as_str() {
            "ConnectedToUser" => {
                let user = response.user.as_ref().ok_or_else(|| {
                    TryFiError::MalformedResponse("ConnectedToUser without user".to_string())
                })?;
                Ok(Self::User {
                    first_name: user.first_name.clone(),
                    last_name: user.last_name.clone(),
                })
            }
            "ConnectedToBase" => {
                let base = response.charging_base.as_ref().ok_or_else(|| {
                    TryFiError::MalformedResponse("ConnectedToBase without chargingBase".to_string())
                })?;
                Ok(Self::Base {
                    base_id: base.id.clone(),
                })
            }
            "ConnectedToCellular" => Ok(Self::Cellular {
                signal_strength_percent: response.signal_strength_percent,
            }),
            other => Ok(Self::Unknown(other.to_string())),
        }
    }

    /// The vendor's `__typename` for this state.
    pub fn typename(&self) -> &str {
        match self {
            Self::User { .. } => "ConnectedToUser",
            Self::Base { .. } => "ConnectedToBase",
            Self::Cellular { .. } => "ConnectedToCellular",
            Self::Unknown(typename) => typename,
        }
    }

    /// Human-readable description of what the collar is connected to.
    ///
    /// `None` for unknown states and for cellular without a signal reading.
    pub fn description(&self) -> Option<String> {
        match self {
            Self::User {
                first_name,
                last_name,
            } => Some(format!("{} {}", first_name, last_name)),
            Self::Base { base_id } => Some(format!("Base ID - {}", base_id)),
            Self::Cellular {
                signal_strength_percent: Some(pct),
            } => Some(format!("Cellular Signal Strength - {}", pct)),
            Self::Cellular {
                signal_strength_percent: None,
            }
            | Self::Unknown(_) => None,
        }
    }
}

/// A selectable collar LED colour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedColor {
    pub led_color_code: i32,
    pub hex_code: String,
    pub name: String,
}

impl From<&AvailableLedColor> for LedColor {
    fn from(color: &AvailableLedColor) -> Self {
        Self {
            led_color_code: color.led_color_code,
            hex_code: color.hex_code.clone(),
            name: color.name.clone(),
        }
    }
}

impl fmt::Display for LedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Color: {} Hex Code: {} Color Code: {}",
            self.name, self.hex_code, self.led_color_code
        )
    }
}

/// A TryFi collar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Device {
    pub device_id: String,
    pub module_id: String,
    /// Firmware build.
    pub build_id: Option<String>,
    pub battery_percent: Option<u8>,
    /// Only first-generation collars report charging; others read `false`.
    pub is_charging: bool,
    pub temperature_celsius: Option<f64>,
    pub mode: DeviceMode,
    /// LED state corrected for an expired LED timer.
    pub led_on: bool,
    pub led_off_at: DateTime<Utc>,
    pub led_color: String,
    pub led_color_hex: String,
    pub available_led_colors: Vec<LedColor>,
    pub connection_state: ConnectionState,
    pub connection_state_date: DateTime<Utc>,
    pub next_location_update_expected_by: Option<DateTime<Utc>>,
    pub last_updated: DateTime<Utc>,
}

impl Device {
    pub fn from_response(response: &DeviceResponse, now: DateTime<Utc>) -> Result<Self, TryFiError> {
        let params = &response.operation_params;
        let led_off_at = led_off_at(params.led_off_at.as_deref(), now)?;
        let led_on = accurate_led_status(params.led_enabled, led_off_at, now);
        if params.led_enabled && !led_on {
            debug!(device_id = %response.id, %led_off_at, "LED timer expired, reporting LED off");
        }

        Ok(Self {
            device_id: response.id.clone(),
            module_id: response.module_id.clone(),
            build_id: response.info.build_id.clone(),
            battery_percent: battery_percent(response.info.battery_percent),
            is_charging: response.info.is_charging.unwrap_or(false),
            temperature_celsius: response.info.temperature.map(|t| t / 100.0),
            mode: DeviceMode::from_api(&params.mode),
            led_on,
            led_off_at,
            led_color: response.led_color.name.clone(),
            led_color_hex: response.led_color.hex_code.clone(),
            available_led_colors: response.available_led_colors.iter().map(LedColor::from).collect(),
            connection_state: ConnectionState::from_response(&response.last_connection_state)?,
            connection_state_date: parse_timestamp(
                "lastConnectionState.date",
                &response.last_connection_state.date,
            )?,
            next_location_update_expected_by: parse_optional_timestamp(
                "nextLocationUpdateExpectedBy",
                response.next_location_update_expected_by.as_deref(),
            )?,
            last_updated: now,
        })
    }

    pub fn is_lost(&self) -> bool {
        self.mode == DeviceMode::Lost
    }

    /// What the collar is connected to, e.g. `"Base ID - base123"`.
    pub fn connected_to(&self) -> Option<String> {
        self.connection_state.description()
    }

    pub fn led_color_by_code(&self, code: i32) -> Option<&LedColor> {
        self.available_led_colors
            .iter()
            .find(|c| c.led_color_code == code)
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let battery = self
            .battery_percent
            .map(|b| b.to_string())
            .unwrap_or_else(|| "?".to_string());
        write!(
            f,
            "Last Updated - {} - Device ID: {} Device Mode: {} Battery Left: {}% LED State: {} Last Connected: {} by: {}",
            self.last_updated,
            self.device_id,
            self.mode,
            battery,
            self.led_on,
            self.connection_state_date,
            self.connection_state.typename()
        )
    }
}
