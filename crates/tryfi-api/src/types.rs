//! Wire types for TryFi API responses.
//!
//! These mirror the vendor's GraphQL schema field-for-field. Required fields
//! are plain values so that a missing one fails deserialization at the
//! boundary; everything the vendor omits on some collars or accounts is an
//! `Option`. Timestamps stay as strings here and are parsed by the caller.

use serde::{Deserialize, Deserializer, Serialize};

/// Session handle returned by `/auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: String,
    pub session_id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Body of a rejected login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginFailure {
    pub message: String,
}

/// The login endpoint answers 200 for both outcomes.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum LoginResponse {
    Failure { error: LoginFailure },
    Success(Session),
}

/// GraphQL response envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct GraphqlEnvelope {
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub errors: Option<Vec<GraphqlErrorMessage>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphqlErrorMessage {
    pub message: String,
}

// =============================================================================
// Users and households
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CurrentUserData {
    pub current_user: UserResponse,
}

/// `currentUser` with the `UserDetails` fragment.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub phone_number: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct HouseholdsData {
    pub current_user: HouseholdsUser,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct HouseholdsUser {
    pub user_households: Vec<UserHousehold>,
}

/// One entry of `currentUser.userHouseholds`.
#[derive(Debug, Clone, Deserialize)]
pub struct UserHousehold {
    pub household: Household,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Household {
    #[serde(default)]
    pub pets: Vec<PetResponse>,
    #[serde(default)]
    pub bases: Vec<BaseResponse>,
}

// =============================================================================
// Pets
// =============================================================================

/// A pet with the `PetProfile` fragment.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetResponse {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub breed: Option<BreedResponse>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub year_of_birth: Option<i32>,
    #[serde(default)]
    pub month_of_birth: Option<u32>,
    #[serde(default)]
    pub day_of_birth: Option<u32>,
    #[serde(default)]
    pub home_city_state: Option<String>,
    #[serde(default)]
    pub photos: Option<PhotosResponse>,
    /// Collar details. Pets without a collar come back as `null` or the
    /// string `"None"`, so this is decoded lazily by [`PetResponse::collar`].
    #[serde(default)]
    pub device: Option<serde_json::Value>,
}

impl PetResponse {
    /// Decode the pet's collar, or `None` if the pet has no collar.
    pub fn collar(&self) -> Result<Option<DeviceResponse>, serde_json::Error> {
        match &self.device {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(serde_json::Value::String(s)) if s == "None" => Ok(None),
            Some(value) => DeviceResponse::deserialize(value).map(Some),
        }
    }

    /// Full-size link of the first photo, if any.
    pub fn photo_link(&self) -> Option<&str> {
        self.photos
            .as_ref()?
            .first
            .as_ref()?
            .image
            .as_ref()?
            .full_size
            .as_deref()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BreedResponse {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhotosResponse {
    #[serde(default)]
    pub first: Option<PhotoResponse>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhotoResponse {
    #[serde(default)]
    pub image: Option<ImageResponse>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageResponse {
    #[serde(default)]
    pub full_size: Option<String>,
}

// =============================================================================
// Devices
// =============================================================================

/// A collar with the `DeviceDetails` fragment.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceResponse {
    pub id: String,
    pub module_id: String,
    pub info: DeviceInfo,
    pub operation_params: OperationParams,
    pub led_color: LedColorResponse,
    pub last_connection_state: ConnectionStateResponse,
    #[serde(default)]
    pub next_location_update_expected_by: Option<String>,
    #[serde(default)]
    pub available_led_colors: Vec<AvailableLedColor>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    #[serde(default)]
    pub build_id: Option<String>,
    #[serde(default)]
    pub battery_percent: Option<f64>,
    /// Only first-generation collars report this.
    #[serde(default)]
    pub is_charging: Option<bool>,
    /// Hundredths of a degree Celsius.
    #[serde(default)]
    pub temperature: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationParams {
    pub led_enabled: bool,
    #[serde(default)]
    pub led_off_at: Option<String>,
    pub mode: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedColorResponse {
    pub name: String,
    pub hex_code: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableLedColor {
    #[serde(deserialize_with = "color_code")]
    pub led_color_code: i32,
    pub hex_code: String,
    pub name: String,
}

/// `lastConnectionState`, a union discriminated by `__typename`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionStateResponse {
    #[serde(rename = "__typename")]
    pub typename: String,
    pub date: String,
    #[serde(default)]
    pub signal_strength_percent: Option<u32>,
    #[serde(default)]
    pub user: Option<ConnectedUser>,
    #[serde(default)]
    pub charging_base: Option<ChargingBaseRef>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectedUser {
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChargingBaseRef {
    pub id: String,
}

/// The vendor sends colour codes as strings on some endpoints and as
/// integers on others.
fn color_code<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Code {
        Int(i32),
        Str(String),
    }

    match Code::deserialize(deserializer)? {
        Code::Int(code) => Ok(code),
        Code::Str(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid LED colour code '{}'", s))),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct PetDeviceData {
    pub pet: PetDevice,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PetDevice {
    pub device: DeviceResponse,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SetDeviceLedData {
    pub set_device_led: DeviceResponse,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateOperationParamsData {
    pub update_device_operation_params: DeviceResponse,
}

// =============================================================================
// Base stations
// =============================================================================

/// A base station with the `BaseDetails` fragment.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseResponse {
    pub base_id: String,
    pub name: String,
    pub position: PositionResponse,
    pub online: bool,
    /// Shape varies between firmware versions (string, object or null).
    #[serde(default)]
    pub online_quality: Option<serde_json::Value>,
    #[serde(default)]
    pub network_name: Option<String>,
    #[serde(default)]
    pub info_last_updated: Option<String>,
    #[serde(default)]
    pub last_seen_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PositionResponse {
    pub latitude: f64,
    pub longitude: f64,
}

// =============================================================================
// Location and activity
// =============================================================================

#[derive(Debug, Deserialize)]
pub(crate) struct PetLocationData {
    pub pet: PetOngoingActivity,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PetOngoingActivity {
    pub ongoing_activity: ActivityResponse,
}

/// `ongoingActivity`, a union of `Rest`, `OngoingWalk`, ...
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityResponse {
    #[serde(rename = "__typename")]
    pub typename: String,
    #[serde(default)]
    pub area_name: Option<String>,
    pub start: String,
    #[serde(default)]
    pub last_report_timestamp: Option<String>,
    #[serde(default)]
    pub position: Option<PositionResponse>,
    #[serde(default)]
    pub positions: Option<Vec<WalkPosition>>,
    #[serde(default)]
    pub place: Option<PlaceResponse>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WalkPosition {
    pub position: PositionResponse,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaceResponse {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PetStatsData {
    pub pet: StatsResponse,
}

/// Daily, weekly and monthly `currentActivitySummary`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub daily_stat: ActivitySummary,
    pub weekly_stat: ActivitySummary,
    pub monthly_stat: ActivitySummary,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySummary {
    pub step_goal: u64,
    pub total_steps: u64,
    pub total_distance: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PetRestData {
    pub pet: RestStatsResponse,
}

/// Daily, weekly and monthly `restSummaryFeed`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestStatsResponse {
    pub daily_stat: RestFeed,
    pub weekly_stat: RestFeed,
    pub monthly_stat: RestFeed,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestFeed {
    #[serde(default)]
    pub rest_summaries: Vec<RestSummary>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RestSummary {
    pub data: RestSummaryData,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestSummaryData {
    #[serde(default)]
    pub sleep_amounts: Vec<SleepAmount>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SleepAmount {
    #[serde(rename = "type")]
    pub kind: String,
    /// Seconds.
    pub duration: u64,
}
