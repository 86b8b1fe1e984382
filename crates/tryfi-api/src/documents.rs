//! GraphQL documents for the TryFi API.
//!
//! The schema belongs to the vendor; these are the selections the client
//! relies on. Each query is assembled from its operation plus every fragment
//! it spreads, since the endpoint rejects documents with unknown spreads.

/// Default API host.
pub const API_HOST_URL_BASE: &str = "https://api.tryfi.com";

/// GraphQL endpoint path.
pub const API_GRAPHQL: &str = "/graphql";

/// Login endpoint path.
pub const API_LOGIN: &str = "/auth/login";

/// Collar mode while the pet is at home.
pub const PET_MODE_NORMAL: &str = "NORMAL";

/// Collar mode while the pet is reported lost.
pub const PET_MODE_LOST: &str = "LOST";

pub const FRAGMENT_USER_DETAILS: &str = "fragment UserDetails on User { __typename id email firstName lastName phoneNumber }";

pub const FRAGMENT_POSITION_COORDINATES: &str =
    "fragment PositionCoordinates on Position { __typename latitude longitude }";

pub const FRAGMENT_BREED_DETAILS: &str = "fragment BreedDetails on Breed { __typename id name popularityScore }";

pub const FRAGMENT_PHOTO_DETAILS: &str =
    "fragment PhotoDetails on Photo { __typename id date image { __typename fullSize } }";

pub const FRAGMENT_LED_DETAILS: &str =
    "fragment LedColorDetails on LedColor { __typename ledColorCode hexCode name }";

pub const FRAGMENT_OPERATIONAL_DETAILS: &str = "fragment OperationParamsDetails on OperationParams { __typename mode ledEnabled ledOffAt }";

pub const FRAGMENT_CONNECTION_STATE_DETAILS: &str = "fragment ConnectionStateDetails on ConnectionState { __typename date ... on ConnectedToUser { user { __typename ...UserDetails } } ... on ConnectedToBase { chargingBase { __typename id } } ... on ConnectedToCellular { signalStrengthPercent } ... on UnknownConnectivity { unknownConnectivity } }";

pub const FRAGMENT_DEVICE_DETAILS: &str = "fragment DeviceDetails on Device { __typename id moduleId info nextLocationUpdateExpectedBy operationParams { __typename ...OperationParamsDetails } lastConnectionState { __typename ...ConnectionStateDetails } ledColor { __typename ...LedColorDetails } availableLedColors { __typename ...LedColorDetails } }";

pub const FRAGMENT_PET_PROFILE: &str = "fragment PetProfile on Pet { __typename id name homeCityState yearOfBirth monthOfBirth dayOfBirth gender weight breed { __typename ...BreedDetails } photos { __typename first { __typename ...PhotoDetails } } device { __typename ...DeviceDetails } }";

pub const FRAGMENT_BASE_DETAILS: &str = "fragment BaseDetails on ChargingBase { __typename baseId name position { __typename ...PositionCoordinates } infoLastUpdated networkName online onlineQuality lastSeenAt }";

pub const FRAGMENT_USER_FULL_DETAILS: &str = "fragment UserFullDetails on User { __typename ...UserDetails userHouseholds { __typename household { __typename pets { __typename ...PetProfile } bases { __typename ...BaseDetails } } } }";

pub const FRAGMENT_PLACE_DETAILS: &str =
    "fragment PlaceDetails on Place { __typename id name address position { __typename ...PositionCoordinates } radius }";

pub const FRAGMENT_ONGOING_ACTIVITY_DETAILS: &str = "fragment OngoingActivityDetails on OngoingActivity { __typename start presentUser { __typename ...UserDetails } areaName lastReportTimestamp ... on OngoingWalk { distance positions { __typename date position { __typename ...PositionCoordinates } } } ... on OngoingRest { position { __typename ...PositionCoordinates } place { __typename ...PlaceDetails } } }";

pub const FRAGMENT_ACTIVITY_SUMMARY_DETAILS: &str = "fragment ActivitySummaryDetails on ActivitySummary { __typename start end totalSteps stepGoal dailySteps { __typename date totalSteps stepGoal } totalDistance }";

pub const FRAGMENT_REST_SUMMARY_DETAILS: &str = "fragment RestSummaryDetails on RestSummary { __typename start end data { __typename ... on ConcreteRestSummaryData { sleepAmounts { __typename type duration } } } }";

pub const QUERY_CURRENT_USER: &str = "query { currentUser { ...UserDetails } }";

pub const QUERY_CURRENT_USER_FULL_DETAIL: &str = "query { currentUser { ...UserFullDetails } }";

pub const MUTATION_DEVICE_OPS: &str = "mutation UpdateDeviceOperationParams($input: UpdateDeviceOperationParamsInput!) { updateDeviceOperationParams(input: $input) { __typename ...DeviceDetails } }";

pub const MUTATION_SET_LED_COLOR: &str = "mutation SetDeviceLed($moduleId: String!, $ledColorCode: Int!) { setDeviceLed(moduleId: $moduleId, ledColorCode: $ledColorCode) { __typename ...DeviceDetails } }";

/// Fragments every device selection needs.
const DEVICE_FRAGMENTS: [&str; 5] = [
    FRAGMENT_DEVICE_DETAILS,
    FRAGMENT_OPERATIONAL_DETAILS,
    FRAGMENT_CONNECTION_STATE_DETAILS,
    FRAGMENT_USER_DETAILS,
    FRAGMENT_LED_DETAILS,
];

fn assemble(operation: &str, fragments: &[&str]) -> String {
    let mut doc = String::from(operation);
    for fragment in fragments {
        doc.push(' ');
        doc.push_str(fragment);
    }
    doc
}

/// Escape a value for inlining into a GraphQL string literal.
fn quote(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

/// `currentUser` details.
pub fn current_user() -> String {
    assemble(QUERY_CURRENT_USER, &[FRAGMENT_USER_DETAILS])
}

/// Every household of the current user, with pets and base stations.
pub fn households() -> String {
    let mut fragments = vec![
        FRAGMENT_USER_FULL_DETAILS,
        FRAGMENT_PET_PROFILE,
        FRAGMENT_BASE_DETAILS,
        FRAGMENT_POSITION_COORDINATES,
        FRAGMENT_BREED_DETAILS,
        FRAGMENT_PHOTO_DETAILS,
    ];
    fragments.extend(DEVICE_FRAGMENTS);
    assemble(QUERY_CURRENT_USER_FULL_DETAIL, &fragments)
}

/// A pet's ongoing activity (current location).
pub fn pet_current_location(pet_id: &str) -> String {
    let operation = format!(
        "query {{ pet (id: {}) {{ ongoingActivity {{ __typename ...OngoingActivityDetails }} }} }}",
        quote(pet_id)
    );
    assemble(
        &operation,
        &[
            FRAGMENT_ONGOING_ACTIVITY_DETAILS,
            FRAGMENT_USER_DETAILS,
            FRAGMENT_POSITION_COORDINATES,
            FRAGMENT_PLACE_DETAILS,
        ],
    )
}

/// A pet's daily, weekly and monthly step summaries.
pub fn pet_activity(pet_id: &str) -> String {
    let operation = format!(
        "query {{ pet (id: {}) {{ \
         dailyStat: currentActivitySummary (period: DAILY) {{ ...ActivitySummaryDetails }} \
         weeklyStat: currentActivitySummary (period: WEEKLY) {{ ...ActivitySummaryDetails }} \
         monthlyStat: currentActivitySummary (period: MONTHLY) {{ ...ActivitySummaryDetails }} \
         }} }}",
        quote(pet_id)
    );
    assemble(&operation, &[FRAGMENT_ACTIVITY_SUMMARY_DETAILS])
}

/// A pet's daily, weekly and monthly rest summaries.
pub fn pet_rest(pet_id: &str) -> String {
    let operation = format!(
        "query {{ pet (id: {}) {{ \
         dailyStat: restSummaryFeed(cursor: null, period: DAILY, limit: 1) {{ __typename restSummaries {{ __typename ...RestSummaryDetails }} }} \
         weeklyStat: restSummaryFeed(cursor: null, period: WEEKLY, limit: 1) {{ __typename restSummaries {{ __typename ...RestSummaryDetails }} }} \
         monthlyStat: restSummaryFeed(cursor: null, period: MONTHLY, limit: 1) {{ __typename restSummaries {{ __typename ...RestSummaryDetails }} }} \
         }} }}",
        quote(pet_id)
    );
    assemble(&operation, &[FRAGMENT_REST_SUMMARY_DETAILS])
}

/// A pet's collar details.
pub fn pet_device_details(pet_id: &str) -> String {
    let operation = format!(
        "query {{ pet (id: {}) {{ __typename device {{ __typename ...DeviceDetails }} }} }}",
        quote(pet_id)
    );
    assemble(&operation, &DEVICE_FRAGMENTS)
}

/// `updateDeviceOperationParams` mutation.
pub fn update_operation_params() -> String {
    assemble(MUTATION_DEVICE_OPS, &DEVICE_FRAGMENTS)
}

/// `setDeviceLed` mutation.
pub fn set_led_color() -> String {
    assemble(MUTATION_SET_LED_COLOR, &DEVICE_FRAGMENTS)
}
