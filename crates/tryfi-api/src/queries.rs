//! Typed vendor operations on top of [`TryFiClient::query`] and
//! [`TryFiClient::mutation`].

use serde_json::json;
use tracing::debug;

use crate::documents::{self, PET_MODE_LOST, PET_MODE_NORMAL};
use crate::types::{
    CurrentUserData, HouseholdsData, PetDeviceData, PetLocationData, PetRestData, PetStatsData,
    SetDeviceLedData, UpdateOperationParamsData,
};
use crate::{
    ActivityResponse, ApiError, DeviceResponse, RestStatsResponse, StatsResponse, TryFiClient,
    UserHousehold, UserResponse,
};

impl TryFiClient {
    /// Fetch the logged-in user's profile.
    pub async fn get_user_detail(&self) -> Result<UserResponse, ApiError> {
        let data: CurrentUserData = self.query("currentUser", &documents::current_user()).await?;
        Ok(data.current_user)
    }

    /// Fetch every household with its pets and base stations.
    pub async fn get_households(&self) -> Result<Vec<UserHousehold>, ApiError> {
        let data: HouseholdsData = self.query("households", &documents::households()).await?;
        debug!(
            households = data.current_user.user_households.len(),
            "fetched households"
        );
        Ok(data.current_user.user_households)
    }

    /// Fetch a pet's ongoing activity.
    pub async fn get_current_pet_location(
        &self,
        pet_id: &str,
    ) -> Result<ActivityResponse, ApiError> {
        let data: PetLocationData = self
            .query("pet location", &documents::pet_current_location(pet_id))
            .await?;
        Ok(data.pet.ongoing_activity)
    }

    /// Fetch a pet's step summaries.
    pub async fn get_current_pet_stats(&self, pet_id: &str) -> Result<StatsResponse, ApiError> {
        let data: PetStatsData = self
            .query("pet activity", &documents::pet_activity(pet_id))
            .await?;
        Ok(data.pet)
    }

    /// Fetch a pet's rest summaries.
    pub async fn get_current_pet_rest_stats(
        &self,
        pet_id: &str,
    ) -> Result<RestStatsResponse, ApiError> {
        let data: PetRestData = self
            .query("pet rest", &documents::pet_rest(pet_id))
            .await?;
        Ok(data.pet)
    }

    /// Fetch the collar attached to a pet.
    pub async fn get_device_details(&self, pet_id: &str) -> Result<DeviceResponse, ApiError> {
        let data: PetDeviceData = self
            .query("pet device", &documents::pet_device_details(pet_id))
            .await?;
        Ok(data.pet.device)
    }

    /// Change the collar LED colour. Returns the updated collar.
    pub async fn set_led_color(
        &self,
        module_id: &str,
        led_color_code: i32,
    ) -> Result<DeviceResponse, ApiError> {
        let data: SetDeviceLedData = self
            .mutation(
                "set LED colour",
                &documents::set_led_color(),
                json!({ "moduleId": module_id, "ledColorCode": led_color_code }),
            )
            .await?;
        Ok(data.set_device_led)
    }

    /// Switch the collar LED on or off. Returns the updated collar.
    pub async fn turn_on_off_led(
        &self,
        module_id: &str,
        led_enabled: bool,
    ) -> Result<DeviceResponse, ApiError> {
        self.update_operation_params(json!({ "moduleId": module_id, "ledEnabled": led_enabled }))
            .await
    }

    /// Put the collar into or out of lost mode. Returns the updated collar.
    pub async fn set_lost_dog_mode(
        &self,
        module_id: &str,
        lost: bool,
    ) -> Result<DeviceResponse, ApiError> {
        let mode = if lost { PET_MODE_LOST } else { PET_MODE_NORMAL };
        self.update_operation_params(json!({ "moduleId": module_id, "mode": mode }))
            .await
    }

    async fn update_operation_params(
        &self,
        input: serde_json::Value,
    ) -> Result<DeviceResponse, ApiError> {
        let data: UpdateOperationParamsData = self
            .mutation(
                "update operation params",
                &documents::update_operation_params(),
                json!({ "input": input }),
            )
            .await?;
        Ok(data.update_device_operation_params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClientConfig;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn device_json(mode: &str, led_enabled: bool) -> serde_json::Value {
        json!({
            "id": "device123",
            "moduleId": "module123",
            "info": { "buildId": "1.0.0", "batteryPercent": 75 },
            "operationParams": { "ledEnabled": led_enabled, "ledOffAt": null, "mode": mode },
            "ledColor": { "name": "GREEN", "hexCode": "#00FF00" },
            "lastConnectionState": {
                "__typename": "ConnectedToCellular",
                "date": "2024-01-01T12:00:00Z",
                "signalStrengthPercent": 85
            },
            "availableLedColors": []
        })
    }

    async fn logged_in_client(mock_server: &MockServer) -> TryFiClient {
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "userId": "user123",
                "sessionId": "session123"
            })))
            .mount(mock_server)
            .await;

        let mut client = TryFiClient::with_config(ClientConfig::with_host(mock_server.uri())).unwrap();
        client.login("test@example.com", "password").await.unwrap();
        client
    }

    #[tokio::test]
    async fn test_get_user_detail() {
        let mock_server = MockServer::start().await;
        let client = logged_in_client(&mock_server).await;

        Mock::given(method("GET"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "currentUser": {
                        "id": "user123",
                        "email": "test@example.com",
                        "firstName": "Test",
                        "lastName": "User"
                    }
                }
            })))
            .mount(&mock_server)
            .await;

        let user = client.get_user_detail().await.unwrap();
        assert_eq!(user.id, "user123");
        assert_eq!(user.email, "test@example.com");
        assert_eq!(user.phone_number, None);
    }

    #[tokio::test]
    async fn test_get_households() {
        let mock_server = MockServer::start().await;
        let client = logged_in_client(&mock_server).await;

        Mock::given(method("GET"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "currentUser": {
                        "userHouseholds": [{
                            "household": {
                                "pets": [{ "id": "pet123", "name": "Max" }],
                                "bases": []
                            }
                        }]
                    }
                }
            })))
            .mount(&mock_server)
            .await;

        let households = client.get_households().await.unwrap();
        assert_eq!(households.len(), 1);
        assert_eq!(households[0].household.pets[0].id, "pet123");
        assert!(households[0].household.bases.is_empty());
    }

    #[tokio::test]
    async fn test_set_led_color_variables() {
        let mock_server = MockServer::start().await;
        let client = logged_in_client(&mock_server).await;

        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_partial_json(json!({
                "variables": { "moduleId": "module123", "ledColorCode": 3 }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "setDeviceLed": device_json("NORMAL", true) }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let device = client.set_led_color("module123", 3).await.unwrap();
        assert_eq!(device.led_color.name, "GREEN");
    }

    #[tokio::test]
    async fn test_turn_on_off_led_variables() {
        let mock_server = MockServer::start().await;
        let client = logged_in_client(&mock_server).await;

        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_partial_json(json!({
                "variables": { "input": { "moduleId": "module123", "ledEnabled": false } }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "updateDeviceOperationParams": device_json("NORMAL", false) }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let device = client.turn_on_off_led("module123", false).await.unwrap();
        assert!(!device.operation_params.led_enabled);
    }

    #[tokio::test]
    async fn test_set_lost_dog_mode_variables() {
        let mock_server = MockServer::start().await;
        let client = logged_in_client(&mock_server).await;

        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_partial_json(json!({
                "variables": { "input": { "moduleId": "module123", "mode": "LOST" } }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "updateDeviceOperationParams": device_json("LOST", true) }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let device = client.set_lost_dog_mode("module123", true).await.unwrap();
        assert_eq!(device.operation_params.mode, "LOST");
    }

    #[tokio::test]
    async fn test_get_device_details_missing_field() {
        let mock_server = MockServer::start().await;
        let client = logged_in_client(&mock_server).await;

        let mut device = device_json("NORMAL", true);
        device.as_object_mut().unwrap().remove("operationParams");

        Mock::given(method("GET"))
            .and(path("/graphql"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "data": { "pet": { "device": device } } })),
            )
            .mount(&mock_server)
            .await;

        let err = client.get_device_details("pet123").await.unwrap_err();
        assert!(matches!(err, ApiError::Malformed { context: "pet device", .. }));
    }
}
