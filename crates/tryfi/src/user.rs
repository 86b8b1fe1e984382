//! The account owner.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tryfi_api::UserResponse;

/// The logged-in TryFi user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub user_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub last_updated: DateTime<Utc>,
}

impl User {
    pub fn from_response(response: &UserResponse, now: DateTime<Utc>) -> Self {
        Self {
            user_id: response.id.clone(),
            email: response.email.clone(),
            first_name: response.first_name.clone(),
            last_name: response.last_name.clone(),
            phone_number: response.phone_number.clone(),
            last_updated: now,
        }
    }

    /// `"{first} {last}"`, keeping the separator even if a part is empty.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "User ID: {} Name: {} Email: {}",
            self.user_id,
            self.full_name(),
            self.email
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn response(first: &str, last: &str) -> UserResponse {
        serde_json::from_value(serde_json::json!({
            "id": "user123",
            "email": "test@example.com",
            "firstName": first,
            "lastName": last,
            "phoneNumber": "+1234567890"
        }))
        .unwrap()
    }

    #[test]
    fn test_from_response() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let user = User::from_response(&response("Test", "User"), now);

        assert_eq!(user.user_id, "user123");
        assert_eq!(user.phone_number.as_deref(), Some("+1234567890"));
        assert_eq!(user.last_updated, now);
        assert_eq!(
            user.to_string(),
            "User ID: user123 Name: Test User Email: test@example.com"
        );
    }

    #[test]
    fn test_full_name_keeps_separator() {
        let now = Utc::now();
        assert_eq!(User::from_response(&response("", "Doe"), now).full_name(), " Doe");
        assert_eq!(User::from_response(&response("John", ""), now).full_name(), "John ");
        assert_eq!(
            User::from_response(&response("José", "García"), now).full_name(),
            "José García"
        );
    }
}
