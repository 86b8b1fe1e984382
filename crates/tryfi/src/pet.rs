//! Pets and their collars.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tryfi_api::PetResponse;

use crate::activity::{ActivityStats, Location, RestStats};
use crate::{Device, TryFiError};

/// Year reported when the vendor has no birth year.
pub const DEFAULT_YEAR_OF_BIRTH: i32 = 1900;

/// Month reported when the vendor has no birth month.
pub const DEFAULT_MONTH_OF_BIRTH: u32 = 1;

/// A pet wearing a TryFi collar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pet {
    pub pet_id: String,
    pub name: String,
    pub breed: Option<String>,
    pub gender: Option<String>,
    pub weight: Option<f64>,
    pub year_of_birth: i32,
    pub month_of_birth: u32,
    pub day_of_birth: Option<u32>,
    pub home_city_state: Option<String>,
    /// Empty when the pet has no photo.
    pub photo_link: String,
    pub device: Device,
    pub location: Option<Location>,
    pub activity: Option<ActivityStats>,
    pub rest: Option<RestStats>,
    pub last_updated: DateTime<Utc>,
}

impl Pet {
    /// Map a pet profile. Returns `Ok(None)` for pets without a collar.
    ///
    /// Location and statistics come from separate calls and start empty.
    pub fn from_response(response: &PetResponse, now: DateTime<Utc>) -> Result<Option<Self>, TryFiError> {
        let collar = response.collar().map_err(|e| {
            TryFiError::MalformedResponse(format!("device of pet {}: {}", response.id, e))
        })?;
        let Some(collar) = collar else {
            return Ok(None);
        };

        Ok(Some(Self {
            pet_id: response.id.clone(),
            name: response.name.clone(),
            breed: response.breed.as_ref().map(|b| b.name.clone()),
            gender: response.gender.clone(),
            weight: response.weight,
            year_of_birth: response.year_of_birth.unwrap_or(DEFAULT_YEAR_OF_BIRTH),
            month_of_birth: response.month_of_birth.unwrap_or(DEFAULT_MONTH_OF_BIRTH),
            day_of_birth: response.day_of_birth,
            home_city_state: response.home_city_state.clone(),
            photo_link: response.photo_link().unwrap_or_default().to_string(),
            device: Device::from_response(&collar, now)?,
            location: None,
            activity: None,
            rest: None,
            last_updated: now,
        }))
    }

    /// `None` when the day is unknown or the date does not exist.
    pub fn birth_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year_of_birth, self.month_of_birth, self.day_of_birth?)
    }

    pub fn is_lost(&self) -> bool {
        self.device.is_lost()
    }

    /// What the pet's collar is connected to.
    pub fn connected_to(&self) -> Option<String> {
        self.device.connected_to()
    }
}

impl fmt::Display for Pet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Last Updated - {} - Pet ID: {} Name: {} Lost: {} From: {}",
            self.last_updated,
            self.pet_id,
            self.name,
            self.is_lost(),
            self.home_city_state.as_deref().unwrap_or("unknown")
        )?;
        if let Some(location) = &self.location {
            write!(
                f,
                " ActivityType: {} Located: {},{} Since: {}",
                location.activity_type, location.latitude, location.longitude, location.start_time
            )?;
        }
        Ok(())
    }
}
