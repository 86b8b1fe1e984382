//! The `TryFi` facade: one logged-in account and everything it can see.

use std::fmt;

use chrono::Utc;
use tracing::{debug, info, warn};
use tryfi_api::{ClientConfig, DeviceResponse, Session, TryFiClient};

use crate::activity::{ActivityStats, Location, RestStats};
use crate::error::EntityKind;
use crate::{BaseStation, ConnectionState, Device, Pet, TryFiError, User};

/// A TryFi account session with the pets, collars and base stations it owns.
///
/// Collections are replaced wholesale after a fetch succeeds. A failed fetch
/// returns the error and leaves what was held before untouched.
pub struct TryFi {
    client: TryFiClient,
    username: Option<String>,
    user: Option<User>,
    pets: Vec<Pet>,
    bases: Vec<BaseStation>,
}

impl TryFi {
    /// Create a facade that has not logged in yet.
    pub fn new(config: ClientConfig) -> Result<Self, TryFiError> {
        Ok(Self {
            client: TryFiClient::with_config(config)?,
            username: None,
            user: None,
            pets: Vec::new(),
            bases: Vec::new(),
        })
    }

    /// Log in and load the user, base stations and pets.
    pub async fn connect(
        config: ClientConfig,
        username: &str,
        password: &str,
    ) -> Result<Self, TryFiError> {
        let mut tryfi = Self::new(config)?;
        tryfi.login(username, password).await?;
        tryfi.refresh_user().await?;
        tryfi.refresh_base_stations().await?;
        tryfi.refresh_pets().await?;
        Ok(tryfi)
    }

    /// Authenticate and keep the session for subsequent calls.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<Session, TryFiError> {
        let session = self.client.login(username, password).await?.clone();
        info!(user_id = %session.user_id, "logged in to TryFi");
        self.username = Some(username.to_string());
        Ok(session)
    }

    /// Reload the logged-in user's profile.
    pub async fn refresh_user(&mut self) -> Result<&User, TryFiError> {
        let response = self.client.get_user_detail().await?;
        let user = User::from_response(&response, Utc::now());
        debug!(user_id = %user.user_id, "refreshed user");
        Ok(&*self.user.insert(user))
    }

    /// Reload every pet that wears a collar, with location and statistics.
    pub async fn refresh_pets(&mut self) -> Result<&[Pet], TryFiError> {
        let households = self.client.get_households().await?;
        let now = Utc::now();

        let mut pets = Vec::new();
        for pet in households.iter().flat_map(|h| &h.household.pets) {
            match Pet::from_response(pet, now)? {
                Some(pet) => pets.push(pet),
                None => warn!(pet_id = %pet.id, name = %pet.name, "pet has no collar, skipping"),
            }
        }

        for pet in &mut pets {
            pet.location = Some(self.fetch_location(&pet.pet_id).await?);
            pet.activity = Some(self.fetch_stats(&pet.pet_id).await?);
            pet.rest = Some(self.fetch_rest_stats(&pet.pet_id).await?);
        }

        info!(count = pets.len(), "refreshed pets");
        self.pets = pets;
        Ok(self.pets.as_slice())
    }

    /// Reload the collar of every known pet.
    ///
    /// Every collar is fetched before any is replaced.
    pub async fn refresh_devices(&mut self) -> Result<(), TryFiError> {
        let mut devices = Vec::with_capacity(self.pets.len());
        for pet in &self.pets {
            devices.push(self.fetch_device(&pet.pet_id).await?);
        }

        let now = Utc::now();
        for (pet, device) in self.pets.iter_mut().zip(devices) {
            pet.device = device;
            pet.last_updated = now;
        }
        debug!(count = self.pets.len(), "refreshed devices");
        Ok(())
    }

    /// Reload every base station across the account's households.
    pub async fn refresh_base_stations(&mut self) -> Result<&[BaseStation], TryFiError> {
        let households = self.client.get_households().await?;
        let now = Utc::now();

        let bases = households
            .iter()
            .flat_map(|h| &h.household.bases)
            .map(|b| BaseStation::from_response(b, now))
            .collect::<Result<Vec<_>, _>>()?;

        info!(count = bases.len(), "refreshed base stations");
        self.bases = bases;
        Ok(self.bases.as_slice())
    }

    /// Reload base stations, then pets.
    ///
    /// A base station failure does not stop the pet refresh. The first error
    /// is returned.
    pub async fn refresh(&mut self) -> Result<(), TryFiError> {
        let bases = self.refresh_base_stations().await.map(|_| ());
        if let Err(e) = &bases {
            warn!(error = %e, "failed to refresh base stations");
        }
        let pets = self.refresh_pets().await.map(|_| ());
        bases.and(pets)
    }

    /// Reload one pet's collar, location and statistics.
    pub async fn refresh_pet(&mut self, pet_id: &str) -> Result<&Pet, TryFiError> {
        let index = self.pet_index(pet_id)?;
        let device = self.fetch_device(pet_id).await?;
        let location = self.fetch_location(pet_id).await?;
        let activity = self.fetch_stats(pet_id).await?;
        let rest = self.fetch_rest_stats(pet_id).await?;

        let pet = &mut self.pets[index];
        pet.device = device;
        pet.location = Some(location);
        pet.activity = Some(activity);
        pet.rest = Some(rest);
        pet.last_updated = Utc::now();
        Ok(&*pet)
    }

    /// Reload where one pet is.
    pub async fn refresh_pet_location(&mut self, pet_id: &str) -> Result<&Location, TryFiError> {
        let index = self.pet_index(pet_id)?;
        let location = self.fetch_location(pet_id).await?;
        Ok(&*self.pets[index].location.insert(location))
    }

    /// Reload one pet's step statistics.
    pub async fn refresh_pet_stats(&mut self, pet_id: &str) -> Result<&ActivityStats, TryFiError> {
        let index = self.pet_index(pet_id)?;
        let stats = self.fetch_stats(pet_id).await?;
        Ok(&*self.pets[index].activity.insert(stats))
    }

    /// Reload one pet's sleep and nap statistics.
    pub async fn refresh_pet_rest_stats(&mut self, pet_id: &str) -> Result<&RestStats, TryFiError> {
        let index = self.pet_index(pet_id)?;
        let rest = self.fetch_rest_stats(pet_id).await?;
        Ok(&*self.pets[index].rest.insert(rest))
    }

    /// Reload one pet's collar.
    pub async fn refresh_pet_device(&mut self, pet_id: &str) -> Result<&Device, TryFiError> {
        let index = self.pet_index(pet_id)?;
        let device = self.fetch_device(pet_id).await?;
        let pet = &mut self.pets[index];
        pet.device = device;
        pet.last_updated = Utc::now();
        Ok(&pet.device)
    }

    // =========================================================================
    // Collar commands
    // =========================================================================

    /// Switch the collar LED on or off.
    pub async fn set_led(&mut self, pet_id: &str, on: bool) -> Result<&Device, TryFiError> {
        let (index, module_id) = self.collar_of(pet_id)?;
        info!(pet_id, on, "switching collar LED");
        let response = self.client.turn_on_off_led(&module_id, on).await?;
        self.replace_device(index, &response)
    }

    /// Change the collar LED colour to one of the device's available codes.
    pub async fn set_led_color(&mut self, pet_id: &str, led_color_code: i32) -> Result<&Device, TryFiError> {
        let (index, module_id) = self.collar_of(pet_id)?;
        info!(pet_id, led_color_code, "changing collar LED colour");
        let response = self.client.set_led_color(&module_id, led_color_code).await?;
        self.replace_device(index, &response)
    }

    /// Put the collar into or out of lost mode.
    pub async fn set_lost_mode(&mut self, pet_id: &str, lost: bool) -> Result<&Device, TryFiError> {
        let (index, module_id) = self.collar_of(pet_id)?;
        info!(pet_id, lost, "setting lost mode");
        let response = self.client.set_lost_dog_mode(&module_id, lost).await?;
        self.replace_device(index, &response)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The logged-in user, once loaded.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Pets with a collar.
    pub fn pets(&self) -> &[Pet] {
        &self.pets
    }

    /// Every pet's collar, in pet order.
    pub fn devices(&self) -> impl Iterator<Item = &Device> {
        self.pets.iter().map(|p| &p.device)
    }

    /// Base stations across all households.
    pub fn base_stations(&self) -> &[BaseStation] {
        &self.bases
    }

    /// Look up a pet by ID.
    pub fn pet(&self, pet_id: &str) -> Result<&Pet, TryFiError> {
        self.pets
            .iter()
            .find(|p| p.pet_id == pet_id)
            .ok_or_else(|| TryFiError::not_found(EntityKind::Pet, pet_id))
    }

    /// Look up a collar by device ID.
    pub fn device(&self, device_id: &str) -> Result<&Device, TryFiError> {
        self.devices()
            .find(|d| d.device_id == device_id)
            .ok_or_else(|| TryFiError::not_found(EntityKind::Device, device_id))
    }

    /// Look up a base station by ID.
    pub fn base_station(&self, base_id: &str) -> Result<&BaseStation, TryFiError> {
        self.bases
            .iter()
            .find(|b| b.base_id == base_id)
            .ok_or_else(|| TryFiError::not_found(EntityKind::BaseStation, base_id))
    }

    /// Pets whose collar last connected through the given base station.
    pub fn base_station_pets(&self, base_id: &str) -> Result<Vec<&Pet>, TryFiError> {
        self.base_station(base_id)?;
        Ok(self
            .pets
            .iter()
            .filter(|p| {
                matches!(&p.device.connection_state, ConnectionState::Base { base_id: id } if id == base_id)
            })
            .collect())
    }

    /// The email used to log in.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// The current session, if logged in.
    pub fn session(&self) -> Option<&Session> {
        self.client.session()
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn pet_index(&self, pet_id: &str) -> Result<usize, TryFiError> {
        self.pets
            .iter()
            .position(|p| p.pet_id == pet_id)
            .ok_or_else(|| TryFiError::not_found(EntityKind::Pet, pet_id))
    }

    fn collar_of(&self, pet_id: &str) -> Result<(usize, String), TryFiError> {
        let index = self.pet_index(pet_id)?;
        Ok((index, self.pets[index].device.module_id.clone()))
    }

    fn replace_device(&mut self, index: usize, response: &DeviceResponse) -> Result<&Device, TryFiError> {
        let now = Utc::now();
        let pet = &mut self.pets[index];
        pet.device = Device::from_response(response, now)?;
        pet.last_updated = now;
        debug!(pet_id = %pet.pet_id, device_id = %pet.device.device_id, "collar updated");
        Ok(&pet.device)
    }

    async fn fetch_device(&self, pet_id: &str) -> Result<Device, TryFiError> {
        let response = self.client.get_device_details(pet_id).await?;
        Device::from_response(&response, Utc::now())
    }

    async fn fetch_location(&self, pet_id: &str) -> Result<Location, TryFiError> {
        let response = self.client.get_current_pet_location(pet_id).await?;
        Location::from_response(&response, Utc::now())
    }

    async fn fetch_stats(&self, pet_id: &str) -> Result<ActivityStats, TryFiError> {
        let response = self.client.get_current_pet_stats(pet_id).await?;
        Ok(ActivityStats::from_response(&response, Utc::now()))
    }

    async fn fetch_rest_stats(&self, pet_id: &str) -> Result<RestStats, TryFiError> {
        let response = self.client.get_current_pet_rest_stats(pet_id).await?;
        Ok(RestStats::from_response(&response, Utc::now()))
    }
}

impl fmt::Display for TryFi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "TryFi Instance - {}", self.username().unwrap_or("(not logged in)"))?;
        if let Some(user) = &self.user {
            writeln!(f, "{}", user)?;
        }
        for pet in &self.pets {
            writeln!(f, "{}", pet)?;
            writeln!(f, "  {}", pet.device)?;
        }
        for base in &self.bases {
            writeln!(f, "{}", base)?;
        }
        Ok(())
    }
}
