//! Subcommand implementations.

use std::fmt::Display;

use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use tracing::info;
use tryfi::{Pet, TryFi};

/// How records are printed.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    pub json: bool,
}

/// Pretty-print any serializable value as JSON.
fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value).into_diagnostic()?);
    Ok(())
}

impl Output {
    fn print<T: Serialize + Display + ?Sized>(&self, record: &T) -> Result<()> {
        if self.json {
            return print_json(record);
        }
        println!("{}", record);
        Ok(())
    }

    fn print_all<'a, T: Serialize + Display + 'a>(
        &self,
        records: impl IntoIterator<Item = &'a T>,
    ) -> Result<()> {
        let records: Vec<&T> = records.into_iter().collect();
        if self.json {
            return print_json(&records);
        }
        for record in records {
            println!("{}", record);
        }
        Ok(())
    }
}

/// Resolve a pet by ID, falling back to a case-insensitive name match.
fn resolve_pet_id(tryfi: &TryFi, pet: &str) -> Result<String> {
    if let Ok(found) = tryfi.pet(pet) {
        return Ok(found.pet_id.clone());
    }
    tryfi
        .pets()
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(pet))
        .map(|p| p.pet_id.clone())
        .ok_or_else(|| miette::miette!("no pet with ID or name '{}'", pet))
}

pub fn status(tryfi: &TryFi, output: Output) -> Result<()> {
    if output.json {
        #[derive(Serialize)]
        struct Status<'a> {
            username: Option<&'a str>,
            user: Option<&'a tryfi::User>,
            pets: &'a [Pet],
            base_stations: &'a [tryfi::BaseStation],
        }

        return print_json(&Status {
            username: tryfi.username(),
            user: tryfi.user(),
            pets: tryfi.pets(),
            base_stations: tryfi.base_stations(),
        });
    }

    print!("{}", tryfi);
    Ok(())
}

pub fn pets(tryfi: &TryFi, output: Output) -> Result<()> {
    if output.json {
        return output.print_all(tryfi.pets());
    }

    for pet in tryfi.pets() {
        println!("{}", pet);
        println!("  {}", pet.device);
        if let Some(connected) = pet.connected_to() {
            println!("  Connected to: {}", connected);
        }
        for color in &pet.device.available_led_colors {
            println!("  {}", color);
        }
    }
    Ok(())
}

pub fn bases(tryfi: &TryFi, output: Output) -> Result<()> {
    if output.json {
        return output.print_all(tryfi.base_stations());
    }

    for base in tryfi.base_stations() {
        println!("{}", base);
        let pets = tryfi
            .base_station_pets(&base.base_id)
            .map_err(|e| miette::miette!("{}", e))?;
        for pet in pets {
            println!("  {} ({})", pet.name, pet.pet_id);
        }
    }
    Ok(())
}

pub async fn locate(tryfi: &mut TryFi, pet: &str, output: Output) -> Result<()> {
    let pet_id = resolve_pet_id(tryfi, pet)?;
    let location = tryfi
        .refresh_pet_location(&pet_id)
        .await
        .map_err(|e| miette::miette!("{}", e))?;

    if output.json {
        return print_json(location);
    }

    println!(
        "{} at {},{} since {}",
        location.activity_type, location.latitude, location.longitude, location.start_time
    );
    if let Some(area) = &location.area_name {
        println!("  Area: {}", area);
    }
    if let (Some(name), Some(address)) = (&location.place_name, &location.place_address) {
        println!("  Place: {} ({})", name, address);
    }
    Ok(())
}

pub async fn led(tryfi: &mut TryFi, pet: &str, on: bool, output: Output) -> Result<()> {
    let pet_id = resolve_pet_id(tryfi, pet)?;
    let device = tryfi
        .set_led(&pet_id, on)
        .await
        .map_err(|e| miette::miette!("{}", e))?;
    info!(pet_id = %pet_id, led_on = device.led_on, "LED updated");
    output.print(device)
}

pub async fn led_color(tryfi: &mut TryFi, pet: &str, code: i32, output: Output) -> Result<()> {
    let pet_id = resolve_pet_id(tryfi, pet)?;
    let device = tryfi
        .set_led_color(&pet_id, code)
        .await
        .map_err(|e| miette::miette!("{}", e))?;
    info!(pet_id = %pet_id, color = %device.led_color, "LED colour updated");
    output.print(device)
}

pub async fn lost_mode(tryfi: &mut TryFi, pet: &str, lost: bool, output: Output) -> Result<()> {
    let pet_id = resolve_pet_id(tryfi, pet)?;
    let device = tryfi
        .set_lost_mode(&pet_id, lost)
        .await
        .map_err(|e| miette::miette!("{}", e))?;
    info!(pet_id = %pet_id, mode = %device.mode, "lost mode updated");
    output.print(device)
}
