//! Client library for TryFi GPS pet collars.
//!
//! [`TryFi`] logs in to the vendor API and holds the account's user, pets
//! (each with its collar, location and statistics) and base stations as
//! typed records. Refresh methods replace those records after a successful
//! fetch; collar commands switch the LED, change its colour and toggle lost
//! mode.
//!
//! ```no_run
//! # async fn run() -> Result<(), tryfi::TryFiError> {
//! use tryfi::{ClientConfig, TryFi};
//!
//! let mut tryfi = TryFi::connect(ClientConfig::default(), "me@example.com", "secret").await?;
//! for pet in tryfi.pets() {
//!     println!("{}", pet);
//! }
//! tryfi.refresh().await?;
//! # Ok(())
//! # }
//! ```

mod activity;
mod base;
mod device;
mod error;
mod facade;
pub mod mapping;
mod pet;
mod user;

pub use activity::{ActivityStats, Location, PeriodStats, RestStats, SleepTotals};
pub use base::BaseStation;
pub use device::{ConnectionState, Device, DeviceMode, LedColor};
pub use error::{EntityKind, TryFiError};
pub use facade::TryFi;
pub use pet::{DEFAULT_MONTH_OF_BIRTH, DEFAULT_YEAR_OF_BIRTH, Pet};
pub use tryfi_api::{ClientConfig, Session};
pub use user::User;
