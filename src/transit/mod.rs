//! Transit departures: normalization of provider payloads and, with the
//! `web` feature, the provider client itself.

pub mod departures;
pub mod error;
#[cfg(feature = "web")]
pub mod provider;

pub use departures::{
    all_departures, normalize_departures, Departure, TimePolicy, DEFAULT_LIMIT, TIME_FORMAT,
};
pub use error::TransitError;
#[cfg(feature = "web")]
pub use provider::{fetch_departures, DepartureSource, MetrolinxClient, StaticDepartureSource};
