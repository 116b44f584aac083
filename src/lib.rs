//! Bubu Library
//!
//! Pixel-art animation tooling for small RGB565 displays, and the transit
//! departure service that feeds them.
//!
//! The editor model, project files and header export are always built; the
//! HTTP service and provider client sit behind the `web` feature.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod export;
pub mod models;
pub mod services;
pub mod transit;
#[cfg(feature = "web")]
pub mod web;
