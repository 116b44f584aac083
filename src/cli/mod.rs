//! CLI command handlers for Bubu.
//!
//! Headless, scriptable access to the animation editor, header export,
//! departure normalization and the config file.

pub mod common;
pub mod config;
pub mod departures;
pub mod edit;
pub mod export;
pub mod face;
pub mod frame;
pub mod inspect;
pub mod new;
pub mod pack565;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use departures::DeparturesArgs;
pub use edit::{EraseArgs, PaintArgs};
pub use export::ExportArgs;
pub use face::FaceArgs;
pub use frame::FrameArgs;
pub use inspect::InspectArgs;
pub use new::NewArgs;
pub use pack565::Pack565Args;
