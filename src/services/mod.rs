//! Service layer for business logic.
//!
//! This module contains services that coordinate the models: the in-memory
//! editing session and project file I/O.

pub mod editor;
pub mod project;

// Re-export commonly used types
pub use editor::EditorSession;
pub use project::ProjectService;
