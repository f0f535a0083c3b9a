//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Core commands (init, run) and shared utilities (open_db)
//! - `entities` - Household, transaction and insight commands
//! - `schedule` - In-process scheduler command
//! - `status` - Status command

pub mod core;
pub mod entities;
pub mod schedule;
pub mod status;

// Re-export command functions for main.rs
pub use self::core::*;
pub use self::entities::*;
pub use self::schedule::*;
pub use self::status::*;
