//! Ingestion of inventories, roster files and configuration.

pub mod config;
pub mod error;
pub mod inventory;
pub mod roster;

pub use config::load_criteria_map;
pub use error::{IngestError, Result};
pub use inventory::{BANK_COLUMN, read_inventory};
pub use roster::{RosterEntry, discover_roster_files, read_roster};
