//! Subcommand implementations

pub mod pack;
pub mod scan;
pub mod verify;
