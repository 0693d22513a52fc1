//! Pure parsing and formatting helpers shared by the probes and services.

pub mod motd;
pub mod parse;
pub mod roster;
pub mod version;
