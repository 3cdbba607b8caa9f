pub mod config;
pub mod ritual;
pub mod streak;
