//! Employee roster: an actor-owned store with JSON snapshots and a text-menu console.

pub mod actors;
pub mod app_system;
pub mod clients;
pub mod config;
pub mod console;
pub mod domain;
pub mod error;
pub mod messages;
pub mod report;
pub mod store;

#[cfg(test)]
mod mock_framework;

pub use app_system::{setup_tracing, RosterSystem};
pub use clients::RosterClient;
pub use config::RosterConfig;
pub use console::Console;
pub use error::{Result, RosterError};
