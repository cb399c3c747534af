//! System orchestration, startup, and shutdown logic.

pub mod roster_system;
pub mod tracing;

pub use roster_system::*;
pub use self::tracing::*;
