//! Service actors that own mutable state and serve requests from a mailbox.

mod roster_service;

pub use roster_service::*;
