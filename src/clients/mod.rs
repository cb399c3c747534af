//! Cloneable handles for talking to service actors.

mod roster_client;

pub use roster_client::*;
