use thiserror::Error;

/// Errors surfaced by the roster store, its service actor and the console.
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("Employee not found: {0}")]
    NotFound(u32),
    #[error("Employee already exists: {0}")]
    AlreadyExists(u32),
    #[error("Salary must be a finite amount: {0}")]
    InvalidSalary(f64),
    #[error("No employee ids left to assign")]
    IdsExhausted,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Snapshot format error: {0}")]
    Snapshot(#[from] serde_json::Error),
    #[error("Actor communication error: {0}")]
    ActorCommunication(String),
}

pub type Result<T> = std::result::Result<T, RosterError>;
