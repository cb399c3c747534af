use std::path::{Path, PathBuf};

/// Roster configuration
#[derive(Debug, Clone)]
pub struct RosterConfig {
    /// Location of the JSON snapshot
    pub data_file: PathBuf,

    /// Bounded mailbox size of the roster service
    pub mailbox_capacity: usize,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("employees.json"),
            mailbox_capacity: 100,
        }
    }
}

impl RosterConfig {
    /// Set the snapshot location
    pub fn data_file(mut self, path: impl AsRef<Path>) -> Self {
        self.data_file = path.as_ref().to_path_buf();
        self
    }

    /// Set the mailbox size; clamped to at least one slot
    pub fn mailbox_capacity(mut self, capacity: usize) -> Self {
        self.mailbox_capacity = capacity.max(1);
        self
    }
}
