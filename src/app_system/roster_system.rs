use tracing::{error, info, instrument};

use crate::actors::RosterService;
use crate::clients::RosterClient;
use crate::config::RosterConfig;
use crate::error::{Result, RosterError};
use crate::store::EmployeeStore;

/// Starts the roster service, hands out its client, and shuts it down.
pub struct RosterSystem {
    pub roster_client: RosterClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl RosterSystem {
    /// Loads the snapshot named by `config` and spawns the service that owns it.
    #[instrument(name = "roster_system", skip(config), fields(data_file = %config.data_file.display()))]
    pub fn new(config: &RosterConfig) -> Self {
        info!("Starting roster system");

        let store = EmployeeStore::open(&config.data_file);
        let (service, roster_client) = RosterService::new(config.mailbox_capacity, store);
        let handles = vec![tokio::spawn(service.run())];

        info!("Roster system started successfully");

        Self { roster_client, handles }
    }

    /// Stop the service and wait for it to finish.
    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<()> {
        info!("Shutting down roster system");

        if let Err(e) = self.roster_client.shutdown().await {
            error!(error = %e, "Roster service already stopped");
        }

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Service shutdown error");
                return Err(RosterError::ActorCommunication(format!("Service task failed: {}", e)));
            }
        }

        info!("Roster system shutdown complete");
        Ok(())
    }
}
