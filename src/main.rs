use tokio::io::BufReader;
use tracing::info;

use employee_roster::{setup_tracing, Console, RosterConfig, RosterError, RosterSystem};

#[tokio::main]
async fn main() -> Result<(), RosterError> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = RosterConfig::default();
    info!(data_file = %config.data_file.display(), "Starting employee roster");

    let system = RosterSystem::new(&config);

    let mut console = Console::new(
        system.roster_client.clone(),
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    );
    let session = console.run().await;

    // Shut the service down even when the console failed.
    system.shutdown().await?;
    session
}
