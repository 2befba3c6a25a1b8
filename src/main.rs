use anyhow::Result;
use langpack_manager::client::PackServerClient;
use langpack_manager::config::Config;
use langpack_manager::controller::{PanelController, ServerStatus};
use langpack_manager::render;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("langpack_manager=info".parse()?),
        )
        .init();

    info!("Starting language pack panel snapshot");

    // Load configuration from environment
    let config = Config::from_env()?;
    let client = PackServerClient::new(&config)?;
    let mut controller = PanelController::new(&config, client);

    // Fetch both lists concurrently and reconcile into render records
    let view = controller.refresh().await;
    print!("{}", render::render_panel(&view));

    // Install actions only make sense when the local server can reach the
    // catalog; assume offline until the probe says otherwise
    match controller.server_status().await {
        ServerStatus::Online => {
            info!("Local server is online; installs are available");
        }
        ServerStatus::Offline(message) => {
            error!("{}", message);
        }
    }

    Ok(())
}
