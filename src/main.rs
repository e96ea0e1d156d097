use laptop_catalog::configuration::get_configuration;
use laptop_catalog::middleware::authorization::default_roles;
use laptop_catalog::startup::{run_until, AppState};
use laptop_catalog::telemetry::{get_subscriber, init_subscriber};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("laptop-catalog".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber).map_err(|err| anyhow::anyhow!(err))?;

    let settings = get_configuration()?;
    let state = AppState::from_settings(&settings).await?;

    let address = settings.address();
    let listener = TcpListener::bind(&address).await?;
    tracing::info!(
        image_folder = %state.images.folder().display(),
        token_duration_secs = state.jwt_manager.token_duration().as_secs(),
        "listening on {}",
        address
    );

    run_until(listener, state, default_roles(), async {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("shutting down");
        }
    })
    .await?;

    Ok(())
}
