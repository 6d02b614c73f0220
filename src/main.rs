mod api;
mod app;
mod auth;
mod config;
mod domain;
mod error;
mod format;
mod logging;
mod middleware;
mod routes;
mod services;

use anyhow::Result;

use auth::TokenService;
use services::RemoteApiClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Fails when JWT_SECRET is missing
    let settings = config::Settings::from_env()?;

    logging::init_logging(&settings);

    tracing::info!(
        env = ?settings.env,
        server_addr = %settings.server_addr,
        api_base_url = %settings.api_base_url,
        "Starting dashboard auth service"
    );

    let tokens = TokenService::new(&settings.jwt_secret);

    let api_client = RemoteApiClient::new(&settings.api_base_url, settings.api_timeout_seconds)?;

    let state = app::AppState::new(settings.clone(), tokens, api_client);
    let app = app::create_app(state);

    let listener = tokio::net::TcpListener::bind(&settings.server_addr).await?;
    tracing::info!("Listening on {}", settings.server_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
