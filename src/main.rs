mod model;
mod server;

use std::{fs::OpenOptions, sync::Mutex};

use tower_http::trace::TraceLayer;
use tracing_subscriber::{fmt, EnvFilter};

use crate::server::{config::Config, router, startup, state::AppState, util::user_agent};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    let subscriber = fmt().with_env_filter(
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pgconsole=info,warn")),
    );
    match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            subscriber.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => subscriber.init(),
    }

    let db = startup::connect_to_database(&config).await?;
    let session = startup::connect_to_session(&db, &config).await?;
    let http_client = startup::setup_reqwest_client()?;
    let oauth_client = startup::setup_oauth_client(&config)?;
    let user_agent_parser = user_agent::create_user_agent_parser()?;

    startup::create_default_admin(&db, &config).await?;

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    tracing::info!(
        "Starting {} in {} mode on {}",
        config.app_name,
        if config.server_mode { "server" } else { "desktop" },
        config.bind_address
    );

    let app = router::router()
        .with_state(AppState::new(
            db,
            config,
            http_client,
            oauth_client,
            user_agent_parser,
        ))
        .layer(session)
        .layer(TraceLayer::new_for_http());

    axum::serve(listener, app).await?;

    Ok(())
}
