use actix_web::HttpServer;
use log::info;

use re_api::{build_state, config, create_app};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = config::load()?;

    env_logger::init_from_env(
        env_logger::Env::new().default_filter_or(config.logging.level.clone()),
    );

    info!("Starting Keystone API Server ({})", config.environment);

    let state = build_state(&config)?;
    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(state.clone()));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(&bind_address)?.run().await?;
    Ok(())
}
