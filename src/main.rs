use ocs_recruit_api::database::DatabaseManager;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    // Initialize configuration (this loads the config singleton)
    let config = ocs_recruit_api::config::config();

    tracing_subscriber::fmt::init();
    tracing::info!("Starting recruitment API in {:?} mode", config.environment);

    let pool = DatabaseManager::pool()?;
    let app = ocs_recruit_api::app(pool);

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    println!("🚀 Recruitment API server listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    DatabaseManager::close_all().await;

    Ok(())
}
