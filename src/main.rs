use anyhow::Context;

use todo_server::{
    config::AppConfig, db::connection, logging::init_tracing, routes::router, state::AppState,
};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        tracing::error!("todo server stopped: {err:?}");
        eprintln!("todo server stopped: {err:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cfg = AppConfig::from_env().context("failed to load config")?;
    init_tracing(&cfg.logging.rust_log);

    let addr = cfg.general.bind_addr()?;
    let db = connection::connect(&cfg.database)
        .await
        .context("failed to open database")?;

    let app = router(AppState::new(cfg, db));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "todo server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
