use c500_api::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    c500_observability::init();

    let config = ApiConfig::from_env()?;
    let app = c500_api::app::build_app(&config)?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
