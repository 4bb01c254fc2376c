use anyhow::Context;

use catalog_admin::{AdminConfig, SubClientRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AdminConfig::from_env()?;
    catalog_observability::init(config.log_format);

    let registry = SubClientRegistry::new();
    let app = catalog_admin::app::build_app(&config, &registry)?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(
        addr = %listener.local_addr()?,
        default_site = %config.default_site,
        "listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
