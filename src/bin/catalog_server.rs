use anyhow::Context;
use bookstore_catalog::{http, Catalog, CatalogConfig, InMemoryResourceStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = CatalogConfig::from_env().context("loading catalog configuration")?;
    info!(
        bind_addr = %config.bind_addr,
        text_profile = %config.text_profile,
        page_size_default = config.page_limits.default_size,
        page_size_max = config.page_limits.max_size,
        "starting catalog server"
    );

    let catalog = Catalog::new(InMemoryResourceStore::new(), &config);
    http::serve(catalog, &config.bind_addr)
        .await
        .with_context(|| format!("serving on {}", config.bind_addr))?;
    Ok(())
}
