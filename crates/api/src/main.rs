use std::sync::Arc;

use anyhow::Context;

use courseware_infra::{AppConfig, ContentStore, InMemoryContentStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("invalid configuration")?;
    courseware_observability::init(config.log_format);

    let store: Arc<dyn ContentStore> = match &config.content_snapshot {
        Some(path) => {
            let store = InMemoryContentStore::load(path)
                .with_context(|| format!("failed to load content snapshot {}", path.display()))?;
            tracing::info!(path = %path.display(), courses = store.course_count(), "loaded content snapshot");
            Arc::new(store)
        }
        None => {
            tracing::warn!("CONTENT_SNAPSHOT not set; serving an empty content store");
            Arc::new(InMemoryContentStore::new())
        }
    };

    match (&config.api_key, config.debug) {
        (Some(_), _) => {}
        (None, true) => tracing::warn!("API_KEY not set and DEBUG on; API is open to everyone"),
        (None, false) => tracing::warn!("API_KEY not set; every protected request will be rejected"),
    }

    let app = courseware_api::app::build_app(&config, store);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
