use actix_web::{middleware::Logger, web, App, HttpServer};
use knowledgeknot::config::StoreBackend;
use knowledgeknot::db::{MemoryStore, MongoStore, Store};
use knowledgeknot::middleware::MethodOverride;
use knowledgeknot::{routes, Config};
use std::io;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("configuration loading failed: {}", e);
            std::process::exit(1);
        }
    };

    // The store client has an explicit lifecycle: opened here, injected
    // into the handlers, dropped when the server stops.
    let store: Arc<dyn Store> = match config.store.backend {
        StoreBackend::Mongo => {
            let store = MongoStore::connect(&config.store.uri, &config.store.database)
                .await
                .map_err(|e| io::Error::other(format!("MongoDB client setup failed: {e}")))?;
            if let Err(e) = store.ping().await {
                tracing::error!("database connection failed: {}", e);
                return Err(io::Error::other(format!(
                    "cannot reach MongoDB at {}: {e}",
                    config.store.uri
                )));
            }
            tracing::info!(database = %config.store.database, "database connected");
            Arc::new(store)
        }
        StoreBackend::Memory => {
            tracing::warn!("using the in-memory store; nothing will survive a restart");
            Arc::new(MemoryStore::new())
        }
    };
    let store = web::Data::from(store);

    let bind = (config.app.host.clone(), config.app.port);
    tracing::info!("listening on {}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .app_data(store.clone())
            .wrap(TracingLogger::default())
            .wrap(Logger::default())
            .wrap(MethodOverride)
            .configure(routes::configure)
    })
    .bind(bind)?
    .run()
    .await
}
