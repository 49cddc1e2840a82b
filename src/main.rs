use aijobs_backend::{
    config::{get_config, init_config},
    database::pool::create_pool,
    routes, AppState,
};
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let app_state = AppState::new(pool);

    {
        let state = app_state.clone();
        let interval = Duration::from_secs(config.import_interval_hours * 3600);
        tokio::spawn(async move {
            loop {
                let stats = state.import_service.run_import().await;
                info!(
                    imported = stats.total_imported,
                    updated = stats.total_updated,
                    skipped = stats.total_skipped,
                    "Scheduled import finished"
                );
                tokio::time::sleep(interval).await;
            }
        });
    }

    let api = Router::new()
        .route("/api/jobs", get(routes::jobs::list_jobs))
        .route("/api/jobs/:company/:slug", get(routes::jobs::get_job))
        .route("/api/companies", get(routes::jobs::list_companies))
        .route("/api/filters", get(routes::jobs::list_filters))
        .route("/api/admin/import", post(routes::admin::run_import))
        .route(
            "/api/admin/locations/renormalize",
            post(routes::admin::renormalize_locations),
        )
        .route(
            "/api/admin/jobs/refresh-remote",
            post(routes::admin::refresh_remote_flags),
        )
        .route(
            "/api/admin/jobs/backfill-slugs",
            post(routes::admin::backfill_slugs),
        )
        .route(
            "/api/admin/jobs/refresh-domains",
            post(routes::admin::refresh_domains),
        )
        .route(
            "/api/admin/jobs/prune-irrelevant",
            post(routes::admin::prune_irrelevant),
        );

    let app = Router::new()
        .route("/health", get(routes::health::health))
        .merge(api)
        .with_state(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
