use std::{net::SocketAddr, sync::Arc};

use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use tracing::info;

use verger_api as api;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cfg = api::config::load_config()?;
    api::config::init_tracing(cfg.log_level(), cfg.log_json);

    let db_pool = api::db::establish_connection_from_app_config(&cfg).await?;
    let stock = Arc::new(api::services::StockService::new(Arc::new(db_pool)));
    let state = api::backoffice::BackofficeState::new(cfg.clone(), stock);

    let app = api::backoffice::backoffice_routes()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(api::server::cors_layer(&cfg));

    let host: std::net::IpAddr = cfg.host.parse()?;
    let addr = SocketAddr::new(host, cfg.backoffice_port);
    info!("Back office starting on http://{}", addr);

    api::server::serve(app, addr).await
}
