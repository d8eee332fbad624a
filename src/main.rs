use std::{net::SocketAddr, sync::Arc};

use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use tracing::info;

use verger_api as api;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cfg = api::config::load_config()?;
    api::config::init_tracing(cfg.log_level(), cfg.log_json);

    // Init DB
    let db_pool = api::db::establish_connection_from_app_config(&cfg).await?;
    let db_arc = Arc::new(db_pool);

    // ERP client + services used by HTTP handlers
    let erp = Arc::new(api::clients::DolibarrClient::from_config(&cfg)?);
    let services = api::handlers::AppServices::new(db_arc.clone(), erp);

    let app_state = api::AppState {
        db: db_arc,
        config: cfg.clone(),
        services,
    };

    let app = api::api_routes()
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(api::server::cors_layer(&cfg));

    let host: std::net::IpAddr = cfg.host.parse()?;
    let addr = SocketAddr::new(host, cfg.api_port);
    info!("verger-api facade starting on http://{}", addr);

    api::server::serve(app, addr).await
}
