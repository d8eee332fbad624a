use std::{net::SocketAddr, sync::Arc};

use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use tracing::info;

use verger_api as api;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cfg = api::config::load_config()?;
    api::config::init_tracing(cfg.log_level(), cfg.log_json);

    let facade = Arc::new(api::clients::FacadeClient::from_config(&cfg)?);
    let state = api::storefront::ShopState::new(cfg.clone(), facade);

    let app = api::storefront::storefront_routes()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(api::server::cors_layer(&cfg));

    let host: std::net::IpAddr = cfg.host.parse()?;
    let addr = SocketAddr::new(host, cfg.storefront_port);
    info!("Storefront starting on http://{}", addr);

    api::server::serve(app, addr).await
}
