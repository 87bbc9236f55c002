mod errors;
mod params;

pub use errors::ApiError;
pub use params::WikiParams;

use std::net::SocketAddr;

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::resolve::{self, ResolvedArticle};
use crate::wiki::WikiClient;

/// HTTP surface for the map UI.
///
/// - `GET /wiki?target=..&parent=..&lang=en|ko` → `{title, link, html}`, `null` when nothing matched
/// - `GET /health` → `OK`
pub fn router(client: WikiClient) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/wiki", get(wiki))
        .layer(TraceLayer::new_for_http())
        .with_state(client)
}

pub async fn serve(client: WikiClient, port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on http://{addr}");
    axum::serve(listener, router(client)).await
}

async fn health() -> &'static str {
    "OK"
}

async fn wiki(
    State(client): State<WikiClient>,
    Query(params): Query<WikiParams>,
) -> Result<Json<Option<ResolvedArticle>>, ApiError> {
    let query = params.validate()?;
    info!(name = %query.target, parent = %query.parent, lang = %query.lang, "GET /wiki");

    let article = resolve::resolve(&client, &query.target, &query.parent, query.lang).await?;
    match &article {
        Some(a) => debug!(title = a.title(), link = a.link(), "responding with article"),
        None => debug!("responding with null"),
    }
    Ok(Json(article))
}
