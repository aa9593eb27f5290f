//! Encyclopedia web server
//!
//! Server-rendered HTML over the entry store:
//!
//! - `/` index of all entries
//! - `/wiki/{title}` one entry, Markdown rendered to HTML
//! - `/search?q=` exact match redirect or substring results
//! - `/randomarticle` redirect to a random entry
//! - `/newpage`, `/editpage/{title}` create and edit forms

use anyhow::{Context, Result};
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use tracing::info;

use encyclopedia_core::Store;

mod dto;
mod error;
mod handlers;
mod markdown;
mod pages;


pub use markdown::render_markdown_html;

#[derive(Clone)]
pub(crate) struct WebState {
    pub(crate) store: Store,
}

impl WebState {
    fn new(store: Store) -> Self {
        Self { store }
    }
}

/// Serve the wiki on `bind_addr` until Ctrl-C.
///
/// # Errors
/// Returns an error when the socket cannot be bound or the server exits
/// with a runtime failure.
pub async fn serve(store: Store, bind_addr: &str) -> Result<()> {
    let entries_dir = store.config().entries_dir.clone();
    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind web server at {bind_addr}"))?;
    let local_addr = listener.local_addr()?;

    info!("Serving entries from {:?}", entries_dir);
    info!("Listening on http://{}", local_addr);
    println!("encyclopedia listening on http://{}", local_addr);

    axum::serve(listener, app_router(WebState::new(store)))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .context("web server failed")
}

/// The full router, without binding a socket
pub fn router(store: Store) -> Router {
    app_router(WebState::new(store))
}

pub(crate) fn app_router(state: WebState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/wiki/:title", get(handlers::article))
        .route("/randomarticle", get(handlers::random_article))
        .route("/search", get(handlers::search))
        .route("/newpage", get(handlers::new_page_form).post(handlers::create_page))
        .route(
            "/editpage/:title",
            get(handlers::edit_page_form).post(handlers::update_page),
        )
        .fallback(handlers::fallback)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
