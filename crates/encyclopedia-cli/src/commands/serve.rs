//! Serve command handler

use anyhow::Result;

use encyclopedia_core::Store;

/// Run the web server until Ctrl-C
///
/// `host` and `port` override the configured values for this run only.
pub async fn run(store: Store, host: Option<String>, port: Option<u16>) -> Result<()> {
    let config = store.config();
    let bind_addr = format!(
        "{}:{}",
        host.as_deref().unwrap_or(&config.host),
        port.unwrap_or(config.port)
    );

    // Logged as warnings; lookups still work
    store.collisions()?;

    encyclopedia_web::serve(store, &bind_addr).await
}
