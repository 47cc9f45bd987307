//! FRASS web front end
//!
//! With the `web` feature this binary is the browser app; otherwise it is the
//! native host serving the built bundle.

#[cfg(feature = "web")]
fn main() {
    frass_web::app::launch();
}

#[cfg(all(feature = "server", not(feature = "web")))]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "frass_web=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting FRASS web host v{}", env!("CARGO_PKG_VERSION"));

    let config = frass_web::config::load_config()?;
    tracing::info!(?config, "Configuration loaded");

    frass_web::host::serve(config).await
}

#[cfg(not(any(feature = "server", feature = "web")))]
fn main() {
    eprintln!("Build with `--features web` for the browser app or `--features server` for the host");
}
