//! Entry point of the `bearer-inspect` server.
//!
//! Configuration comes from flags or the environment (a `.env` file is
//! honoured); see `bearer-inspect --help`.

use bearer_inspect::{server, Config};
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

fn init_tracing(debug: bool) {
    // RUST_LOG wins over the debug toggle.
    let default = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[actix_web::main]
async fn main() -> std::process::ExitCode {
    dotenvy::dotenv().ok();
    let config = Config::parse();
    init_tracing(config.debug);

    match server::run(&config).await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            std::process::ExitCode::FAILURE
        }
    }
}
