//! geolocate - resolve IP addresses to locations
//!
//! This is the composition root: configuration comes from the environment,
//! addresses from the command line.

use geolocate::{build_resolver, load_config};
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment
    let cfg = load_config()?;

    // Setup logging
    let log_level = if cfg.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .init();

    let addresses: Vec<String> = std::env::args().skip(1).collect();
    if addresses.is_empty() {
        anyhow::bail!("usage: geolocate <ip>...");
    }

    let resolver = build_resolver(&cfg)?;

    let mut failed = false;
    for text in &addresses {
        match resolver.resolve_str(text).await {
            Ok(location) => println!("{}\t{}", text, location),
            Err(e) => {
                failed = true;
                println!("{}\terror: {}", text, e);
            }
        }
    }

    if failed {
        std::process::exit(1);
    }
    Ok(())
}
