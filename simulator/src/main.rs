use anyhow::{Context, Result};
use clap::Parser;
use royale_simulator::{Api, Simulator, SimulatorConfig};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Host interface to bind (default: localhost).
    #[arg(long, default_value = "127.0.0.1")]
    host: IpAddr,

    #[arg(short, long, default_value_t = 8080)]
    port: u16,

    /// Balance of the account when the simulator starts.
    #[arg(long, default_value_t = 1_000)]
    initial_balance: u64,

    /// Seed for the settlement RNG; omit for entropy-based outcomes.
    #[arg(long)]
    seed: Option<u64>,

    /// Artificial settlement latency in milliseconds.
    #[arg(long)]
    settle_delay_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args = Args::parse();
    let config = SimulatorConfig {
        initial_balance: args.initial_balance,
        seed: args.seed,
        settle_delay: args.settle_delay_ms.map(Duration::from_millis),
    };

    let simulator = Arc::new(Simulator::new(config));
    let api = Api::new(simulator);

    let addr = SocketAddr::from((args.host, args.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "ledger simulator listening");

    axum::serve(listener, api.router())
        .await
        .context("server exited")?;
    Ok(())
}
