//! sleighd — the Sleigh Command daemon.
//!
//! Single binary that assembles all subsystems:
//! - Store (redb, on-disk or in-memory) + demo seed
//! - Mission aggregator (snapshot + live change feed)
//! - Flight simulator (demo writer)
//! - JSON read-model API
//!
//! # Usage
//!
//! ```text
//! sleighd serve --port 8787 --data-dir /var/lib/sleigh
//! sleighd serve --in-memory --tick-secs 1
//! ```

mod simulator;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::sync::watch;
use tracing::info;

use sleigh_api::{ApiState, api_router};
use sleigh_mission::MissionData;
use sleigh_store::{SleighStore, seed_if_empty};

use crate::simulator::FlightSimulator;

#[derive(Parser)]
#[command(name = "sleighd", about = "Sleigh Command daemon")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full stack: store, aggregator, simulator, and API.
    Serve {
        /// Port to listen on.
        #[arg(long, default_value = "8787")]
        port: u16,

        /// Data directory for persistent state.
        #[arg(long, default_value = "/var/lib/sleigh")]
        data_dir: PathBuf,

        /// Use an ephemeral in-memory store instead of the data dir.
        #[arg(long)]
        in_memory: bool,

        /// Simulator tick interval in seconds.
        #[arg(long, default_value = "2")]
        tick_secs: u64,

        /// Disable the demo flight simulator.
        #[arg(long)]
        no_simulate: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,sleighd=debug,sleigh=debug".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            port,
            data_dir,
            in_memory,
            tick_secs,
            no_simulate,
        } => run_serve(port, data_dir, in_memory, tick_secs, no_simulate).await,
    }
}

async fn run_serve(
    port: u16,
    data_dir: PathBuf,
    in_memory: bool,
    tick_secs: u64,
    no_simulate: bool,
) -> anyhow::Result<()> {
    info!("Sleigh Command daemon starting");

    // ── Store + seed ───────────────────────────────────────────

    let store = if in_memory {
        SleighStore::open_in_memory()?
    } else {
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("creating data dir {}", data_dir.display()))?;
        let db_path = data_dir.join("sleigh.redb");
        let store = SleighStore::open(&db_path)?;
        info!(path = ?db_path, "store opened");
        store
    };

    if seed_if_empty(&store)? {
        info!("store was empty, demo data seeded");
    }

    // ── Aggregator ─────────────────────────────────────────────

    let mission = Arc::new(MissionData::new(store.clone()));
    mission.load_snapshot().await;
    if let Some(error) = mission.snapshot().await.error {
        anyhow::bail!("initial snapshot load failed: {error}");
    }
    info!("mission aggregator ready");

    // ── Simulator ──────────────────────────────────────────────

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let simulator_handle = if no_simulate {
        None
    } else {
        let sim = FlightSimulator::new(store.clone(), Duration::from_secs(tick_secs));
        info!(tick_secs, "flight simulator enabled");
        Some(tokio::spawn(sim.run(shutdown_rx)))
    };

    // ── API ────────────────────────────────────────────────────

    let router = api_router(ApiState {
        mission: mission.clone(),
    });
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, "API listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await?;

    // ── Teardown ───────────────────────────────────────────────

    let _ = shutdown_tx.send(true);
    if let Some(handle) = simulator_handle {
        let _ = handle.await;
    }
    mission.shutdown();
    info!("Sleigh Command daemon stopped");
    Ok(())
}
