//! `graphd` — the graph algorithm service binary.
//!
//! Parses CLI flags, initializes structured logging, and hands off to the
//! engine's server lifecycle.

use clap::Parser;
use graph_service_engine::ServerConfig;

/// Graph algorithm service: runs max-flow, SCC, MST, and k-clique requests
/// over a line-oriented TCP protocol.
#[derive(Parser, Debug)]
#[command(name = "graphd")]
#[command(about = "Graph algorithm service over a line-oriented TCP protocol")]
struct Args {
    /// Listening port
    #[arg(long, default_value_t = 9090)]
    port: u16,

    /// Leader-Follower worker count (default: max(4, available parallelism))
    #[arg(long)]
    workers: Option<usize>,

    /// Per-stage pipeline queue capacity
    #[arg(long, default_value_t = 64)]
    queue_capacity: usize,

    /// Default PRNG seed for RANDOM requests that omit SEED
    #[arg(long, default_value_t = 42)]
    seed: i64,

    /// Default minimum edge weight for RANDOM requests that omit WMIN
    #[arg(long, default_value_t = 1)]
    wmin: i64,

    /// Default maximum edge weight for RANDOM requests that omit WMAX
    #[arg(long, default_value_t = 1)]
    wmax: i64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let defaults = ServerConfig::default();
    let config = ServerConfig {
        port: args.port,
        workers: args.workers.unwrap_or(defaults.workers),
        queue_capacity: args.queue_capacity,
        default_seed: args.seed,
        default_wmin: args.wmin,
        default_wmax: args.wmax,
    };

    std::process::exit(graph_service_engine::run(config));
}
