//! `skerryd`, the Skerry key routing daemon.
//!
//! Listens for `get`/`set`/`put`/`del` command lines, resolves the node that
//! owns each key on the consistent hashing ring, and answers with a redirect
//! to that node.
//!
//! # Usage
//!
//! ```text
//! skerryd start                                # listen on 0.0.0.0:6969
//! skerryd start -c skerry.toml                 # start with a config file
//! skerryd start -l 127.0.0.1:7000 -n node-a -n node-b
//! skerryd assign user:1 user:2                 # print owners and exit
//! ```

mod config;
mod server;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use skerry_placement::Ring;
use skerry_router::{Redirect, Router, SharedRing};
use tokio::net::TcpListener;
use tracing::{error, info};

use config::CliConfig;

// -----------------------------------------------------------------------
// CLI definition
// -----------------------------------------------------------------------

#[derive(Parser)]
#[command(
    name = "skerryd",
    version,
    about = "Skerry consistent hashing key router"
)]
struct Cli {
    /// Path to TOML config file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the command listener.
    Start {
        /// Override listen address (e.g. "127.0.0.1:7000").
        #[arg(short, long)]
        listen_addr: Option<String>,

        /// Node identifier to place on the ring, in addition to `[ring] nodes`.
        ///
        /// Can be specified multiple times.
        #[arg(short, long)]
        node: Vec<String>,
    },

    /// Print the owning node for each key and exit.
    Assign {
        /// Keys to resolve.
        #[arg(required = true)]
        keys: Vec<String>,
    },
}

// -----------------------------------------------------------------------
// Entrypoint
// -----------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = CliConfig::load(cli.config.as_deref()).context("failed to load config")?;

    setup_tracing(&config.log.level);

    match cli.command {
        Commands::Start { listen_addr, node } => {
            // CLI args override config file values.
            if let Some(addr) = listen_addr {
                config.node.listen_addr = addr;
            }
            config.ring.nodes.extend(node);
            cmd_start(config).await
        }
        Commands::Assign { keys } => cmd_assign(&config, &keys),
    }
}

/// Initialize the `tracing` subscriber with the given level filter.
///
/// Respects `RUST_LOG` env var if set, otherwise uses the config value.
fn setup_tracing(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

// -----------------------------------------------------------------------
// skerryd start
// -----------------------------------------------------------------------

async fn cmd_start(config: CliConfig) -> Result<()> {
    info!(
        listen_addr = %config.node.listen_addr,
        capacity = config.ring_capacity(),
        replication_factor = config.replication_factor(),
        nodes = config.ring.nodes.len(),
        "starting skerryd"
    );

    let ring = SharedRing::new(Ring::new(
        config.ring_capacity(),
        config.replication_factor(),
    ));
    let router = Router::new(ring, Arc::new(Redirect));

    for id in &config.ring.nodes {
        router
            .add_node(id)
            .await
            .with_context(|| format!("failed to place node {id:?} on the ring"))?;
    }

    let listener = TcpListener::bind(&config.node.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.node.listen_addr))?;
    info!(addr = %config.node.listen_addr, "command listener ready");

    server::serve(listener, router, shutdown_signal())
        .await
        .context("command listener failed")?;

    info!("skerryd stopped");
    Ok(())
}

/// Resolves on Ctrl-C.
///
/// If the signal handler cannot be installed the daemon keeps running
/// rather than shutting down immediately.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown requested"),
        Err(e) => {
            error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    }
}

// -----------------------------------------------------------------------
// skerryd assign
// -----------------------------------------------------------------------

fn cmd_assign(config: &CliConfig, keys: &[String]) -> Result<()> {
    let ring = build_ring(config)?;

    for key in keys {
        let owner = ring
            .assign(key)
            .with_context(|| format!("failed to resolve {key:?}"))?;
        println!("{key} -> {} ({})", owner.identifier, owner.key);
    }

    Ok(())
}

/// Build a ring from the configured capacity, replication factor and nodes.
fn build_ring(config: &CliConfig) -> Result<Ring> {
    let mut ring = Ring::new(config.ring_capacity(), config.replication_factor());
    for id in &config.ring.nodes {
        ring.add(id)
            .with_context(|| format!("failed to place node {id:?} on the ring"))?;
    }
    Ok(ring)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_nodes(capacity: usize, nodes: &[&str]) -> CliConfig {
        let mut config = CliConfig::default();
        config.ring.capacity = Some(capacity);
        config.ring.nodes = nodes.iter().map(|n| n.to_string()).collect();
        config
    }

    #[test]
    fn test_cli_parses_start_overrides() {
        let cli = Cli::parse_from([
            "skerryd", "-c", "s.toml", "start", "-l", "127.0.0.1:1", "-n", "a", "-n", "b",
        ]);
        assert_eq!(cli.config, Some(PathBuf::from("s.toml")));
        match cli.command {
            Commands::Start { listen_addr, node } => {
                assert_eq!(listen_addr.as_deref(), Some("127.0.0.1:1"));
                assert_eq!(node, vec!["a", "b"]);
            }
            Commands::Assign { .. } => panic!("expected start"),
        }
    }

    #[test]
    fn test_cli_assign_requires_keys() {
        assert!(Cli::try_parse_from(["skerryd", "assign"]).is_err());
    }

    #[test]
    fn test_build_ring_from_config() {
        let config = config_with_nodes(4, &["node-a", "node-b", "node-c"]);
        let ring = build_ring(&config).unwrap();
        assert_eq!(ring.len(), 3);
        assert_eq!(ring.capacity(), 4);
        assert_eq!(ring.assign("node-b").unwrap().identifier, "node-b");
    }

    #[test]
    fn test_build_ring_over_capacity_fails() {
        let config = config_with_nodes(1, &["node-a", "node-b"]);
        let err = build_ring(&config).unwrap_err();
        assert!(err.to_string().contains("node-b"), "{err:#}");
    }

    #[test]
    fn test_build_ring_duplicate_node_fails() {
        let config = config_with_nodes(4, &["node-a", "node-a"]);
        assert!(build_ring(&config).is_err());
    }

    #[test]
    fn test_assign_on_empty_ring_fails() {
        let config = config_with_nodes(4, &[]);
        assert!(cmd_assign(&config, &["k".to_string()]).is_err());
    }
}
