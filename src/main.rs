//! # hoopgraph - CLI Entry Point
//!
//! Commands:
//! - `serve`       - Run the HTTP server for the visualization frontend
//! - `snapshot`    - Build a game's graph and print its node/link snapshot
//! - `stats`       - Print one player's stat line
//! - `centrality`  - Print eigen-centrality for every player
//! - `audit`       - Scan a game's inputs for non-numeric / non-finite values
//! - `init-config` - Generate a default configuration file

use clap::{Parser, Subcommand};
use log::info;
use serde::Serialize;
use std::path::{Path, PathBuf};

use hoopgraph::assembler;
use hoopgraph::graph::{PlayerStats, WeightedGraph};
use hoopgraph::ingest::{self, audit};
use hoopgraph::server::GraphServer;
use hoopgraph::{HoopConfig, HoopError, HoopResult};

/// hoopgraph - assist-network analytics for a single basketball game.
#[derive(Parser, Debug)]
#[command(name = "hoopgraph")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file.
    #[arg(short, long, default_value = "hoopgraph.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Which game and team to build a graph for.
#[derive(clap::Args, Debug)]
struct GameArgs {
    /// Game identifier, e.g. 0022401021.
    #[arg(long)]
    game_id: String,

    /// Team identifier, e.g. 1610612754.
    #[arg(long)]
    team_id: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server.
    Serve,

    /// Print the node/link snapshot of a game's graph.
    Snapshot {
        #[command(flatten)]
        game: GameArgs,

        /// Leave out links lighter than this (default from config).
        #[arg(long)]
        min_edge_weight: Option<f64>,
    },

    /// Print one player's stat line.
    Stats {
        #[command(flatten)]
        game: GameArgs,

        /// Player name as it appears in the box score.
        #[arg(long)]
        player: String,
    },

    /// Print eigen-centrality for every player.
    Centrality {
        #[command(flatten)]
        game: GameArgs,

        /// Iteration cap (default from config).
        #[arg(long)]
        max_iterations: Option<usize>,
    },

    /// Scan a game's inputs for values that sanitization would hide.
    Audit {
        #[command(flatten)]
        game: GameArgs,
    },

    /// Generate a default configuration file.
    InitConfig,
}

#[tokio::main]
async fn main() -> HoopResult<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve => cmd_serve(&cli.config).await,
        Commands::Snapshot { game, min_edge_weight } => {
            cmd_snapshot(&cli.config, &game, min_edge_weight)
        }
        Commands::Stats { game, player } => cmd_stats(&cli.config, &game, &player),
        Commands::Centrality { game, max_iterations } => {
            cmd_centrality(&cli.config, &game, max_iterations)
        }
        Commands::Audit { game } => cmd_audit(&cli.config, &game),
        Commands::InitConfig => cmd_init_config(&cli.config),
    }
}

fn build(config: &HoopConfig, game: &GameArgs) -> HoopResult<WeightedGraph> {
    let (graph, _report) = assembler::load_and_build(&config.data, &game.game_id, &game.team_id)?;
    let stats = graph.stats();
    info!(
        "Graph ready: {} players, {} team points, {} active links",
        stats.players, stats.team_pts, stats.active_links,
    );
    Ok(graph)
}

/// `stats` output: the served stat line plus weight received from teammates.
#[derive(Serialize, Debug)]
struct StatsOutput {
    #[serde(flatten)]
    stats: PlayerStats,
    receiving: f64,
}

fn stats_output(graph: &WeightedGraph, player: &str) -> HoopResult<StatsOutput> {
    Ok(StatsOutput {
        stats: graph.player_stats(player)?,
        receiving: graph.receiving(player)?,
    })
}

fn print_json<T: Serialize>(value: &T) -> HoopResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn cmd_serve(config_path: &Path) -> HoopResult<()> {
    let config = HoopConfig::load_or_default(config_path)?;
    let server = GraphServer::new(&config);
    info!("hoopgraph server starting on http://{}", server.bind_address());
    server.run().await
}

fn cmd_snapshot(config_path: &Path, game: &GameArgs, min_edge_weight: Option<f64>) -> HoopResult<()> {
    let config = HoopConfig::load_or_default(config_path)?;
    let graph = build(&config, game)?;
    let min = min_edge_weight.unwrap_or(config.analytics.default_min_edge_weight);
    print_json(&graph.snapshot(min))
}

fn cmd_stats(config_path: &Path, game: &GameArgs, player: &str) -> HoopResult<()> {
    let config = HoopConfig::load_or_default(config_path)?;
    let graph = build(&config, game)?;
    print_json(&stats_output(&graph, player)?)
}

fn cmd_centrality(config_path: &Path, game: &GameArgs, max_iterations: Option<usize>) -> HoopResult<()> {
    let config = HoopConfig::load_or_default(config_path)?;
    let graph = build(&config, game)?;
    let max_itr = max_iterations.unwrap_or(config.analytics.centrality_max_iterations);
    print_json(&graph.eigen_centrality(max_itr))
}

fn cmd_audit(config_path: &Path, game: &GameArgs) -> HoopResult<()> {
    let config = HoopConfig::load_or_default(config_path)?;
    println!("=== Non-finite value audit ===");
    println!("Game: {}  Team: {}", game.game_id, game.team_id);

    let raw_points = ingest::load_raw_player_points(&config.data.box_score_path, &game.team_id)?;
    let graph = build(&config, game)?;
    let report = audit::audit(&raw_points, &graph, config.analytics.default_min_edge_weight);

    println!();
    println!("PTS entries: {}", report.points_scanned);
    println!("Bad PTS entries: {}", report.bad_points.len());
    for bad in report.bad_points.iter().take(audit::MAX_EXAMPLES) {
        println!("  {} = {} ({:?})", bad.name, bad.raw, bad.kind);
    }

    println!();
    println!("Matrix: {}x{}", report.matrix_size, report.matrix_size);
    println!("Non-finite matrix cells: {}", report.non_finite_cell_count);
    for cell in &report.non_finite_cells {
        println!("  {}", cell);
    }

    println!();
    println!("Non-finite values in payload: {}", report.payload_offender_count);
    for offender in &report.payload_offenders {
        println!("  {}", offender);
    }

    if report.is_clean() {
        println!();
        println!("Clean: every value the engine sees is finite.");
    }
    Ok(())
}

fn cmd_init_config(config_path: &Path) -> HoopResult<()> {
    if config_path.exists() {
        return Err(HoopError::Config(format!(
            "Configuration file already exists: {}. Remove it first or use a different path.",
            config_path.display()
        )));
    }

    HoopConfig::write_default(config_path)?;
    println!("Default configuration written to: {}", config_path.display());
    println!();
    println!("Key settings to configure:");
    println!("  [data]      - Point plays_path and box_score_path at your game files");
    println!("  [analytics] - default_min_edge_weight (1.0), centrality_max_iterations (50)");
    println!("  [server]    - Server runs on http://127.0.0.1:8000 by default");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_output_is_single_json_object() {
        let mut graph = WeightedGraph::new(["A", "B"]);
        graph.set_node_val("A", 10.0).unwrap();
        graph.set_node_val("B", 6.0).unwrap();
        graph.directed_edge(Some("A"), Some("B"), 2.0);

        let text = serde_json::to_string_pretty(&stats_output(&graph, "B").unwrap()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["name"], "B");
        assert_eq!(json["scoring"], 6.0);
        assert_eq!(json["receiving"], 2.0);
        assert_eq!(json["team_pts"], 16.0);
    }

    #[test]
    fn test_stats_output_unknown_player() {
        let graph = WeightedGraph::new(["A"]);
        assert!(stats_output(&graph, "Z").is_err());
    }
}
