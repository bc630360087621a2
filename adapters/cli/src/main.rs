#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs Heavy Machine Gun sessions headlessly.

mod autopilot;
mod config;
mod headless;
mod store;

use std::{fmt, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use heavy_machine_gun_rendering::RenderingBackend;
use heavy_machine_gun_session::{Session, SessionConfig};
use heavy_machine_gun_system_high_score::{KeyValueStore, MemoryStore};
use tracing_subscriber::EnvFilter;

use config::RunConfig;
use headless::HeadlessBackend;
use store::FileStore;

#[derive(Debug, Parser)]
#[command(name = "heavy-machine-gun")]
#[command(about = "Headless runner for the Heavy Machine Gun difficulty and spawn engine")]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Plays a seeded session for a fixed amount of simulated time.
    Run(RunArgs),
}

#[derive(Debug, Default, Args)]
struct RunArgs {
    /// TOML file providing run settings.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for every random stream of the session.
    #[arg(long)]
    seed: Option<u64>,
    /// Simulated run time in seconds.
    #[arg(long)]
    duration_secs: Option<u64>,
    /// Simulated frame interval in milliseconds.
    #[arg(long)]
    frame_ms: Option<u64>,
    /// File in which the high score is kept between runs.
    #[arg(long)]
    high_score_path: Option<PathBuf>,
    /// Leaves the ship idle instead of steering it.
    #[arg(long)]
    no_autopilot: bool,
}

/// Outcome of a headless run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct RunSummary {
    games_played: u32,
    best_score: u64,
    final_score: u64,
    final_level: u32,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "games played: {}\nbest score: {}\nfinal score: {}\nfinal level: {}",
            self.games_played, self.best_score, self.final_score, self.final_level
        )
    }
}

/// Entry point for the Heavy Machine Gun command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        CliCommand::Run(args) => {
            let config = resolve_config(&args)?;
            let summary = match config.high_score_path.clone() {
                Some(path) => {
                    let store = FileStore::new(path);
                    tracing::info!(path = %store.path().display(), "high score file");
                    play(&config, store)?
                }
                None => play(&config, MemoryStore::new())?,
            };
            println!("{summary}");
        }
    }
    Ok(())
}

fn resolve_config(args: &RunArgs) -> Result<RunConfig> {
    let mut config = match &args.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };

    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(duration_secs) = args.duration_secs {
        config.duration_secs = duration_secs;
    }
    if let Some(frame_ms) = args.frame_ms {
        config.frame_ms = frame_ms;
    }
    if let Some(path) = &args.high_score_path {
        config.high_score_path = Some(path.clone());
    }
    if args.no_autopilot {
        config.autopilot = false;
    }

    config.validate().context("invalid run settings")?;
    Ok(config)
}

fn play<S: KeyValueStore>(config: &RunConfig, store: S) -> Result<RunSummary> {
    let mut session = Session::new(
        SessionConfig {
            seed: config.seed,
            playfield: config.playfield(),
        },
        store,
    );
    let _ = session.start();

    let backend = HeadlessBackend::new(config.frame_count(), config.frame(), config.autopilot);
    backend.run(session.presentation(), |dt, input, presentation| {
        let _ = session.advance(dt, input);
        session.refresh(presentation);
    })?;

    let game = session.game();
    let unfinished = u32::from(!game.is_game_over());
    Ok(RunSummary {
        games_played: session.games_finished() + unfinished,
        best_score: session.high_score().max(game.score),
        final_score: game.score,
        final_level: game.level,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let args = RunArgs {
            seed: Some(9),
            duration_secs: Some(5),
            frame_ms: Some(25),
            no_autopilot: true,
            ..RunArgs::default()
        };
        let config = resolve_config(&args).expect("valid settings");

        assert_eq!(config.seed, 9);
        assert_eq!(config.frame_count(), 200);
        assert!(!config.autopilot);
        assert_eq!(config.high_score_path, None);
    }

    #[test]
    fn zero_frame_flag_is_rejected() {
        let args = RunArgs {
            frame_ms: Some(0),
            ..RunArgs::default()
        };
        assert!(resolve_config(&args).is_err());
    }

    #[test]
    fn short_autopilot_run_reports_one_game() {
        let config = RunConfig {
            duration_secs: 10,
            frame_ms: 20,
            ..RunConfig::default()
        };
        let summary = play(&config, MemoryStore::new()).expect("run succeeds");

        assert_eq!(summary.games_played, 1);
        assert_eq!(summary.final_level, 1);
        assert!(summary.best_score >= summary.final_score);
        assert!(summary.to_string().contains("games played: 1"));
    }

    #[test]
    fn cli_parses_run_flags() {
        let cli = Cli::try_parse_from([
            "heavy-machine-gun",
            "run",
            "--seed",
            "3",
            "--duration-secs",
            "60",
            "--no-autopilot",
        ])
        .expect("flags parse");
        let CliCommand::Run(args) = cli.command;

        assert_eq!(args.seed, Some(3));
        assert_eq!(args.duration_secs, Some(60));
        assert!(args.no_autopilot);
        assert!(args.config.is_none());
    }
}
