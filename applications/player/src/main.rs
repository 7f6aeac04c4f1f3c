/// Sortvis Player - plays sorting step traces in the terminal
mod commands;
mod local;

use anyhow::{bail, Context};
use clap::Parser;
use sortvis_client::{ClientConfig, RandomArrayQuery, SortServiceClient};
use sortvis_core::StepFetcher;
use sortvis_playback::{
    PlaybackConfig, PlaybackEngine, PlaybackSnapshot, PlaybackState, Renderer, TextRenderer,
    DEFAULT_ROWS, MAX_SPEED, MIN_SPEED,
};
use sortvis_steps::RandomArraySpec;
use std::{sync::Arc, time::Duration};
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use commands::{spawn_stdin_reader, PlayerCommand, HELP};
use local::LocalFetcher;

#[derive(Debug, Parser)]
#[command(name = "sortvis-player")]
#[command(about = "Play a sorting algorithm step by step in the terminal", long_about = None)]
struct Cli {
    /// Step service URL
    #[arg(short, long, env = "SORTVIS_SERVER_URL", default_value = "http://127.0.0.1:8000")]
    server: String,

    /// Algorithm id (bubble, selection, insertion, merge, quick, heap, counting)
    #[arg(short, long, default_value = "bubble")]
    algorithm: String,

    /// Random array size when no values are given
    #[arg(long, default_value_t = 10)]
    size: usize,

    /// Largest random value
    #[arg(long, default_value_t = 100)]
    max_value: u32,

    /// Playback speed (1-100)
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u8).range(i64::from(MIN_SPEED)..=i64::from(MAX_SPEED)))]
    speed: u8,

    /// Milliseconds per delay unit; the tick delay is (101 - speed) units
    #[arg(long, default_value_t = 5)]
    tick_ms: u64,

    /// Comma-separated input values instead of a random array
    #[arg(short, long, value_delimiter = ',')]
    values: Option<Vec<i64>>,

    /// Generate steps in-process instead of calling the service
    #[arg(long)]
    offline: bool,

    /// Chart height in rows
    #[arg(long, default_value_t = DEFAULT_ROWS)]
    rows: usize,

    /// Keep every frame instead of redrawing in place
    #[arg(long)]
    no_clear: bool,

    /// Ignore stdin commands
    #[arg(long)]
    no_input: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Frames go to stdout, logs to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sortvis_player=info,sortvis_playback=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let input = if cli.no_input {
        closed_input()
    } else {
        eprintln!("{}", HELP);
        spawn_stdin_reader()
    };
    let snapshot = play(cli, input).await?;

    match snapshot.state {
        PlaybackState::Finished => {
            println!(
                "{} steps, {} comparisons, {} swaps",
                snapshot.total_steps, snapshot.statistics.comparisons, snapshot.statistics.swaps
            );
            Ok(())
        }
        PlaybackState::Error => bail!(
            "playback failed: {}",
            snapshot.error.unwrap_or_else(|| "unknown error".to_string())
        ),
        state => {
            tracing::info!(?state, "Playback stopped");
            Ok(())
        }
    }
}

async fn play(cli: Cli, mut input: mpsc::Receiver<String>) -> anyhow::Result<PlaybackSnapshot> {
    let client = if cli.offline {
        None
    } else {
        Some(SortServiceClient::new(ClientConfig::new(cli.server.as_str()))?)
    };

    let values = match &cli.values {
        Some(values) => values.clone(),
        None => random_values(&cli, client.as_ref()).await?,
    };

    let fetcher: Arc<dyn StepFetcher> = match client.clone() {
        Some(client) => Arc::new(client),
        None => Arc::new(LocalFetcher),
    };

    let renderer = TextRenderer::new(std::io::stdout())
        .with_rows(cli.rows)
        .with_clear_screen(!cli.no_clear);

    let config = PlaybackConfig {
        speed: cli.speed,
        tick_unit: Duration::from_millis(cli.tick_ms),
    };

    let engine = PlaybackEngine::spawn(renderer, fetcher, config);

    tracing::info!(
        algorithm = %cli.algorithm,
        len = values.len(),
        speed = cli.speed,
        "Starting playback"
    );
    engine.start(&values, &cli.algorithm).await?;

    let mut input_open = true;
    let snapshot = loop {
        tokio::select! {
            snapshot = engine.wait_until(|s| s.state.is_terminal()) => break snapshot?,
            line = input.recv(), if input_open => {
                let Some(line) = line else {
                    // Without input an idle session can never start again
                    input_open = false;
                    let current = engine.snapshot();
                    if current.state == PlaybackState::Idle {
                        break current;
                    }
                    continue;
                };
                match PlayerCommand::parse(&line) {
                    Ok(Some(command)) => {
                        if let Some(last) = apply(&engine, command, &cli, client.as_ref()).await? {
                            break last;
                        }
                    }
                    Ok(None) => {}
                    Err(e) => tracing::warn!("{}", e),
                }
            }
            result = tokio::signal::ctrl_c() => {
                result.context("failed to listen for Ctrl-C")?;
                let interrupted = engine.snapshot();
                tracing::info!(
                    step = interrupted.current_index,
                    total = interrupted.total_steps,
                    "Interrupted, resetting"
                );
                engine.reset().await?;
                break interrupted;
            }
        }
    };

    engine.shutdown().await?;

    Ok(snapshot)
}

fn closed_input() -> mpsc::Receiver<String> {
    let (_, rx) = mpsc::channel(1);
    rx
}

/// Run one interactive command; `Some` carries the final snapshot on quit
async fn apply<R: Renderer + 'static>(
    engine: &PlaybackEngine<R>,
    command: PlayerCommand,
    cli: &Cli,
    client: Option<&SortServiceClient>,
) -> anyhow::Result<Option<PlaybackSnapshot>> {
    match command {
        PlayerCommand::TogglePause => {
            let state = engine.state();
            if !state.has_sequence() {
                tracing::warn!(?state, "Nothing to pause or resume");
            } else if state == PlaybackState::Running {
                engine.pause().await?;
            } else {
                engine.resume().await?;
            }
        }
        PlayerCommand::Speed(level) => engine.set_speed(level).await?,
        PlayerCommand::Reset => engine.reset().await?,
        PlayerCommand::NewArray => {
            engine.reset().await?;
            let values = random_values(cli, client).await?;
            tracing::info!(len = values.len(), "Starting with a new array");
            engine.start(&values, &cli.algorithm).await?;
        }
        PlayerCommand::Quit => {
            let last = engine.snapshot();
            engine.reset().await?;
            return Ok(Some(last));
        }
    }
    Ok(None)
}

/// Draw a random input array from the service, or locally when offline
async fn random_values(cli: &Cli, client: Option<&SortServiceClient>) -> anyhow::Result<Vec<i64>> {
    let array = match client {
        Some(client) => {
            let query = RandomArrayQuery {
                size: cli.size,
                min_val: 1,
                max_val: cli.max_value,
            };
            client
                .random_array(query)
                .await
                .context("failed to get a random array from the step service")?
        }
        None => sortvis_steps::random_array(RandomArraySpec::new(cli.size, 1, cli.max_value))?,
    };
    Ok(array.into_iter().map(i64::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_defaults() {
        let cli = Cli::try_parse_from(["sortvis-player"]).unwrap();

        assert_eq!(cli.algorithm, "bubble");
        assert_eq!(cli.speed, 50);
        assert_eq!(cli.size, 10);
        assert!(cli.values.is_none());
        assert!(!cli.offline);
    }

    #[test]
    fn parses_values_list() {
        let cli = Cli::try_parse_from([
            "sortvis-player",
            "--algorithm",
            "quick",
            "--values",
            "5,3,1",
            "--offline",
        ])
        .unwrap();

        assert_eq!(cli.values, Some(vec![5, 3, 1]));
        assert_eq!(cli.algorithm, "quick");
        assert!(cli.offline);
    }

    #[test]
    fn rejects_out_of_range_speed() {
        assert!(Cli::try_parse_from(["sortvis-player", "--speed", "0"]).is_err());
        assert!(Cli::try_parse_from(["sortvis-player", "--speed", "101"]).is_err());
        assert!(Cli::try_parse_from(["sortvis-player", "--speed", "100"]).is_ok());
    }

    #[tokio::test]
    async fn offline_playback_finishes() {
        let cli = Cli::try_parse_from([
            "sortvis-player",
            "--values",
            "4,2,3,1",
            "--algorithm",
            "insertion",
            "--speed",
            "100",
            "--tick-ms",
            "0",
            "--offline",
            "--no-clear",
        ])
        .unwrap();

        let snapshot = play(cli, closed_input()).await.unwrap();

        assert_eq!(snapshot.state, PlaybackState::Finished);
        assert_eq!(snapshot.current_index, snapshot.total_steps);
        assert!(snapshot.statistics.swaps > 0);
    }

    fn offline_cli(extra: &[&str]) -> Cli {
        let mut args = vec![
            "sortvis-player",
            "--offline",
            "--no-clear",
            "--tick-ms",
            "1",
        ];
        args.extend_from_slice(extra);
        Cli::try_parse_from(args).unwrap()
    }

    fn scripted(lines: &[&str]) -> mpsc::Receiver<String> {
        let (tx, rx) = mpsc::channel(lines.len().max(1));
        for line in lines {
            tx.try_send((*line).to_string()).unwrap();
        }
        rx
    }

    #[tokio::test]
    async fn speed_command_applies_mid_run() {
        let cli = offline_cli(&["--values", "4,2,3,1", "--algorithm", "insertion"]);

        let snapshot = play(cli, scripted(&["", "s 100"])).await.unwrap();

        assert_eq!(snapshot.state, PlaybackState::Finished);
        assert_eq!(snapshot.speed, 100);
        assert_eq!(snapshot.current_index, snapshot.total_steps);
    }

    #[tokio::test]
    async fn bad_command_is_ignored() {
        let cli = offline_cli(&["--values", "2,1", "--speed", "100"]);

        let snapshot = play(cli, scripted(&["s 500", "jump"])).await.unwrap();

        assert_eq!(snapshot.state, PlaybackState::Finished);
    }

    #[tokio::test]
    async fn reset_command_returns_to_idle() {
        let cli = offline_cli(&["--values", "5,3,4,1,2"]);

        let snapshot = play(cli, scripted(&["r"])).await.unwrap();

        assert_eq!(snapshot.state, PlaybackState::Idle);
        assert_eq!(snapshot.total_steps, 0);
        assert_eq!(snapshot.statistics.swaps, 0);
    }

    #[tokio::test]
    async fn quit_command_stops_playback() {
        let cli = offline_cli(&["--values", "5,3,4,1,2", "--speed", "1"]);

        let snapshot = play(cli, scripted(&["q"])).await.unwrap();

        assert!(!snapshot.state.is_terminal());
    }

    #[tokio::test]
    async fn new_array_command_restarts() {
        let cli = offline_cli(&[
            "--values",
            "2,1",
            "--size",
            "6",
            "--max-value",
            "9",
            "--speed",
            "100",
        ]);
        let short = sortvis_steps::generate(&[2, 1], sortvis_core::AlgorithmId::Bubble)
            .unwrap()
            .len();

        let snapshot = play(cli, scripted(&["n"])).await.unwrap();

        assert_eq!(snapshot.state, PlaybackState::Finished);
        assert!(snapshot.total_steps > short);
    }
}
