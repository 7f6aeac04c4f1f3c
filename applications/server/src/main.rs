/// Sortvis Server - step trace service for the sorting visualizer
use clap::{Parser, Subcommand};
use sortvis_core::SortRequest;
use sortvis_server::{api, config::ServerConfig, state::AppState};
use std::{net::SocketAddr, path::PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "sortvis-server")]
#[command(about = "Sortvis step trace service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print the step trace for an array as JSON
    Generate {
        /// Algorithm id (bubble, selection, insertion, merge, quick, heap, counting)
        #[arg(short, long, default_value = "bubble")]
        algorithm: String,
        /// Comma-separated positive integers
        #[arg(short, long, value_delimiter = ',', required = true)]
        values: Vec<i64>,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so `generate` output stays clean JSON
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sortvis_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => {
            serve(config).await?;
        }
        Commands::Generate {
            algorithm,
            values,
            pretty,
        } => {
            generate(&algorithm, &values, pretty)?;
        }
    }

    Ok(())
}

async fn serve(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    // Load configuration
    let config = ServerConfig::load(config_path.as_deref())?;
    config.validate()?;

    tracing::info!("Starting Sortvis Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);
    tracing::info!(
        max_array_len = config.limits.max_array_len,
        max_value = config.limits.max_value,
        "Request limits"
    );

    let app = api::create_router(AppState::new(config.limits));

    // Create server address
    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn generate(algorithm: &str, values: &[i64], pretty: bool) -> anyhow::Result<()> {
    let request = SortRequest::parse(values, algorithm)?;
    let sequence = sortvis_steps::generate_for(&request)?;

    tracing::info!(
        algorithm = request.algorithm.as_str(),
        steps = sequence.len(),
        "Generated step trace"
    );

    let records = sequence.into_records();
    let json = if pretty {
        serde_json::to_string_pretty(&records)?
    } else {
        serde_json::to_string(&records)?
    };
    println!("{}", json);

    Ok(())
}
