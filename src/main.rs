use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use panchakarma_chat::connector::api::{Container, ContainerConfig, Router};
use panchakarma_chat::connector::http;
use panchakarma_chat::{Commands, TranscriptFormat};

#[derive(Parser)]
#[command(name = "panchakarma-chat")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Answer with a canned offline reply instead of calling Gemini
    #[arg(long, global = true)]
    mock: bool,

    /// Gemini model to use (overrides GEMINI_MODEL)
    #[arg(long, global = true)]
    model: Option<String>,

    /// Request timeout for generation calls, in seconds
    #[arg(long, global = true, default_value = "30")]
    timeout_secs: u64,

    /// Transcript rendering: text or markdown
    #[arg(long, global = true, default_value = "text")]
    format: TranscriptFormat,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let container = Container::new(ContainerConfig {
        mock: cli.mock,
        model: cli.model,
        timeout_secs: cli.timeout_secs,
        format: cli.format,
    })?;

    if let Commands::Serve { port, public } = cli.command {
        let host = if public {
            Ipv4Addr::UNSPECIFIED
        } else {
            Ipv4Addr::LOCALHOST
        };
        let registry = Arc::new(container.session_registry());
        info!("Serving {} sessions with {}", container.format(), container.model_name());
        http::serve(registry, SocketAddr::from((host, port))).await?;
        return Ok(());
    }

    let router = Router::new(&container);
    let output = router.route(cli.command).await?;
    println!("{}", output);

    Ok(())
}
