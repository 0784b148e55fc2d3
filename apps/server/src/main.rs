//! faqbridge HTTP service — exports a document-source database as the flat
//! knowledge schema consumed by the FAQ-ingestion API.

mod routes;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;

use faqbridge_shared::{init_config, load_config, load_config_from};

/// faqbridge — serve document-source FAQs in the knowledge-upload schema.
#[derive(Parser)]
#[command(
    name = "faqbridge",
    version,
    about = "Bridge a document-source database to the FAQ knowledge-upload schema.",
    long_about = None,
)]
struct Cli {
    /// Config file path (defaults to ~/.faqbridge/faqbridge.toml).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Listen port (overrides config and the PORT env var).
    #[arg(long, env = "PORT")]
    port: Option<u16>,

    /// Write a default config file to ~/.faqbridge/ and exit.
    #[arg(long)]
    init_config: bool,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text")]
    log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

/// Initialize tracing based on CLI flags.
fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "faqbridge=info",
        1 => "faqbridge=debug",
        _ => "faqbridge=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt().with_env_filter(env_filter).with_target(false).init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(&cli);

    if cli.init_config {
        let path = init_config()?;
        println!("wrote {}", path.display());
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };

    let port = cli.port.unwrap_or(config.server.port);
    let addr = format!("{}:{port}", config.server.bind);

    if !config.source.is_configured() {
        info!(
            token_env = %config.source.token_env,
            "source credentials not configured, running in sample mode"
        );
    }

    let state = routes::AppState::new(config.source)?;
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "faqbridge listening");
    axum::serve(listener, app).await?;

    Ok(())
}
