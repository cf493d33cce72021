use anyhow::Result;
use clap::{Parser, Subcommand};

/// enrolldesk - enquiry capture for the academy's lead pages
#[derive(Parser)]
#[command(name = "enrolldesk")]
#[command(about = "Lead-capture enquiry handling for the academy website", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = enrolldesk::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    enrolldesk::observability::init_observability(
        "enrolldesk",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::Serve { host, port } => enrolldesk::server::serve(config, host, port).await,
    }
}
