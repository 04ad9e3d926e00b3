#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

mod command;

use clap::{Parser, Subcommand};
use command::{
    AskInput, AskStrategy, ChatInput, ChatStrategy, CommandStrategy, InfoStrategy, InitStrategy,
    UpgradeStrategy, VersionStrategy,
};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "ghat")]
#[command(about = "ghat assistant client", long_about = None)]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive conversation
    Chat {
        /// Assistant base URL (overrides config)
        #[arg(short, long)]
        endpoint: Option<String>,
    },
    /// Send a single message and print the reply
    Ask {
        /// Message to send
        #[arg(short, long)]
        message: String,

        /// Assistant base URL (overrides config)
        #[arg(short, long)]
        endpoint: Option<String>,
    },
    /// Walk through the Upgrade to Pro flow
    Upgrade,
    /// Initialize configuration
    Init,
    /// Show configuration
    Info,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Chat { endpoint } => ChatStrategy.execute(ChatInput { endpoint }).await,
        Commands::Ask { message, endpoint } => {
            AskStrategy.execute(AskInput { message, endpoint }).await
        }
        Commands::Upgrade => UpgradeStrategy.execute(()).await,
        Commands::Init => InitStrategy.execute(()).await,
        Commands::Info => InfoStrategy.execute(()).await,
        Commands::Version => VersionStrategy.execute(()).await,
    }
}
