//! Static strategy pattern for CLI commands.
//!
//! Each subcommand is its own strategy type with its own input, dispatched
//! statically from `main`.

use ghat_config::Config;
use ghat_conversation::SessionController;
use ghat_transport::HttpTransport;
use tracing::info;

mod ask;
mod chat;
mod info;
mod init;
mod slash;
mod upgrade;
mod version;

pub use ask::{AskInput, AskStrategy};
pub use chat::{ChatInput, ChatStrategy};
pub use info::InfoStrategy;
pub use init::InitStrategy;
pub use upgrade::UpgradeStrategy;
pub use version::VersionStrategy;

/// Build a controller talking to the configured endpoint, or `endpoint` when
/// given on the command line.
fn build_controller(
    config: &Config,
    endpoint: Option<String>,
) -> SessionController<HttpTransport> {
    let base_url = endpoint.unwrap_or_else(|| config.endpoint.base_url.clone());
    info!("Assistant endpoint: {base_url}");
    SessionController::new(HttpTransport::new().with_base_url(base_url))
}

/// Contract shared by all command strategies.
///
/// Each strategy defines its own input type, so `main` passes parameters
/// without boxing or runtime casting.
pub trait CommandStrategy: Send + Sync + 'static {
    type Input;

    /// # Errors
    /// Returns an error if command execution fails.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}
