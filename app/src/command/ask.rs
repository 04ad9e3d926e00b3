use ghat_config::Config;
use ghat_conversation::{Rejected, SubmitOutcome};
use tracing::info;

/// Input parameters for the Ask command strategy.
#[derive(Debug, Clone)]
pub struct AskInput {
    /// Message to send
    pub message: String,
    /// Optional endpoint override
    pub endpoint: Option<String>,
}

/// Strategy for a single exchange: submit one message, print the reply.
///
/// Transport failures are not errors here either; the controller turns them
/// into the connection-error reply, which is what gets printed.
#[derive(Debug, Clone, Copy)]
pub struct AskStrategy;

impl super::CommandStrategy for AskStrategy {
    type Input = AskInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;
        let mut controller = super::build_controller(&config, input.endpoint);

        match controller.submit(&input.message).await {
            SubmitOutcome::Rejected(Rejected::EmptyInput) => {
                anyhow::bail!("Message is empty")
            }
            SubmitOutcome::Rejected(Rejected::Busy) => {
                anyhow::bail!("A request is already in flight")
            }
            outcome => {
                if let Some(reply) = outcome.reply() {
                    println!("{}", reply.text());
                }
            }
        }

        info!(
            "Session {} finished with {} messages",
            controller.session().id(),
            controller.session().message_count()
        );
        Ok(())
    }
}
