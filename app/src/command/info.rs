use ghat_config::Config;
use ghat_transport::CHAT_PATH;

/// Strategy for displaying configuration information.
///
/// Prints the resolved configuration: endpoint, chat presets, notification
/// and export settings. Missing sections show their defaults.
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config_path = Config::config_path()?;
        let config = Config::load()?;

        println!("=== ghat Configuration ===\n");

        println!("Config file:");
        if config_path.exists() {
            println!("  {}", config_path.display());
        } else {
            println!("  {} (not found, using defaults)", config_path.display());
        }
        println!();

        println!("Endpoint:");
        println!(
            "  Chat URL: {}{CHAT_PATH}",
            config.endpoint.base_url.trim_end_matches('/')
        );
        println!();

        println!("Chat:");
        if config.chat.quick_prompts.is_empty() {
            println!("  Quick Prompts: (none)");
        } else {
            println!("  Quick Prompts:");
            for (i, prompt) in config.chat.quick_prompts.iter().enumerate() {
                println!("    {}. {}", i + 1, truncate(prompt, 60));
            }
        }
        println!("  Notify: {}", config.chat.notify);
        println!();

        println!("Export:");
        println!(
            "  Directory: {}",
            config.export.resolve_directory()?.display()
        );

        Ok(())
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
