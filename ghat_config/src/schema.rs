use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const CONFIG_DIR_NAME: &str = "ghat";
const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub endpoint: EndpointConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    #[serde(default = "EndpointConfig::default_base_url")]
    pub base_url: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
        }
    }
}

impl EndpointConfig {
    fn default_base_url() -> String {
        "http://localhost:5000".to_string()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    /// Preset prompts offered as quick queries.
    #[serde(default = "ChatConfig::default_quick_prompts")]
    pub quick_prompts: Vec<String>,
    /// Ring the terminal bell when an assistant reply lands.
    #[serde(default = "ChatConfig::default_notify")]
    pub notify: bool,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            quick_prompts: Self::default_quick_prompts(),
            notify: Self::default_notify(),
        }
    }
}

impl ChatConfig {
    fn default_quick_prompts() -> Vec<String> {
        vec![
            "What is Programming?".to_string(),
            "What is JavaScript?".to_string(),
        ]
    }

    const fn default_notify() -> bool {
        true
    }
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    /// Where saved transcripts go. Defaults to `~/ghat/saved`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

impl ExportConfig {
    pub fn resolve_directory(&self) -> anyhow::Result<PathBuf> {
        match &self.directory {
            Some(dir) => Ok(expand_home(dir)),
            None => Ok(Config::config_dir()?.join("saved")),
        }
    }
}

fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

impl Config {
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join(CONFIG_DIR_NAME))
    }

    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load `~/ghat/config.json`, falling back to defaults when it is absent.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> anyhow::Result<Self> {
        if !config_path.exists() {
            debug!(
                "No config at {}, using defaults. Run 'ghat init' to create one.",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(config_path)?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Invalid config file {}: {e}", config_path.display())
        })?;

        info!("Loaded config from {}", config_path.display());
        Ok(config)
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<()> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        Self::write_template(&config_path)?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("📝 Next steps:");
        println!("   1. Point endpoint.base_url at your assistant backend");
        println!("   2. Run 'ghat chat' to start a conversation");
        println!();
        println!("🔧 Configuration options:");
        println!("   - chat.quick_prompts: preset prompts for /quick N");
        println!("   - chat.notify: ring the terminal bell on new replies");
        println!("   - export.directory: where /save writes transcripts");
        println!();
        Ok(())
    }

    /// Write the template to `config_path`. Refuses to overwrite.
    pub fn write_template(config_path: &Path) -> anyhow::Result<()> {
        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        let config_template = r#"{
  "endpoint": {
    "base_url": "http://localhost:5000"
  },
  "chat": {
    "quick_prompts": ["What is Programming?", "What is JavaScript?"],
    "notify": true
  },
  "export": {
    "directory": "~/ghat/saved"
  }
}"#;

        std::fs::write(config_path, config_template)?;
        Ok(())
    }
}
