//! Configuration of the tasklion client.
//!
//! Settings are stored as pretty-printed JSON in the platform data directory
//! (see [`DataStorage`]). Every section is optional; a missing file or a
//! missing section means defaults.
//!
//! ## Sections
//!
//! - **server**: base URL of the task service
//! - **ui**: display preferences (theme)
//!
//! The `TASKLION_API_URL` environment variable, also read from a `.env` file,
//! takes precedence over the stored URL.
//!
//! ```rust,no_run
//! use tasklion::libs::config::Config;
//!
//! let config = Config::read()?;
//! println!("{}", config.server().api_url);
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use super::view_state::Theme;
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect, Select};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::{self, File};

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Environment variable overriding [`ServerConfig::api_url`].
pub const API_URL_ENV: &str = "TASKLION_API_URL";

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// A section the setup wizard can configure.
#[derive(Debug, Clone)]
pub struct ConfigModule {
    pub key: String,
    pub name: String,
}

/// Connection settings for the task service.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ServerConfig {
    /// Base URL including the `/api` prefix, e.g. `http://localhost:5000/api`.
    ///
    /// Resource paths (`/tasks`, `/tasks/{id}`, `/tasks/optimize`) are appended to it.
    pub api_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct UiConfig {
    #[serde(default)]
    pub theme: Theme,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ui: Option<UiConfig>,
}

impl Config {
    /// Loads the stored configuration, or defaults when there is none.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Removes the stored configuration. A missing file is not an error.
    pub fn delete() -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if config_file_path.exists() {
            fs::remove_file(config_file_path)?;
        }
        Ok(())
    }

    /// Effective server settings: stored value, then the environment override.
    pub fn server(&self) -> ServerConfig {
        let mut server = self.server.clone().unwrap_or_default();
        if let Ok(url) = env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                server.api_url = url.trim().to_string();
            }
        }
        server
    }

    pub fn theme(&self) -> Theme {
        self.ui.as_ref().map(|ui| ui.theme).unwrap_or_default()
    }

    /// Interactive setup wizard, seeded with the current values.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let modules = vec![
            ConfigModule {
                key: "server".to_string(),
                name: "Task service".to_string(),
            },
            ConfigModule {
                key: "ui".to_string(),
                name: "Display".to_string(),
            },
        ];

        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected {
            match modules[selection].key.as_str() {
                "server" => {
                    let default = config.server.clone().unwrap_or_default();
                    msg_print!(Message::ConfigModuleServer);
                    config.server = Some(ServerConfig {
                        api_url: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptServerApiUrl.to_string())
                            .default(default.api_url)
                            .interact_text()?,
                    });
                }
                "ui" => {
                    let themes = [Theme::Light, Theme::Dark];
                    let current = config.theme();
                    msg_print!(Message::ConfigModuleUi);
                    let index = Select::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptTheme.to_string())
                        .items(&themes)
                        .default(themes.iter().position(|theme| *theme == current).unwrap_or(0))
                        .interact()?;
                    config.ui = Some(UiConfig { theme: themes[index] });
                }
                _ => {}
            }
        }

        Ok(config)
    }
}
