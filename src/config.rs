use std::{env, path::PathBuf, str::FromStr};

use anyhow::Result;
use config::{Config as config_config, File as config_file};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::crawler::i3investor;

const CONFIG_PATH: &str = "app.json";

pub static SETTINGS: Lazy<App> = Lazy::new(|| App::get().expect("Config error"));

#[derive(Serialize, Deserialize, Default, Debug, Clone)]
pub struct App {
    #[serde(default)]
    pub system: System,
    #[serde(default)]
    pub quote: Quote,
}

const HTTP_HOST: &str = "HTTP_HOST";
const HTTP_PORT: &str = "HTTP_PORT";

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct System {
    pub http_host: String,
    pub http_port: u16,
}

impl Default for System {
    fn default() -> Self {
        System {
            http_host: "0.0.0.0".to_string(),
            http_port: 3001,
        }
    }
}

const QUOTE_HOST: &str = "QUOTE_HOST";

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Quote {
    /// Upstream host whose quote pages are scraped.
    pub host: String,
}

impl Default for Quote {
    fn default() -> Self {
        Quote {
            host: i3investor::HOST.to_string(),
        }
    }
}

impl App {
    fn get() -> Result<Self> {
        let config_path = config_path();
        if config_path.exists() {
            let config: App = config_config::builder()
                .add_source(config_file::from(config_path))
                .build()?
                .try_deserialize()?;
            return Ok(config.override_with_env());
        }

        Ok(App::from_env())
    }

    /// 從 env 中讀取設定值
    fn from_env() -> Self {
        App::default().override_with_env()
    }

    /// 將來至於 env 的設定值覆蓋掉 json 上的設定值
    fn override_with_env(mut self) -> Self {
        if let Ok(host) = env::var(HTTP_HOST) {
            self.system.http_host = host;
        }

        if let Ok(port) = env::var(HTTP_PORT) {
            self.system.http_port = u16::from_str(&port).unwrap_or(self.system.http_port);
        }

        if let Ok(host) = env::var(QUOTE_HOST) {
            self.quote.host = host;
        }

        self
    }
}

/// 回傳設定檔的路徑
fn config_path() -> PathBuf {
    PathBuf::from(CONFIG_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging;

    #[tokio::test]
    async fn test_init() {
        dotenv::dotenv().ok();
        logging::debug_file_async(format!("SETTINGS.system: {:#?}", SETTINGS.system));
        logging::debug_file_async(format!("SETTINGS.quote: {:#?}", SETTINGS.quote));

        assert!(!SETTINGS.quote.host.is_empty());
        assert_ne!(SETTINGS.system.http_port, 0);
    }
}
