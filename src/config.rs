//! Configuration loading with auto-creation and shallow merge over defaults.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// A broadcast channel that ads are attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: String,
    pub name: String,
}

/// Application configuration, loaded once at startup and read-only afterwards.
///
/// Serde field names double as the JSON keys of the configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory that generated CSV files are written to.
    pub output_directory: PathBuf,
    /// Filename prefix of generated CSV files.
    pub file_prefix: String,
    /// Recurrence of the generate cycle: minutely, hourly, daily or weekly.
    pub schedule_interval: String,
    /// Maximum number of generated files kept by retention pruning.
    pub max_files_to_keep: usize,
    pub channels: Vec<Channel>,
    pub advertisers: Vec<String>,
    pub regions: Vec<String>,
    pub device_types: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let channel = |id: &str, name: &str| Channel {
            id: id.to_string(),
            name: name.to_string(),
        };
        AppConfig {
            output_directory: PathBuf::from("./ad_logs"),
            file_prefix: "iptv_ad_log".to_string(),
            schedule_interval: "minutely".to_string(),
            max_files_to_keep: 30,
            channels: vec![
                channel("CH001", "KBS1"),
                channel("CH002", "KBS2"),
                channel("CH003", "MBC"),
                channel("CH004", "SBS"),
                channel("CH005", "tvN"),
            ],
            advertisers: [
                "삼성전자",
                "LG전자",
                "현대자동차",
                "SK텔레콤",
                "KB금융",
                "신한은행",
                "롯데",
                "CJ",
                "네이버",
                "카카오",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            regions: ["서울", "경기", "부산", "대구", "인천", "광주", "대전", "울산"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            device_types: ["STB", "Smart TV", "Mobile", "Tablet", "PC"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `path`, creating the file with defaults when it
    /// does not exist.
    ///
    /// An existing file is parsed as a JSON object and shallow-merged over the
    /// defaults: supplied top-level keys replace default keys wholesale, so a
    /// partial `channels` override replaces the entire default list. An
    /// unreadable or unparsable file is logged and the defaults are used
    /// (non-fatal). Only failure to write the initial default file is fatal.
    pub fn load(path: &Path) -> anyhow::Result<AppConfig> {
        if !path.exists() {
            let config = AppConfig::default();
            let json = serde_json::to_string_pretty(&config)
                .context("Failed to serialize default configuration")?;
            std::fs::write(path, json)
                .with_context(|| format!("Failed to create config file {}", path.display()))?;
            info!("Created default config file: {}", path.display());
            return Ok(config);
        }

        match Self::load_existing(path) {
            Ok(config) => Ok(config),
            Err(e) => {
                warn!(
                    "Failed to load config file {}: {e:#}; using defaults",
                    path.display()
                );
                Ok(AppConfig::default())
            }
        }
    }

    fn load_existing(path: &Path) -> anyhow::Result<AppConfig> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let user: Value =
            serde_json::from_str(&raw).context("Config file is not valid JSON")?;
        let Value::Object(user_map) = user else {
            anyhow::bail!("Config root must be a JSON object");
        };

        let mut merged = serde_json::to_value(AppConfig::default())
            .context("Failed to serialize default configuration")?;
        if let Value::Object(merged_map) = &mut merged {
            // One-level merge, matching the documented override semantics.
            for (key, value) in user_map {
                merged_map.insert(key, value);
            }
        }

        serde_json::from_value(merged).context("Merged configuration has invalid field values")
    }
}
