use std::fs;
use std::path::{Path, PathBuf};

use engine_logging::{engine_info, engine_warn};
use formfill_engine::HeuristicSettings;
use serde::{Deserialize, Serialize};

/// Where and how to reach the matcher service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherSettings {
    /// Base URL; requests go to `{endpoint}/autofill`.
    pub endpoint: String,
    /// Sent as the `x-user-id` header.
    pub user_id: String,
    /// Deadline for the whole matcher call, in seconds.
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for MatcherSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8000".to_string(),
            user_id: String::new(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

impl MatcherSettings {
    /// Command-line values win over the settings file.
    pub fn override_with(
        &mut self,
        endpoint: Option<String>,
        user_id: Option<String>,
        timeout_secs: Option<u64>,
    ) {
        if let Some(endpoint) = endpoint {
            self.endpoint = endpoint;
        }
        if let Some(user_id) = user_id {
            self.user_id = user_id;
        }
        if let Some(timeout_secs) = timeout_secs {
            self.timeout_secs = timeout_secs;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub matcher: MatcherSettings,
    pub heuristics: HeuristicSettings,
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// Loads RON settings. No path means defaults; a path that does not exist
/// logs a warning and also yields defaults. Keys absent from the file keep
/// their default values.
pub fn load_settings(path: Option<&Path>) -> Result<AppSettings, SettingsError> {
    let Some(path) = path else {
        return Ok(AppSettings::default());
    };
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            engine_warn!("Settings file {:?} not found, using defaults", path);
            return Ok(AppSettings::default());
        }
        Err(source) => {
            return Err(SettingsError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let settings = ron::from_str(&content).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    engine_info!("Loaded settings from {:?}", path);
    Ok(settings)
}
