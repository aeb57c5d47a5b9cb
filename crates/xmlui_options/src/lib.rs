//! xmlui_options: Front-end options and the `xmlui.config.json` file.
//!
//! Every field has a default, so a config file only lists what it changes.
//! Keys the front end does not know are reported as `X002` warnings rather
//! than rejected.

use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};
use xmlui_diagnostics::{messages, Diagnostic};

/// The file name looked up by [`find_config_file`].
pub const CONFIG_FILE_NAME: &str = "xmlui.config.json";

pub const DEFAULT_MAX_SOURCE_SIZE: usize = 1024 * 1024;

const KNOWN_OPTIONS: &[&str] = &[
    "restrictiveMode",
    "rootModuleName",
    "maxSourceSize",
    "collectCodeBehind",
    "stripPositions",
];

/// Options shared by every front-end entry point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FrontEndOptions {
    /// Reject top-level statements other than declarations and imports,
    /// and nested function declarations.
    pub restrictive_mode: bool,
    /// The module name in-markup scripts are resolved as.
    pub root_module_name: String,
    /// Sources longer than this are rejected before parsing.
    pub max_source_size: usize,
    pub collect_code_behind: bool,
    pub strip_positions: bool,
}

impl Default for FrontEndOptions {
    fn default() -> Self {
        Self {
            restrictive_mode: false,
            root_module_name: "Main".to_string(),
            max_source_size: DEFAULT_MAX_SOURCE_SIZE,
            collect_code_behind: true,
            strip_positions: true,
        }
    }
}

/// Options read from a config file, with warnings about its content.
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub options: FrontEndOptions,
    pub warnings: Vec<Diagnostic>,
}

#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    #[error("cannot read config file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse the content of a config file.
pub fn parse_config(content: &str) -> Result<LoadedConfig, OptionsError> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    let mut warnings = Vec::new();
    if let Some(object) = value.as_object() {
        for key in object.keys() {
            if !KNOWN_OPTIONS.contains(&key.as_str()) {
                warnings.push(Diagnostic::new(&messages::UNKNOWN_OPTION_0, &[key.as_str()]));
            }
        }
    }
    let options = serde_json::from_value(value)?;
    Ok(LoadedConfig { options, warnings })
}

/// Read and parse a config file.
pub fn load_config_file(path: &Path) -> Result<LoadedConfig, OptionsError> {
    let content = std::fs::read_to_string(path).map_err(|source| OptionsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let file = path.display().to_string();
    let mut config = parse_config(&content)?;
    for warning in &mut config.warnings {
        warning.file = Some(file.clone());
    }
    debug!("loaded config from {}", file);
    Ok(config)
}

/// Look for [`CONFIG_FILE_NAME`] in `start` and its ancestors.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}
