use serde::{Deserialize, Serialize};

use crate::core::table::DEFAULT_WIDTH;
use crate::encoders::algorithms::pfn::Limits;

/// Character table settings.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct TableSettings {
    /// Slot width of every padded character notation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<usize>,
}

/// Decoder guards against hostile input.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct LimitSettings {
    /// Deepest bracket nesting accepted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
    /// Most exponent slots one notation may span, which also caps the zeros
    /// of a single group; integers needing more are refused on encode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_run: Option<usize>,
}

/// Output preferences for the command line front end.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct DisplaySettings {
    /// Print the raw PFE next to the simplified one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_raw: Option<bool>,
    /// Lower-case text before encoding
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lowercase: Option<bool>,
}

/// Codec configuration loaded from TOML files.
///
/// Every field is optional so that override files only need to name what
/// they change; accessors fill in the defaults.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct CodecConfig {
    #[serde(default)]
    pub table: TableSettings,
    #[serde(default)]
    pub limits: LimitSettings,
    #[serde(default)]
    pub display: DisplaySettings,
}

impl CodecConfig {
    /// Parses a configuration from TOML content.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Loads the built-in configuration bundled with the library.
    pub fn load_default() -> Result<Self, Box<dyn std::error::Error>> {
        let content = include_str!("../../pfe.toml");
        Ok(Self::from_toml(content)?)
    }

    /// Loads configuration from a custom file path.
    pub fn load_from_file(path: &std::path::Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_toml(&content)?)
    }

    /// Loads configuration with user overrides from standard locations.
    ///
    /// Searches in priority order:
    /// 1. Built-in defaults (from library)
    /// 2. `~/.config/pfe/pfe.toml` (user overrides)
    /// 3. `./pfe.toml` (project-local overrides)
    ///
    /// Later files override earlier ones field by field. A file that fails
    /// to parse is reported and skipped.
    pub fn load_with_overrides() -> Result<Self, Box<dyn std::error::Error>> {
        let mut config = Self::load_default()?;

        if let Some(config_dir) = dirs::config_dir() {
            let user_config_path = config_dir.join("pfe").join("pfe.toml");
            if user_config_path.exists() {
                match Self::load_from_file(&user_config_path) {
                    Ok(user_config) => config.merge(user_config),
                    Err(e) => {
                        tracing::warn!(
                            path = %user_config_path.display(),
                            error = %e,
                            "failed to load user config"
                        );
                    }
                }
            }
        }

        let local_config_path = std::path::Path::new("pfe.toml");
        if local_config_path.exists() {
            match Self::load_from_file(local_config_path) {
                Ok(local_config) => config.merge(local_config),
                Err(e) => {
                    tracing::warn!(
                        path = %local_config_path.display(),
                        error = %e,
                        "failed to load local config"
                    );
                }
            }
        }

        Ok(config)
    }

    /// Merges another configuration into this one.
    ///
    /// Fields set in `other` win; fields it leaves out keep their value.
    pub fn merge(&mut self, other: CodecConfig) {
        self.table.width = other.table.width.or(self.table.width);
        self.limits.max_depth = other.limits.max_depth.or(self.limits.max_depth);
        self.limits.max_run = other.limits.max_run.or(self.limits.max_run);
        self.display.show_raw = other.display.show_raw.or(self.display.show_raw);
        self.display.lowercase = other.display.lowercase.or(self.display.lowercase);
    }

    /// Returns the effective slot width of the character table.
    pub fn width(&self) -> usize {
        self.table.width.unwrap_or(DEFAULT_WIDTH)
    }

    /// Returns the effective decoder limits.
    pub fn limits(&self) -> Limits {
        Limits {
            max_depth: self.limits.max_depth.unwrap_or(Limits::DEFAULT_MAX_DEPTH),
            max_run: self.limits.max_run.unwrap_or(Limits::DEFAULT_MAX_RUN),
        }
    }

    /// Returns whether the raw PFE should be shown.
    pub fn show_raw(&self) -> bool {
        self.display.show_raw.unwrap_or(false)
    }

    /// Returns whether text is lower-cased before encoding.
    pub fn lowercase(&self) -> bool {
        self.display.lowercase.unwrap_or(false)
    }

    /// Returns a copy with every default spelled out.
    pub fn resolved(&self) -> CodecConfig {
        let limits = self.limits();
        CodecConfig {
            table: TableSettings {
                width: Some(self.width()),
            },
            limits: LimitSettings {
                max_depth: Some(limits.max_depth),
                max_run: Some(limits.max_run),
            },
            display: DisplaySettings {
                show_raw: Some(self.show_raw()),
                lowercase: Some(self.lowercase()),
            },
        }
    }
}
