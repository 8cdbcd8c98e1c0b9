//! # Minnesvakt Configuration System
//!
//! Hierarchical configuration for the minnesvakt allocator, following the
//! workspace's principles of determinism and safety.
//!
//! ## Features
//! - **Unified Configuration**: Single source of truth for arena sizing
//! - **Validation**: Runtime validation of every sizing parameter before an
//!   arena is ever constructed
//! - **Environment Awareness**: `MINNESVAKT_*` variables override files

#![warn(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

mod error;
mod heap;
mod validation;

pub use error::ConfigError;
pub use heap::HeapConfig;

/// Top-level configuration container for all minnesvakt components.
#[derive(Debug, Serialize, Deserialize, Validate, Default)]
pub struct MinnesvaktConfig {
    /// Heap arena sizing and compatibility switches.
    #[validate(nested)]
    pub heap: HeapConfig,
}

impl MinnesvaktConfig {
    /// Load configuration from default files and environment.
    ///
    /// Hierarchy:
    /// 1. Default values
    /// 2. `config/minnesvakt.yaml` - base settings. If missing, defaults are
    ///    used.
    /// 3. `MINNESVAKT_*` environment variables (`__` separates nesting).
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(MinnesvaktConfig::default()));

        if Path::new("config/minnesvakt.yaml").exists() {
            figment = figment.merge(Yaml::file("config/minnesvakt.yaml"));
        } else {
            println!("config/minnesvakt.yaml not found, using default configuration");
        }

        figment
            .merge(Env::prefixed("MINNESVAKT_").split("__"))
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.validate()?;
                Ok(config)
            })
    }

    /// Load configuration from a specific path for testing/validation.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(PathBuf::from(
                path.to_string_lossy().to_string(),
            )));
        }

        Figment::from(Serialized::defaults(MinnesvaktConfig::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed("MINNESVAKT_").split("__"))
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.validate()?;
                Ok(config)
            })
    }
}
