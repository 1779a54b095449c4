//! Demo configuration loaded from TOML.
//!
//! ```toml
//! start = "home"
//!
//! [nav]
//! launch_single_top = true
//! ```

use std::{fs, path::Path};

use anyhow::Context;
use serde::Deserialize;
use tessera_nav::NavOptions;

use crate::screens;

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// Path of the start destination.
    pub start: String,
    pub nav: NavOptions,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            start: screens::HOME.to_owned(),
            nav: NavOptions::default(),
        }
    }
}

impl AppConfig {
    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        toml::from_str(text).context("invalid demo configuration")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("failed to parse {}", path.display()))
    }
}
