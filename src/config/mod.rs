//! Project configuration management for `folio.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                        |
//! |-------------|------------------------------------------------|
//! | `[build]`   | Post directory, manifest location, extension   |
//! | `[listing]` | Page size, recommendations, reading speed      |
//! | `[serve]`   | Local API server (interface, port)             |
//!
//! The file is optional: without it every field takes its default.
//!
//! # Example
//!
//! ```toml
//! [build]
//! content = "src/content/blog"
//! data = "src/data"
//!
//! [listing]
//! per_page = 6
//!
//! [serve]
//! port = 5277
//! ```

mod build;
pub mod defaults;
mod error;
mod listing;
mod serve;

use build::BuildConfig;
use error::ConfigError;
use listing::ListingConfig;
use serve::ServeConfig;

use crate::cli::{Cli, Commands};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Root configuration structure representing folio.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Post and manifest locations
    #[serde(default)]
    pub build: BuildConfig,

    /// Listing and detail presentation settings
    #[serde(default)]
    pub listing: ListingConfig,

    /// Local API server settings
    #[serde(default)]
    pub serve: ServeConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Load, apply CLI overrides and validate.
    ///
    /// A missing config file is not an error; defaults are used instead.
    pub fn load(cli: &Cli) -> Result<Self> {
        let root = cli.root.as_deref().unwrap_or(Path::new("./"));
        let config_path = root.join(&cli.config);

        let mut config = if config_path.exists() {
            Self::from_path(&config_path)?
        } else {
            Self::default()
        };
        config.update_with_cli(cli);
        config.validate()?;

        Ok(config)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let root = cli
            .root
            .clone()
            .unwrap_or_else(|| self.get_root().to_owned());

        Self::update_option(&mut self.build.content, cli.content.as_ref());
        Self::update_option(&mut self.build.data, cli.data.as_ref());
        self.update_path_with_root(&root);

        match &cli.command {
            Commands::List {
                per_page: Some(per_page),
                ..
            } => self.listing.per_page = *per_page,
            Commands::Serve { interface, port } => {
                Self::update_option(&mut self.serve.interface, interface.as_ref());
                Self::update_option(&mut self.serve.port, port.as_ref());
            }
            _ => {}
        }
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Resolve all paths against the root and normalize them to absolute paths
    fn update_path_with_root(&mut self, root: &Path) {
        let root = Self::normalize_path(root);

        self.build.content = Self::normalize_path(&root.join(&self.build.content));
        self.build.data = Self::normalize_path(&root.join(&self.build.data));
        self.build.root = Some(root);
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.listing.per_page == 0 {
            bail!(ConfigError::Validation(
                "[listing.per_page] must be at least 1".into()
            ));
        }

        if self.listing.words_per_minute == 0 {
            bail!(ConfigError::Validation(
                "[listing.words_per_minute] must be at least 1".into()
            ));
        }

        let ext = &self.build.extension;
        if ext.is_empty() || ext.starts_with('.') {
            bail!(ConfigError::Validation(
                "[build.extension] must be non-empty and have no leading dot".into()
            ));
        }

        let manifest = &self.build.manifest;
        if manifest.is_empty() || manifest.contains(['/', '\\']) {
            bail!(ConfigError::Validation(
                "[build.manifest] must be a plain file name".into()
            ));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
