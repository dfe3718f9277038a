//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use sportgear_commerce::catalog::Catalog;
use sportgear_commerce::config::StoreConfig;
use sportgear_commerce::ids::SessionId;
use sportgear_commerce::session::Storefront;
use sportgear_observability::{LogLevel, StructuredLogger};

use crate::config::{self, CONFIG_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// Effective store configuration.
    pub config: StoreConfig,
    /// Where the configuration came from, if a file was found.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    catalog: Arc<Catalog>,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => {
                let path = PathBuf::from(path);
                (config::load(&path)?, Some(path))
            }
            None => match Self::find_config(&cwd) {
                Some(path) => (config::load(&path)?, Some(path)),
                None => (StoreConfig::default(), None),
            },
        };

        if let Some(path) = &config_path {
            output.debug(&format!("Using config {}", path.display()));
        }

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
            catalog: Arc::new(Catalog::seeded()),
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<PathBuf> {
        start.ancestors().find_map(|dir| {
            CONFIG_NAMES
                .iter()
                .map(|name| dir.join(name))
                .find(|path| path.is_file())
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Start a shopper session.
    ///
    /// Session logs go to stderr only in verbose mode, at debug level.
    pub fn storefront(&self) -> Result<Storefront> {
        let logger = if self.output.is_verbose() {
            StructuredLogger::new(SessionId::generate().into_inner())
                .with_min_level(LogLevel::Debug)
                .with_format(self.config.logging.format)
        } else {
            StructuredLogger::disabled()
        };
        let store = Storefront::new(self.catalog.clone(), self.config.clone(), logger)
            .context("Config does not fit the catalog")?;
        Ok(store)
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        let path = PathBuf::from(path);
        if path.is_absolute() {
            path
        } else {
            self.cwd.join(path)
        }
    }
}
