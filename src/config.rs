//! Process-wide configuration.
//!
//! Built once before the first request, then only ever read. Each key also
//! answers to the name of the equivalent httpd directive, so an existing
//! configuration translates one line at a time:
//!
//! ```toml
//! CFMLHandlers      = ".cfm .cfc .cfml"
//! ModCFML_SharedKey = "secret also set in the backend valve"
//! VDirHeader        = true
//! LogHeaders        = false
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::classify::Handlers;
use crate::error::Error;

/// Immutable configuration. Cheap to share behind an `Arc`.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    #[serde(alias = "CFMLHandlers")]
    handlers: Handlers,

    #[serde(alias = "ModCFML_SharedKey")]
    shared_key: Option<String>,

    #[serde(alias = "VDirHeader")]
    vdir_header: bool,

    #[serde(alias = "PathInfoHeader")]
    path_info_header: bool,

    #[serde(alias = "LogHeaders")]
    log_headers: bool,

    #[serde(alias = "LogHandlers")]
    log_handlers: bool,

    #[serde(alias = "LogAliases")]
    log_aliases: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            handlers: Handlers::default(),
            shared_key: None,
            vdir_header: true,
            path_info_header: true,
            log_headers: false,
            log_handlers: false,
            log_aliases: false,
        }
    }
}

impl Config {
    pub fn new() -> Self { Self::default() }

    /// Reads and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let text = fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// Parses and validates TOML text. Missing keys take their defaults.
    pub fn from_toml(text: &str) -> Result<Self, Error> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), Error> {
        for handler in self.handlers.iter() {
            if !handler.starts_with('.') || handler.contains('/') {
                return Err(Error::InvalidConfig(format!(
                    "handler `{handler}` must start with `.` and contain no `/`"
                )));
            }
        }
        if self.shared_key.as_deref() == Some("") {
            return Err(Error::InvalidConfig("shared_key must not be empty".to_owned()));
        }
        Ok(())
    }

    // ── Chained setters ───────────────────────────────────────────────────────

    pub fn handlers(mut self, handlers: impl Into<Handlers>) -> Self {
        self.handlers = handlers.into();
        self
    }

    pub fn shared_key(mut self, key: impl Into<String>) -> Self {
        self.shared_key = Some(key.into());
        self
    }

    pub fn vdir_header(mut self, on: bool) -> Self {
        self.vdir_header = on;
        self
    }

    pub fn path_info_header(mut self, on: bool) -> Self {
        self.path_info_header = on;
        self
    }

    pub fn log_headers(mut self, on: bool) -> Self {
        self.log_headers = on;
        self
    }

    pub fn log_handlers(mut self, on: bool) -> Self {
        self.log_handlers = on;
        self
    }

    pub fn log_aliases(mut self, on: bool) -> Self {
        self.log_aliases = on;
        self
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn handler_list(&self) -> &Handlers { &self.handlers }
    pub fn secret(&self) -> Option<&str> { self.shared_key.as_deref() }
    pub fn emits_vdirs(&self) -> bool { self.vdir_header }
    pub fn emits_path_info(&self) -> bool { self.path_info_header }
    pub fn logs_headers(&self) -> bool { self.log_headers }
    pub fn logs_handlers(&self) -> bool { self.log_handlers }
    pub fn logs_aliases(&self) -> bool { self.log_aliases }
}
