//! Unified error type.

/// The error type returned by cfgate's fallible operations.
///
/// Request handling never fails: [`augment`](crate::augment) degrades to
/// writing fewer headers instead. This type surfaces configuration loading
/// failures and alias providers that cannot produce their entries.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("aliases unavailable: {0}")]
    AliasesUnavailable(String),
}
