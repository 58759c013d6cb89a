use std::path::PathBuf;

/// Failure of a single forecast request.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP {0}")]
    Status(u16),

    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected response: {0}")]
    Parse(String),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CityError {
    #[error("city index {index} out of range (0..{len})")]
    OutOfRange { index: usize, len: usize },

    #[error("unknown city {name:?}; available: {available}")]
    Unknown { name: String, available: String },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
}
