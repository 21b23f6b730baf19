use std::path::PathBuf;

use thiserror::Error;

/// Why a clinic query produced no dataset.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("request to clinic endpoint failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("clinic endpoint answered with status {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed response body: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("response reported success without a data array")]
    MissingData,

    /// The endpoint answered with `success: false`.
    #[error("clinic endpoint rejected the query{}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Rejected { message: Option<String> },
}

impl QueryError {
    /// Transport-level failures, as opposed to an application-level refusal.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            QueryError::Transport(_)
                | QueryError::Status(_)
                | QueryError::Malformed(_)
                | QueryError::MissingData
        )
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
