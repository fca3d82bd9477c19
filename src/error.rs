//! Error types for the influence graph core

/// Rejected cluster mutations. State is unchanged whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClusterError {
    #[error("cluster `{0}` is reserved and cannot be deleted")]
    ReservedCluster(String),

    #[error("cluster names must not be empty")]
    EmptyName,

    #[error("custom clustering is not active")]
    NotCustomMode,
}

/// Failures while decoding fetch results handed over by the network layer
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed fetch result: {0}")]
    Json(#[from] serde_json::Error),

    #[error("fetch result has no focal item id")]
    MissingFocalItem,
}
