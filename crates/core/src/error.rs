/// Errors raised while loading a fixture document.
#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("could not read fixtures from '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid fixture document: {0}")]
    Json(#[from] serde_json::Error),

    /// An edge or intervention names a node that is not in the store.
    #[error("{owner} references unknown node '{node_id}'")]
    DanglingReference { owner: String, node_id: String },
}
