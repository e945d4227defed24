/// Errors surfaced to the collaborator driving the orrery.
///
/// Data sparsity (missing distances, unresolved details, degenerate scale)
/// is never an error; those bodies are dropped from the layout.
#[derive(thiserror::Error, Debug)]
pub enum OrreryError {
    #[error("invalid catalog or config JSON: {0}")]
    Catalog(#[from] serde_json::Error),

    #[error("render target is not attached or has zero size")]
    MountUnavailable,

    #[error("render surface error: {0}")]
    Surface(String),

    #[error("unknown star system: {0}")]
    UnknownSystem(String),
}
