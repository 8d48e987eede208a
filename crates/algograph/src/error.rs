use crate::graph::NodeHandle;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("node handle {handle} is stale or does not belong to this graph")]
    InvalidHandle { handle: NodeHandle },

    #[error("negative edge weight {weight} on {from} -> {to}")]
    NegativeWeight {
        from: NodeHandle,
        to: NodeHandle,
        weight: i64,
    },

    #[error("path length overflows i64 when relaxing {from} -> {to}")]
    DistanceOverflow { from: NodeHandle, to: NodeHandle },

    #[error("{operation} is not supported: {reason}")]
    UnsupportedOperation {
        operation: &'static str,
        reason: &'static str,
    },

    #[error("Unrecognized graph kind: {kind}")]
    UnrecognizedKind { kind: String },

    #[error(transparent)]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl Error {
    pub(crate) fn unsupported(operation: &'static str, reason: &'static str) -> Self {
        Self::UnsupportedOperation { operation, reason }
    }
}
