//! Graph configuration.

use crate::error::Error;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GraphKind {
    #[default]
    Directed,
    /// Every edge is mirrored on both endpoints with the same weight.
    Undirected,
}

impl GraphKind {
    pub fn is_directed(self) -> bool {
        matches!(self, GraphKind::Directed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GraphKind::Directed => "directed",
            GraphKind::Undirected => "undirected",
        }
    }
}

impl fmt::Display for GraphKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GraphKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "directed" => Ok(GraphKind::Directed),
            "undirected" => Ok(GraphKind::Undirected),
            other => Err(Error::UnrecognizedKind {
                kind: other.to_string(),
            }),
        }
    }
}
