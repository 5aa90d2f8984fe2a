use std::fmt;

use thiserror::Error;

use crate::graph::GraphError;

/// Position of a token in the text format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Directed,
    Weighted,
    VertexCount,
    EdgeCount,
    EdgeSource(usize),
    EdgeTarget(usize),
    EdgeWeight(usize),
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Directed => write!(f, "directed flag"),
            Field::Weighted => write!(f, "weighted flag"),
            Field::VertexCount => write!(f, "vertex count"),
            Field::EdgeCount => write!(f, "edge count"),
            Field::EdgeSource(i) => write!(f, "source of edge {i}"),
            Field::EdgeTarget(i) => write!(f, "target of edge {i}"),
            Field::EdgeWeight(i) => write!(f, "weight of edge {i}"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Cannot read graph: {0}")]
    Io(#[from] std::io::Error),
    #[error("Missing {0}")]
    MissingField(Field),
    #[error("Invalid {field}: {token:?}")]
    InvalidNumber { field: Field, token: String },
    #[error("Edge record {index} of {expected} is truncated: missing {field}")]
    TruncatedEdge {
        index: usize,
        expected: usize,
        field: Field,
    },
    #[error("Edge record {index} is invalid")]
    InvalidEdge {
        index: usize,
        #[source]
        source: GraphError,
    },
}
